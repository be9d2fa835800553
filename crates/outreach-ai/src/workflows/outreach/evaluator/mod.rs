//! Scoring collaborator: grades a draft against the outreach rubric.

mod extract;
mod prompt;

pub use extract::extract_structured_block;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::domain::{CraftRequest, EvaluationResult};
use crate::llm::{ChatPrompt, LlmError, TextGenerator};

/// Scores a draft and returns structured scores plus free-text feedback.
#[async_trait]
pub trait DraftEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        draft: &str,
        request: &CraftRequest,
    ) -> Result<EvaluationResult, EvaluationFailure>;
}

/// The evaluator could not produce a usable structured answer.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationFailure {
    #[error(transparent)]
    Upstream(#[from] LlmError),
    #[error("failed to parse evaluation result: {reason}")]
    Malformed { reason: String, answer: String },
    #[error("evaluation timed out after {0:?}")]
    TimedOut(Duration),
}

/// Parses a raw evaluator answer, tolerating a fenced wrapper around the JSON object.
pub fn parse_evaluation(answer: &str) -> Result<EvaluationResult, EvaluationFailure> {
    let structured = extract_structured_block(answer);

    let result: EvaluationResult =
        serde_json::from_str(structured).map_err(|err| EvaluationFailure::Malformed {
            reason: err.to_string(),
            answer: structured.to_string(),
        })?;

    result
        .scores
        .validate()
        .map_err(|reason| EvaluationFailure::Malformed {
            reason,
            answer: structured.to_string(),
        })?;

    Ok(result)
}

/// [`DraftEvaluator`] backed by a hosted language model.
pub struct LlmDraftEvaluator<T> {
    llm: Arc<T>,
}

impl<T> LlmDraftEvaluator<T>
where
    T: TextGenerator,
{
    pub fn new(llm: Arc<T>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl<T> DraftEvaluator for LlmDraftEvaluator<T>
where
    T: TextGenerator,
{
    async fn evaluate(
        &self,
        draft: &str,
        request: &CraftRequest,
    ) -> Result<EvaluationResult, EvaluationFailure> {
        let prompt = ChatPrompt::user(prompt::evaluation_prompt(draft, request))
            .with_system(prompt::ANALYST_PERSONA);
        let answer = self.llm.complete(prompt).await?;

        parse_evaluation(&answer).inspect_err(|err| {
            if let EvaluationFailure::Malformed { reason, answer } = err {
                warn!(%reason, %answer, "evaluator answer did not match the rubric shape");
            }
        })
    }
}
