//! Drafting collaborator: produces the first draft and refines drafts from feedback.

mod prompts;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::domain::CraftRequest;
use crate::llm::{ChatPrompt, LlmError, TextGenerator};

/// Produces message bodies only, ready to be evaluated and returned without post-processing.
#[async_trait]
pub trait DraftGenerator: Send + Sync {
    async fn initial(&self, request: &CraftRequest) -> Result<String, GenerationFailure>;

    /// Rewrites `draft` so that every point in `feedback` is addressed.
    async fn refine(&self, draft: &str, feedback: &str) -> Result<String, GenerationFailure>;
}

/// Text generation collaborator failed to produce a draft.
#[derive(Debug, thiserror::Error)]
pub enum GenerationFailure {
    #[error(transparent)]
    Upstream(#[from] LlmError),
    #[error("language model returned an empty draft")]
    EmptyDraft,
    #[error("draft generation timed out after {0:?}")]
    TimedOut(Duration),
}

/// [`DraftGenerator`] backed by a hosted language model.
pub struct LlmDraftGenerator<T> {
    llm: Arc<T>,
}

impl<T> LlmDraftGenerator<T>
where
    T: TextGenerator,
{
    pub fn new(llm: Arc<T>) -> Self {
        Self { llm }
    }

    async fn draft(&self, prompt: String) -> Result<String, GenerationFailure> {
        let prompt = ChatPrompt::user(prompt).with_system(prompts::WRITER_PERSONA);
        let text = self.llm.complete(prompt).await?;
        let body = text.trim();
        if body.is_empty() {
            return Err(GenerationFailure::EmptyDraft);
        }
        Ok(body.to_string())
    }
}

#[async_trait]
impl<T> DraftGenerator for LlmDraftGenerator<T>
where
    T: TextGenerator,
{
    async fn initial(&self, request: &CraftRequest) -> Result<String, GenerationFailure> {
        self.draft(prompts::initial_draft_prompt(request)).await
    }

    async fn refine(&self, draft: &str, feedback: &str) -> Result<String, GenerationFailure> {
        self.draft(prompts::refinement_prompt(draft, feedback)).await
    }
}
