use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::llm::{ChatPrompt, LlmError, TextGenerator};
use crate::workflows::outreach::domain::{
    BrandingGuidelines, CandidateProfile, CraftRequest, EmailContextPurpose, EvaluationResult,
    EvaluationScores, JobDescription, StructuralConstraints, Verdict,
};
use crate::workflows::outreach::evaluator::{DraftEvaluator, EvaluationFailure};
use crate::workflows::outreach::generator::{DraftGenerator, GenerationFailure};
use crate::workflows::outreach::{CrafterConfig, EmailCrafterService};

pub(super) const INITIAL_DRAFT: &str = "Hi Ada, your work on streaming pipelines caught our eye.";

pub(super) fn craft_request() -> CraftRequest {
    CraftRequest {
        candidate_profile: CandidateProfile {
            key_skills: vec![
                "Rust".to_string(),
                "Kafka".to_string(),
                "Distributed systems".to_string(),
            ],
            relevant_experience: "6 years building low-latency data platforms".to_string(),
            stated_interests: "Open source observability tooling".to_string(),
            online_profile_link: Some("https://github.com/ada-streams".to_string()),
        },
        job_description: JobDescription {
            key_responsibilities: "Own the ingestion tier of our telemetry pipeline".to_string(),
            unique_selling_points: "Fully remote, open source first, four-day work week"
                .to_string(),
            company_culture_keywords: vec!["ownership".to_string(), "curiosity".to_string()],
        },
        email_context_purpose: EmailContextPurpose {
            email_type: "Initial outreach".to_string(),
            desired_cta: "Book a 20 minute intro call".to_string(),
        },
        structural_constraints: StructuralConstraints {
            needs_html_placeholders: false,
            max_length: "150 words".to_string(),
            branding_guidelines: BrandingGuidelines {
                highlight_match: true,
            },
        },
        desired_tone_style: "Warm and concise".to_string(),
    }
}

pub(super) fn evaluation(overall: f64, grammar: Verdict, constraints: Verdict) -> EvaluationResult {
    EvaluationResult {
        scores: EvaluationScores {
            personalization: 7,
            relevance_to_role: 8,
            tone_alignment: 7,
            clarity_and_conciseness: 6,
            cta_strength: 8,
            grammar_and_professionalism: grammar,
            constraint_adherence: constraints,
            overall_quality_score: overall,
        },
        feedback: format!("Scored {overall:.1}; tighten the opening and sharpen the ask."),
    }
}

pub(super) fn passing(overall: f64) -> EvaluationResult {
    evaluation(overall, Verdict::Pass, Verdict::Pass)
}

pub(super) fn evaluation_json(overall: f64) -> String {
    format!(
        r#"{{
    "scores": {{
        "personalization": 8,
        "relevanceToRole": 9,
        "toneAlignment": 7,
        "clarityAndConciseness": 8,
        "ctaStrength": 9,
        "grammarAndProfessionalism": "Pass",
        "constraintAdherence": "Pass",
        "overallQualityScore": {overall}
    }},
    "feedback": "Mention the four-day week earlier."
}}"#
    )
}

pub(super) fn config(max_refinement_loops: u32) -> CrafterConfig {
    CrafterConfig {
        max_refinement_loops,
        ..CrafterConfig::default()
    }
}

/// Generator returning a fixed initial draft and numbered refinements.
pub(super) struct ScriptedGenerator {
    initial: Result<String, String>,
    fail_refine_at: Option<usize>,
    refine_calls: Mutex<Vec<(String, String)>>,
    delay: Option<Duration>,
}

impl ScriptedGenerator {
    pub(super) fn new() -> Self {
        Self {
            initial: Ok(INITIAL_DRAFT.to_string()),
            fail_refine_at: None,
            refine_calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(super) fn failing_initial(reason: &str) -> Self {
        Self {
            initial: Err(reason.to_string()),
            ..Self::new()
        }
    }

    pub(super) fn with_initial(draft: &str) -> Self {
        Self {
            initial: Ok(draft.to_string()),
            ..Self::new()
        }
    }

    /// Fails the `call`-th refinement (1-based).
    pub(super) fn failing_refine_at(call: usize) -> Self {
        Self {
            fail_refine_at: Some(call),
            ..Self::new()
        }
    }

    pub(super) fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub(super) fn refine_calls(&self) -> Vec<(String, String)> {
        self.refine_calls
            .lock()
            .expect("generator mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl DraftGenerator for ScriptedGenerator {
    async fn initial(&self, _request: &CraftRequest) -> Result<String, GenerationFailure> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.initial
            .clone()
            .map_err(|reason| GenerationFailure::Upstream(LlmError::Transport(reason)))
    }

    async fn refine(&self, draft: &str, feedback: &str) -> Result<String, GenerationFailure> {
        let call = {
            let mut calls = self.refine_calls.lock().expect("generator mutex poisoned");
            calls.push((draft.to_string(), feedback.to_string()));
            calls.len()
        };

        if self.fail_refine_at == Some(call) {
            return Err(GenerationFailure::Upstream(LlmError::Status {
                status: 503,
                body: "model overloaded".to_string(),
            }));
        }

        Ok(format!("refined draft {call}"))
    }
}

pub(super) enum Scripted {
    Answer(EvaluationResult),
    Fail(&'static str),
}

/// Evaluator replaying a script, then repeating `repeat` once the script is exhausted.
pub(super) struct ScriptedEvaluator {
    script: Mutex<VecDeque<Scripted>>,
    repeat: Option<EvaluationResult>,
    drafts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedEvaluator {
    pub(super) fn always(result: EvaluationResult) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(result),
            drafts: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(super) fn sequence(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            repeat: None,
            drafts: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(super) fn slow(result: EvaluationResult, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::always(result)
        }
    }

    pub(super) fn evaluated_drafts(&self) -> Vec<String> {
        self.drafts.lock().expect("evaluator mutex poisoned").clone()
    }
}

#[async_trait]
impl DraftEvaluator for ScriptedEvaluator {
    async fn evaluate(
        &self,
        draft: &str,
        _request: &CraftRequest,
    ) -> Result<EvaluationResult, EvaluationFailure> {
        self.drafts
            .lock()
            .expect("evaluator mutex poisoned")
            .push(draft.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .script
            .lock()
            .expect("evaluator mutex poisoned")
            .pop_front();

        match next {
            Some(Scripted::Answer(result)) => Ok(result),
            Some(Scripted::Fail(reason)) => Err(EvaluationFailure::Malformed {
                reason: reason.to_string(),
                answer: "not json".to_string(),
            }),
            None => self
                .repeat
                .clone()
                .ok_or_else(|| EvaluationFailure::Upstream(LlmError::EmptyResponse)),
        }
    }
}

/// Language model replaying canned answers and recording every prompt.
pub(super) struct ScriptedLlm {
    answers: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<ChatPrompt>>,
}

impl ScriptedLlm {
    pub(super) fn new(answers: Vec<Result<String, LlmError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn answering(answer: &str) -> Self {
        Self::new(vec![Ok(answer.to_string())])
    }

    pub(super) fn prompts(&self) -> Vec<ChatPrompt> {
        self.prompts.lock().expect("llm mutex poisoned").clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedLlm {
    async fn complete(&self, prompt: ChatPrompt) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .expect("llm mutex poisoned")
            .push(prompt);
        self.answers
            .lock()
            .expect("llm mutex poisoned")
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }
}

pub(super) fn build_service(
    generator: ScriptedGenerator,
    evaluator: ScriptedEvaluator,
    config: CrafterConfig,
) -> (
    EmailCrafterService<ScriptedGenerator, ScriptedEvaluator>,
    Arc<ScriptedGenerator>,
    Arc<ScriptedEvaluator>,
) {
    let generator = Arc::new(generator);
    let evaluator = Arc::new(evaluator);
    let service = EmailCrafterService::new(generator.clone(), evaluator.clone(), config);
    (service, generator, evaluator)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
