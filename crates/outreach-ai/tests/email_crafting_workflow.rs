//! End-to-end tests for the outreach crafting loop.
//!
//! Scenarios run the real prompt builders and answer parsing against a scripted language model so
//! we can validate the public service facade and HTTP router without network access.

mod common {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use outreach_ai::llm::{ChatPrompt, LlmError, TextGenerator};
    use outreach_ai::workflows::outreach::{
        BrandingGuidelines, CandidateProfile, CraftRequest, CrafterConfig, EmailContextPurpose,
        EmailCrafterService, JobDescription, LlmDraftEvaluator, LlmDraftGenerator,
        StructuralConstraints,
    };

    pub(super) type Service =
        EmailCrafterService<LlmDraftGenerator<ConversationLlm>, LlmDraftEvaluator<ConversationLlm>>;

    /// Replays answers in order, shared by the generator and the evaluator.
    #[derive(Default)]
    pub(super) struct ConversationLlm {
        answers: Mutex<VecDeque<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ConversationLlm {
        pub(super) fn new(answers: Vec<Result<String, LlmError>>) -> Self {
            Self {
                answers: Mutex::new(answers.into_iter().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(super) fn prompts(&self) -> Vec<String> {
            self.prompts.lock().expect("llm mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ConversationLlm {
        async fn complete(&self, prompt: ChatPrompt) -> Result<String, LlmError> {
            self.prompts
                .lock()
                .expect("llm mutex poisoned")
                .push(prompt.user_text());
            self.answers
                .lock()
                .expect("llm mutex poisoned")
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyResponse))
        }
    }

    pub(super) fn service(llm: Arc<ConversationLlm>, config: CrafterConfig) -> Service {
        EmailCrafterService::new(
            Arc::new(LlmDraftGenerator::new(llm.clone())),
            Arc::new(LlmDraftEvaluator::new(llm)),
            config,
        )
    }

    pub(super) fn request() -> CraftRequest {
        CraftRequest {
            candidate_profile: CandidateProfile {
                key_skills: vec!["Go".to_string(), "Kubernetes".to_string()],
                relevant_experience: "Platform engineer at a fintech scale-up".to_string(),
                stated_interests: "Developer experience".to_string(),
                online_profile_link: None,
            },
            job_description: JobDescription {
                key_responsibilities: "Build the internal deployment platform".to_string(),
                unique_selling_points: "Greenfield work, small senior team".to_string(),
                company_culture_keywords: vec!["pragmatic".to_string()],
            },
            email_context_purpose: EmailContextPurpose {
                email_type: "Cold outreach".to_string(),
                desired_cta: "Reply to schedule a chat".to_string(),
            },
            structural_constraints: StructuralConstraints {
                needs_html_placeholders: true,
                max_length: "120 words".to_string(),
                branding_guidelines: BrandingGuidelines::default(),
            },
            desired_tone_style: "Direct".to_string(),
        }
    }

    pub(super) fn evaluation_answer(overall: f64, grammar: &str) -> String {
        serde_json::json!({
            "scores": {
                "personalization": 7,
                "relevanceToRole": 8,
                "toneAlignment": 8,
                "clarityAndConciseness": 7,
                "ctaStrength": 6,
                "grammarAndProfessionalism": grammar,
                "constraintAdherence": "Pass",
                "overallQualityScore": overall,
            },
            "feedback": format!("overall {overall}: make the call to action more specific"),
        })
        .to_string()
    }
}

use common::*;
use outreach_ai::llm::LlmError;
use outreach_ai::workflows::outreach::{crafter_router, fallback_scores, CrafterConfig};
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn refines_until_the_rubric_passes() {
    let llm = Arc::new(ConversationLlm::new(vec![
        Ok("Hi Sam, first draft.".to_string()),
        Ok(format!("```json\n{}\n```", evaluation_answer(6.5, "Pass"))),
        Ok("Hi Sam, second draft.".to_string()),
        Ok(evaluation_answer(8.5, "pass")),
    ]));
    let service = service(llm.clone(), CrafterConfig::default());

    let result = service.craft_email(&request()).await;

    assert_eq!(result.draft, "Hi Sam, second draft.");
    assert_eq!(result.iterations, 1);
    assert_eq!(result.scores.overall_quality_score, 8.5);

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 4);
    assert!(prompts[2].contains("Hi Sam, first draft."));
    assert!(prompts[2].contains("make the call to action more specific"));
    assert!(prompts[3].contains("Hi Sam, second draft."));
}

#[tokio::test]
async fn unparseable_first_evaluation_falls_back() {
    let llm = Arc::new(ConversationLlm::new(vec![
        Ok("Hi Sam, first draft.".to_string()),
        Ok("Looks great to me!".to_string()),
    ]));
    let service = service(llm, CrafterConfig::default());

    let result = service.craft_email(&request()).await;

    assert_eq!(result.draft, "Hi Sam, first draft.");
    assert_eq!(result.iterations, 0);
    assert_eq!(result.scores, fallback_scores());
    assert!(result.feedback.contains("Error during evaluation"));
}

#[tokio::test]
async fn grammar_failures_exhaust_the_budget() {
    let mut answers = vec![Ok("draft 0".to_string())];
    for round in 1..=2 {
        answers.push(Ok(evaluation_answer(9.0, "Fail")));
        answers.push(Ok(format!("draft {round}")));
    }
    answers.push(Ok(evaluation_answer(9.0, "Fail")));

    let llm = Arc::new(ConversationLlm::new(answers));
    let config = CrafterConfig {
        max_refinement_loops: 2,
        ..CrafterConfig::default()
    };
    let service = service(llm.clone(), config);

    let result = service.craft_email(&request()).await;

    assert_eq!(result.iterations, 2);
    assert_eq!(result.draft, "draft 2");
    assert!(!result.scores.categorical_checks_pass());
    assert_eq!(llm.prompts().len(), 6);
}

#[tokio::test]
async fn unreachable_model_produces_an_explanatory_draft() {
    let llm = Arc::new(ConversationLlm::new(vec![Err(LlmError::Transport(
        "dns error".to_string(),
    ))]));
    let service = service(llm, CrafterConfig::default());

    let result = service.craft_email(&request()).await;

    assert_eq!(result.draft, "Error generating email: llm transport error: dns error");
    assert_eq!(result.iterations, 0);
    assert_eq!(result.scores, fallback_scores());
}

#[tokio::test]
async fn http_route_serves_the_crafted_email() {
    let llm = Arc::new(ConversationLlm::new(vec![
        Ok("Hi Sam, first draft.".to_string()),
        Ok(evaluation_answer(9.0, "Pass")),
    ]));
    let router = crafter_router(Arc::new(service(llm, CrafterConfig::default())));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/email/craft")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&request()).expect("request serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload["draft"], "Hi Sam, first draft.");
    assert_eq!(payload["scores"]["constraintAdherence"], "Pass");
}
