//! Outreach e-mail crafting: draft with a language model, score against the rubric, refine.
//!
//! [`EmailCrafterService`] owns the loop. The drafting and scoring collaborators sit behind
//! [`DraftGenerator`] and [`DraftEvaluator`] so the loop can be driven by scripted
//! implementations in tests.

pub mod config;
pub mod domain;
pub mod evaluator;
pub mod fallback;
pub mod generator;
pub mod router;
pub mod service;
pub mod state;

#[cfg(test)]
mod tests;

pub use config::CrafterConfig;
pub use domain::{
    BrandingGuidelines, CandidateProfile, CraftRequest, CraftResult, EmailContextPurpose,
    EvaluationResult, EvaluationScores, JobDescription, StructuralConstraints, Verdict,
};
pub use evaluator::{
    extract_structured_block, parse_evaluation, DraftEvaluator, EvaluationFailure,
    LlmDraftEvaluator,
};
pub use fallback::{fallback_evaluation, fallback_scores};
pub use generator::{DraftGenerator, GenerationFailure, LlmDraftGenerator};
pub use router::crafter_router;
pub use service::EmailCrafterService;
pub use state::{CraftState, Decision, StepOutcome};
