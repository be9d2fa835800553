use std::fmt;

use super::config::CrafterConfig;
use super::domain::{CraftResult, EvaluationResult, EvaluationScores};

/// Position of a crafting run in the draft/evaluate/refine loop.
#[derive(Debug, Clone, PartialEq)]
pub enum CraftState {
    Drafting,
    Evaluating {
        draft: String,
        iterations: u32,
        /// Most recent successful evaluation, if any.
        last_good: Option<EvaluationResult>,
    },
    Deciding {
        draft: String,
        iterations: u32,
        evaluation: EvaluationResult,
    },
    Refining {
        draft: String,
        iterations: u32,
        evaluation: EvaluationResult,
    },
    Done(CraftResult),
}

impl CraftState {
    pub fn label(&self) -> &'static str {
        match self {
            CraftState::Drafting => "drafting",
            CraftState::Evaluating { .. } => "evaluating",
            CraftState::Deciding { .. } => "deciding",
            CraftState::Refining { .. } => "refining",
            CraftState::Done(_) => "done",
        }
    }
}

/// Classified result of one collaborator call.
///
/// A failure is recoverable when the run already holds a successful evaluation it can fall back
/// to, and fatal when it does not.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<T> {
    Success(T),
    RecoverableFailure(String),
    FatalFailure(String),
}

impl<T> StepOutcome<T> {
    pub fn classify<E: fmt::Display>(result: Result<T, E>, has_prior_evaluation: bool) -> Self {
        match result {
            Ok(value) => StepOutcome::Success(value),
            Err(err) if has_prior_evaluation => StepOutcome::RecoverableFailure(err.to_string()),
            Err(err) => StepOutcome::FatalFailure(err.to_string()),
        }
    }
}

/// What to do after a fresh evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Quality gate satisfied.
    Accept,
    /// Refinement budget spent; return the latest draft as best effort.
    Exhausted,
    Refine,
}

/// Overall score at or above the threshold and both categorical checks passing.
pub fn passes_quality_gate(scores: &EvaluationScores, threshold: f64) -> bool {
    scores.overall_quality_score >= threshold && scores.categorical_checks_pass()
}

pub fn decide(scores: &EvaluationScores, iterations: u32, config: &CrafterConfig) -> Decision {
    if passes_quality_gate(scores, config.quality_threshold) {
        Decision::Accept
    } else if iterations >= config.max_refinement_loops {
        Decision::Exhausted
    } else {
        Decision::Refine
    }
}
