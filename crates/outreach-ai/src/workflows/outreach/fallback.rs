use super::domain::{EvaluationResult, EvaluationScores, Verdict};

const NEUTRAL_SCORE: u8 = 5;

/// Scores reported when no real evaluation exists for the returned draft.
pub fn fallback_scores() -> EvaluationScores {
    EvaluationScores {
        personalization: NEUTRAL_SCORE,
        relevance_to_role: NEUTRAL_SCORE,
        tone_alignment: NEUTRAL_SCORE,
        clarity_and_conciseness: NEUTRAL_SCORE,
        cta_strength: NEUTRAL_SCORE,
        grammar_and_professionalism: Verdict::Fail,
        constraint_adherence: Verdict::Fail,
        overall_quality_score: f64::from(NEUTRAL_SCORE),
    }
}

/// Neutral, clearly failing evaluation carrying `reason` as its feedback.
pub fn fallback_evaluation(reason: impl Into<String>) -> EvaluationResult {
    EvaluationResult {
        scores: fallback_scores(),
        feedback: reason.into(),
    }
}
