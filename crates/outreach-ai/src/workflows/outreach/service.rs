use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::config::CrafterConfig;
use super::domain::{CraftRequest, CraftResult, EvaluationResult};
use super::evaluator::{DraftEvaluator, EvaluationFailure};
use super::fallback::{fallback_evaluation, fallback_scores};
use super::generator::{DraftGenerator, GenerationFailure};
use super::state::{decide, CraftState, Decision, StepOutcome};

/// Service driving the draft, evaluate, and refine loop for one request at a time.
pub struct EmailCrafterService<G, E> {
    generator: Arc<G>,
    evaluator: Arc<E>,
    config: CrafterConfig,
}

impl<G, E> EmailCrafterService<G, E>
where
    G: DraftGenerator + 'static,
    E: DraftEvaluator + 'static,
{
    pub fn new(generator: Arc<G>, evaluator: Arc<E>, config: CrafterConfig) -> Self {
        Self {
            generator,
            evaluator,
            config,
        }
    }

    /// Craft an outreach e-mail. Every failure is folded into the returned draft.
    pub async fn craft_email(&self, request: &CraftRequest) -> CraftResult {
        info!(
            threshold = self.config.quality_threshold,
            max_refinements = self.config.max_refinement_loops,
            "starting email crafting"
        );

        let mut state = CraftState::Drafting;
        loop {
            debug!(state = state.label(), "crafting transition");
            state = match state {
                CraftState::Done(result) => {
                    info!(
                        iterations = result.iterations,
                        overall = result.scores.overall_quality_score,
                        "email crafting finished"
                    );
                    return result;
                }
                other => self.step(other, request).await,
            };
        }
    }

    async fn step(&self, state: CraftState, request: &CraftRequest) -> CraftState {
        match state {
            CraftState::Drafting => {
                let result = self.generate(self.generator.initial(request)).await;
                match StepOutcome::classify(result, false) {
                    StepOutcome::Success(draft) => {
                        info!("initial draft generated");
                        CraftState::Evaluating {
                            draft,
                            iterations: 0,
                            last_good: None,
                        }
                    }
                    StepOutcome::RecoverableFailure(reason) | StepOutcome::FatalFailure(reason) => {
                        warn!(%reason, "initial draft generation failed");
                        CraftState::Done(generation_failure_result(&reason))
                    }
                }
            }
            CraftState::Evaluating {
                draft,
                iterations,
                last_good,
            } => {
                let result = self.score(self.evaluator.evaluate(&draft, request)).await;
                match StepOutcome::classify(result, last_good.is_some()) {
                    StepOutcome::Success(evaluation) => {
                        info!(
                            iteration = iterations,
                            overall = evaluation.scores.overall_quality_score,
                            grammar = %evaluation.scores.grammar_and_professionalism,
                            constraints = %evaluation.scores.constraint_adherence,
                            "draft evaluated"
                        );
                        CraftState::Deciding {
                            draft,
                            iterations,
                            evaluation,
                        }
                    }
                    StepOutcome::RecoverableFailure(reason) => {
                        warn!(%reason, iteration = iterations, "evaluation failed, keeping last evaluation");
                        let evaluation = last_good.unwrap_or_else(|| fallback_evaluation(&reason));
                        CraftState::Done(finish(draft, evaluation, iterations))
                    }
                    StepOutcome::FatalFailure(reason) => {
                        warn!(%reason, "first evaluation failed, using fallback scores");
                        let evaluation =
                            fallback_evaluation(format!("Error during evaluation: {reason}"));
                        CraftState::Done(finish(draft, evaluation, iterations))
                    }
                }
            }
            CraftState::Deciding {
                draft,
                iterations,
                evaluation,
            } => match decide(&evaluation.scores, iterations, &self.config) {
                Decision::Accept => {
                    info!(iteration = iterations, "quality threshold met");
                    CraftState::Done(finish(draft, evaluation, iterations))
                }
                Decision::Exhausted => {
                    info!(
                        iteration = iterations,
                        "max refinement loops reached, returning best effort draft"
                    );
                    CraftState::Done(finish(draft, evaluation, iterations))
                }
                Decision::Refine => CraftState::Refining {
                    draft,
                    iterations,
                    evaluation,
                },
            },
            CraftState::Refining {
                draft,
                iterations,
                evaluation,
            } => {
                let result = self
                    .generate(self.generator.refine(&draft, &evaluation.feedback))
                    .await;
                match StepOutcome::classify(result, true) {
                    StepOutcome::Success(refined) => {
                        let iterations = iterations + 1;
                        info!(
                            iteration = iterations,
                            max = self.config.max_refinement_loops,
                            "draft refined"
                        );
                        CraftState::Evaluating {
                            draft: refined,
                            iterations,
                            last_good: Some(evaluation),
                        }
                    }
                    StepOutcome::RecoverableFailure(reason) | StepOutcome::FatalFailure(reason) => {
                        warn!(%reason, iteration = iterations, "refinement failed, keeping last evaluated draft");
                        CraftState::Done(finish(draft, evaluation, iterations))
                    }
                }
            }
            done @ CraftState::Done(_) => done,
        }
    }

    async fn generate<F>(&self, call: F) -> Result<String, GenerationFailure>
    where
        F: Future<Output = Result<String, GenerationFailure>>,
    {
        let limit = self.config.call_timeout;
        let draft = tokio::time::timeout(limit, call)
            .await
            .unwrap_or_else(|_| Err(GenerationFailure::TimedOut(limit)))?;
        if draft.trim().is_empty() {
            return Err(GenerationFailure::EmptyDraft);
        }
        Ok(draft)
    }

    async fn score<F>(&self, call: F) -> Result<EvaluationResult, EvaluationFailure>
    where
        F: Future<Output = Result<EvaluationResult, EvaluationFailure>>,
    {
        let limit = self.config.call_timeout;
        tokio::time::timeout(limit, call)
            .await
            .unwrap_or_else(|_| Err(EvaluationFailure::TimedOut(limit)))
    }
}

fn finish(draft: String, evaluation: EvaluationResult, iterations: u32) -> CraftResult {
    CraftResult {
        draft,
        scores: evaluation.scores,
        iterations,
        feedback: evaluation.feedback,
    }
}

fn generation_failure_result(reason: &str) -> CraftResult {
    CraftResult {
        draft: format!("Error generating email: {reason}"),
        scores: fallback_scores(),
        iterations: 0,
        feedback: format!("Error in email crafting process: {reason}"),
    }
}
