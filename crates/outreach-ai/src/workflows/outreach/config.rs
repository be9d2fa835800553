use std::time::Duration;

/// Loop controls, read once at startup and shared read-only by every run.
#[derive(Debug, Clone, PartialEq)]
pub struct CrafterConfig {
    /// Minimum overall score for the quality gate. Defaults to 8.0.
    pub quality_threshold: f64,
    /// Upper bound on refinement calls per run. Defaults to 3.
    pub max_refinement_loops: u32,
    /// Deadline for each generator or evaluator call. Defaults to 60 seconds.
    pub call_timeout: Duration,
}

impl Default for CrafterConfig {
    fn default() -> Self {
        Self {
            quality_threshold: 8.0,
            max_refinement_loops: 3,
            call_timeout: Duration::from_secs(60),
        }
    }
}
