use metrics_exporter_prometheus::PrometheusHandle;
use outreach_ai::config::{AppConfig, LlmConfig};
use outreach_ai::error::AppError;
use outreach_ai::llm::ChatCompletionsClient;
use outreach_ai::workflows::outreach::{
    CrafterConfig, EmailCrafterService, LlmDraftEvaluator, LlmDraftGenerator,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

pub(crate) type LiveCrafter = EmailCrafterService<
    LlmDraftGenerator<ChatCompletionsClient>,
    LlmDraftEvaluator<ChatCompletionsClient>,
>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wires the chat completion client into both collaborators of the crafting loop.
pub(crate) fn build_crafter(
    llm: &LlmConfig,
    crafter: CrafterConfig,
) -> Result<LiveCrafter, AppError> {
    let client = Arc::new(ChatCompletionsClient::new(llm)?);
    info!(
        model = client.model(),
        threshold = crafter.quality_threshold,
        max_refinements = crafter.max_refinement_loops,
        "email crafter configured"
    );

    Ok(EmailCrafterService::new(
        Arc::new(LlmDraftGenerator::new(client.clone())),
        Arc::new(LlmDraftEvaluator::new(client)),
        crafter,
    ))
}

pub(crate) fn crafter_from_config(config: &AppConfig) -> Result<LiveCrafter, AppError> {
    build_crafter(&config.llm, config.crafter.clone())
}
