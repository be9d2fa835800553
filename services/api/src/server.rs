use crate::cli::ServeArgs;
use crate::infra::{crafter_from_config, AppState};
use crate::routes::with_crafter_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use outreach_ai::config::AppConfig;
use outreach_ai::error::AppError;
use outreach_ai::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let crafter = Arc::new(crafter_from_config(&config)?);

    let app = with_crafter_routes(crafter)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "sourcing email crafter ready");

    axum::serve(listener, app).await?;
    Ok(())
}
