use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use super::domain::CraftRequest;
use super::evaluator::DraftEvaluator;
use super::generator::DraftGenerator;
use super::service::EmailCrafterService;

/// Router builder exposing the crafting endpoint.
pub fn crafter_router<G, E>(service: Arc<EmailCrafterService<G, E>>) -> Router
where
    G: DraftGenerator + 'static,
    E: DraftEvaluator + 'static,
{
    Router::new()
        .route("/api/v1/email/craft", post(craft_handler::<G, E>))
        .with_state(service)
}

pub(crate) async fn craft_handler<G, E>(
    State(service): State<Arc<EmailCrafterService<G, E>>>,
    axum::Json(request): axum::Json<CraftRequest>,
) -> Response
where
    G: DraftGenerator + 'static,
    E: DraftEvaluator + 'static,
{
    let result = service.craft_email(&request).await;
    (StatusCode::OK, axum::Json(result)).into_response()
}
