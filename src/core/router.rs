use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit, http::StatusCode, middleware::from_fn_with_state, routing::get,
    Json, Router,
};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::config::AppConfig;
use crate::core::middleware;
use crate::features::reference::ReferenceService;
use crate::features::{biodata, education, region};
use crate::modules::storage::ScratchStorage;
use crate::shared::constants::MSG_ROUTE_NOT_FOUND;
use crate::shared::types::{ApiResponse, Message};

/// Simple health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Fallback for any path no route claims.
async fn route_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::failed(Message::Text(
            MSG_ROUTE_NOT_FOUND.to_string(),
        ))),
    )
}

/// Every reference route plus health check and fallback. Transport layers
/// (CORS, tracing, request ids) are added by the caller.
pub fn api_router(service: Arc<ReferenceService>, scratch: Arc<ScratchStorage>) -> Router {
    Router::new()
        .merge(region::routes::routes(
            Arc::clone(&service),
            Arc::clone(&scratch),
        ))
        .merge(biodata::routes::routes(
            Arc::clone(&service),
            Arc::clone(&scratch),
        ))
        .merge(education::routes::routes(service, Arc::clone(&scratch)))
        .route("/health", get(health_check))
        .fallback(route_not_found)
        .layer(from_fn_with_state(scratch, middleware::scratch_cleanup))
}

/// Outer layers shared by every route. The request id is set first so the
/// trace span and the response both carry it.
pub fn with_transport_layers(router: Router, config: &AppConfig) -> Router {
    router
        .layer(DefaultBodyLimit::max(config.max_request_body_size))
        .layer(middleware::cors_layer(config.cors_allowed_origins.clone()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
