use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    gateway_handler, health_handler, method_not_allowed_handler,
};
use crate::presentation::state::AppState;

/// Room for the JSON envelope around the image: field names, the
/// transcription context and the user message.
const BODY_ENVELOPE_HEADROOM: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state
        .settings
        .limits
        .max_image_bytes
        .saturating_add(BODY_ENVELOPE_HEADROOM);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route(
            "/",
            post(gateway_handler).fallback(method_not_allowed_handler),
        )
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
