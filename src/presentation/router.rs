use axum::Router;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, index_handler, not_found_handler, payload_too_large_response,
    transcribe_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // the precise ceiling lives in the content-length check and the handler's
    // byte count; this body limit is a backstop for unsized bodies
    let body_limit = DefaultBodyLimit::max(2 * state.settings.uploads.max_bytes() as usize);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/transcribe", post(transcribe_handler))
        .fallback(not_found_handler)
        .layer(body_limit)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            payload_ceiling_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

/// Rejects requests whose declared body size is over the upload ceiling before
/// any handler runs. The transcribe handler re-checks the actual byte count.
async fn payload_ceiling_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let declared = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if let Some(len) = declared {
        if len > state.settings.uploads.max_bytes() {
            tracing::warn!(declared_bytes = len, "Request rejected by size ceiling");
            return payload_too_large_response(state.settings.uploads.max_file_size_mb);
        }
    }

    next.run(request).await
}
