mod health;
mod index;
mod not_found;
mod transcribe;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub use health::health_handler;
pub use index::index_handler;
pub use not_found::not_found_handler;
pub use transcribe::{TranscribeResponse, transcribe_handler};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn payload_too_large_response(max_mb: usize) -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(ErrorResponse {
            error: format!("File too large. Max size is {}MB.", max_mb),
        }),
    )
        .into_response()
}
