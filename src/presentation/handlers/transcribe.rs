use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::Recording;
use crate::presentation::handlers::{ErrorResponse, payload_too_large_response};
use crate::presentation::state::AppState;

const AUDIO_FIELD: &str = "audio";

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let (filename, data) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!("Transcribe request without an audio part");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "No file part".to_string(),
                    }),
                )
                    .into_response();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart body");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("").trim().to_string();
        if filename.is_empty() {
            tracing::warn!("Transcribe request with an unnamed audio part");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No selected file".to_string(),
                }),
            )
                .into_response();
        }

        match field.bytes().await {
            Ok(data) => break (filename, data),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read audio bytes");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read file: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    };

    // second size check, on actual bytes; the content-length check upstream
    // only sees what the client declared
    if data.len() as u64 > state.settings.uploads.max_bytes() {
        tracing::warn!(bytes = data.len(), "Upload rejected, over the size ceiling");
        return payload_too_large_response(state.settings.uploads.max_file_size_mb);
    }

    let recording = Recording::new(filename, data.len() as u64);

    tracing::debug!(
        recording_id = %recording.id,
        filename = %recording.filename,
        bytes = recording.size_bytes,
        "Audio upload received"
    );

    match state
        .transcription_service
        .transcribe(&recording, data)
        .await
    {
        Ok(text) => (StatusCode::OK, Json(TranscribeResponse { text })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, recording_id = %recording.id, "Transcription failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
