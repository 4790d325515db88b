use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

use super::ErrorResponse;

const INDEX_PAGE: &str = "static/index.html";

pub async fn index_handler() -> impl IntoResponse {
    match tokio::fs::read_to_string(INDEX_PAGE).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read index page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Index page unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}
