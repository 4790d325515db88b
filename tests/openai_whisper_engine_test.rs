use std::path::PathBuf;

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::post;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use scribed::application::ports::{TranscriptionEngine, TranscriptionError};
use scribed::infrastructure::audio::OpenAiWhisperEngine;

async fn start_mock_whisper_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/audio/transcriptions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn write_staged_audio(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("recording-test.webm");
    std::fs::write(&path, b"fake audio bytes").unwrap();
    path
}

#[tokio::test]
async fn given_staged_audio_when_api_succeeds_then_returns_transcript_text() {
    let response_body = r#"{"text": "Hello from the mock Whisper API"}"#;
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, response_body).await;
    let uploads = TempDir::new().unwrap();
    let audio_path = write_staged_audio(&uploads);

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine.transcribe(&audio_path).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "Hello from the mock Whisper API");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_api_error_status_when_transcribing_then_returns_api_error() {
    let response_body = r#"{"error": {"message": "bad audio"}}"#;
    let (base_url, shutdown_tx) = start_mock_whisper_server(400, response_body).await;
    let uploads = TempDir::new().unwrap();
    let audio_path = write_staged_audio(&uploads);

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine.transcribe(&audio_path).await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_response_without_text_field_when_transcribing_then_returns_api_error() {
    let response_body = r#"{"segments": []}"#;
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, response_body).await;
    let uploads = TempDir::new().unwrap();
    let audio_path = write_staged_audio(&uploads);

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine.transcribe(&audio_path).await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_api_returns_empty_text_when_transcribing_then_returns_empty_string() {
    let response_body = r#"{"text": ""}"#;
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, response_body).await;
    let uploads = TempDir::new().unwrap();
    let audio_path = write_staged_audio(&uploads);

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine.transcribe(&audio_path).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_staged_file_when_transcribing_then_returns_inference_error() {
    let engine = OpenAiWhisperEngine::new(
        "test-key".to_string(),
        Some("http://127.0.0.1:1".to_string()),
        None,
    );

    let result = engine
        .transcribe(std::path::Path::new("/nonexistent/recording.webm"))
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::InferenceFailed(_))
    ));
}
