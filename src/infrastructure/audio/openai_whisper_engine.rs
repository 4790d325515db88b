use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

/// Remote transcription against a Whisper-compatible `/audio/transcriptions`
/// endpoint.
pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        let audio_data = tokio::fs::read(audio_path).await.map_err(|e| {
            TranscriptionError::InferenceFailed(format!("read staged audio: {}", e))
        })?;

        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recording.webm".to_string());

        let file_part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str(mime_for(audio_path))
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .part("file", file_part);

        let url = format!("{}/audio/transcriptions", self.base_url);

        tracing::debug!(model = %self.model, "Sending audio to the Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

        let transcript = payload
            .get("text")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                TranscriptionError::ApiRequestFailed("no text field in response".to_string())
            })?;

        tracing::info!(chars = transcript.len(), "Whisper API transcription completed");

        Ok(transcript.trim().to_string())
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("wav") => "audio/wav",
        Some("webm") => "audio/webm",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}
