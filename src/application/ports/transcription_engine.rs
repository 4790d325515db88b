use std::path::Path;

use async_trait::async_trait;

/// Opaque speech-to-text capability: a staged audio file in, recognized text out.
///
/// Implementations may take seconds to tens of seconds per call and offer no
/// cancellation; callers must treat the invocation as a long-latency black box.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    /// Carries the engine's own message; surfaced to the caller as-is.
    #[error("{0}")]
    InferenceFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
