use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    StagingStore, StagingStoreError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{Recording, StagingPath};

/// Runs one upload through the stage -> transcribe -> cleanup lifecycle.
///
/// The staged file is removed on every exit path, including failures, so the
/// uploads area never accumulates finished requests.
pub struct TranscriptionService {
    engine: Arc<dyn TranscriptionEngine>,
    staging: Arc<dyn StagingStore>,
}

impl TranscriptionService {
    pub fn new(engine: Arc<dyn TranscriptionEngine>, staging: Arc<dyn StagingStore>) -> Self {
        Self { engine, staging }
    }

    #[tracing::instrument(skip(self, data), fields(recording_id = %recording.id))]
    pub async fn transcribe(
        &self,
        recording: &Recording,
        data: Bytes,
    ) -> Result<String, TranscribeJobError> {
        let staging_path = StagingPath::for_recording(recording);

        let audio_path = match self.staging.store(&staging_path, data).await {
            Ok(path) => path,
            Err(e) => {
                // a failed write can still leave a partial file behind
                self.release(&staging_path).await;
                return Err(e.into());
            }
        };

        tracing::debug!(path = %staging_path, "Recording staged for transcription");

        let result = self.engine.transcribe(&audio_path).await;

        self.release(&staging_path).await;

        let text = result?;
        tracing::info!(chars = text.len(), "Transcription completed");
        Ok(text)
    }

    async fn release(&self, path: &StagingPath) {
        if let Err(e) = self.staging.delete(path).await {
            tracing::warn!(error = %e, path = %path, "Failed to remove staged recording");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeJobError {
    #[error(transparent)]
    Staging(#[from] StagingStoreError),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
}
