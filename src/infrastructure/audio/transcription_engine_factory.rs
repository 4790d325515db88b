use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{TranscriptionProvider, TranscriptionSettings};

use super::candle_whisper_engine::CandleWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &TranscriptionSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match settings.provider {
            TranscriptionProvider::Local => {
                let engine = CandleWhisperEngine::new(&settings.model)?;
                Ok(Arc::new(engine))
            }
            TranscriptionProvider::OpenAi => {
                let key = settings.api_key.clone().ok_or_else(|| {
                    TranscriptionError::ModelLoadFailed(
                        "OPENAI_API_KEY required for the openai transcription provider".to_string(),
                    )
                })?;
                let engine = OpenAiWhisperEngine::new(
                    key,
                    settings.base_url.clone(),
                    Some(settings.model.clone()),
                );
                Ok(Arc::new(engine))
            }
        }
    }
}
