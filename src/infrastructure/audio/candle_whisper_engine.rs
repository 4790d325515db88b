use std::path::{Path, PathBuf};

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::audio_decoder::decode_audio;

const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";
const MAX_DECODE_TOKENS: usize = 224;

/// Local Whisper inference on CPU via candle.
///
/// Weights are pulled from the Hugging Face hub and loaded exactly once, at
/// construction; afterwards the engine is shared read-only across requests.
/// The decoder's KV cache is mutable, so inference runs under a lock and
/// requests to this engine are serialized.
pub struct CandleWhisperEngine {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

struct ModelAssets {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
    mel_filters: PathBuf,
}

impl CandleWhisperEngine {
    pub fn new(model_id: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing local Whisper transcription engine"
        );

        let assets = fetch_model_assets(model_id)?;

        let config_contents = std::fs::read_to_string(&assets.config)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&assets.tokenizer)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&assets.mel_filters)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[assets.weights], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Local Whisper engine loaded");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            mel_filters,
        })
    }

    fn window_to_mel(&self, window: &[f32]) -> Result<Tensor, TranscriptionError> {
        let samples = if window.len() < m::N_SAMPLES {
            let mut padded = window.to_vec();
            padded.resize(m::N_SAMPLES, 0.0);
            padded
        } else {
            window.to_vec()
        };

        let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel_data.len() / n_mel;

        Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
            .map_err(|e| TranscriptionError::InferenceFailed(format!("mel tensor: {}", e)))
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        let audio_data = tokio::fs::read(audio_path).await.map_err(|e| {
            TranscriptionError::InferenceFailed(format!("read staged audio: {}", e))
        })?;

        let pcm = decode_audio(&audio_data)?;

        // 30-second windows, zero-padded at the tail
        let mels = pcm
            .chunks(m::N_SAMPLES)
            .map(|window| self.window_to_mel(window))
            .collect::<Result<Vec<_>, _>>()?;

        let mut segments: Vec<String> = Vec::new();
        let mut model = self.model.lock().await;

        for (i, mel) in mels.iter().enumerate() {
            tracing::debug!(segment = i, "Transcribing audio segment");
            let text = greedy_decode(&mut model, &self.tokenizer, &self.device, mel)?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        let transcript = segments.join(" ");

        tracing::info!(
            segments = segments.len(),
            chars = transcript.len(),
            "Audio transcription completed"
        );

        Ok(transcript)
    }
}

fn fetch_model_assets(model_id: &str) -> Result<ModelAssets, TranscriptionError> {
    let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
    let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

    let config = repo
        .get("config.json")
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
    let tokenizer = repo
        .get("tokenizer.json")
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
    let weights = repo
        .get("model.safetensors")
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e)))?;

    let mel_repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));
    let mel_filters = mel_repo
        .get("melfilters.bytes")
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;

    Ok(ModelAssets {
        config,
        tokenizer,
        weights,
        mel_filters,
    })
}

fn greedy_decode(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    mel: &Tensor,
) -> Result<String, TranscriptionError> {
    let sot_token = token_id(tokenizer, m::SOT_TOKEN)?;
    let transcribe_token = token_id(tokenizer, m::TRANSCRIBE_TOKEN)?;
    let no_timestamps_token = token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?;
    let eot_token = token_id(tokenizer, m::EOT_TOKEN)?;

    let audio_features = model
        .encoder
        .forward(mel, true)
        .map_err(|e| TranscriptionError::InferenceFailed(format!("encoder: {}", e)))?;

    let mut tokens = vec![sot_token, transcribe_token, no_timestamps_token];
    let prompt_len = tokens.len();
    let mut decoded_text = String::new();

    for _ in 0..MAX_DECODE_TOKENS {
        let token_tensor = Tensor::new(tokens.as_slice(), device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| TranscriptionError::InferenceFailed(e.to_string()))?;

        let decoder_output = model
            .decoder
            .forward(&token_tensor, &audio_features, tokens.len() == prompt_len)
            .map_err(|e| TranscriptionError::InferenceFailed(format!("decoder: {}", e)))?;

        let logits = decoder_output
            .squeeze(0)
            .and_then(|t| model.decoder.final_linear(&t))
            .map_err(|e| TranscriptionError::InferenceFailed(format!("linear: {}", e)))?;

        let next_token = logits
            .dim(0)
            .and_then(|seq_len| logits.get(seq_len - 1))
            .and_then(|last| last.argmax(0))
            .and_then(|t| t.to_scalar::<u32>())
            .map_err(|e| TranscriptionError::InferenceFailed(e.to_string()))?;

        if next_token == eot_token {
            break;
        }

        tokens.push(next_token);

        if let Some(piece) = tokenizer.id_to_token(next_token) {
            decoded_text.push_str(&piece.replace('Ġ', " ").replace('▁', " "));
        }
    }

    model.reset_kv_cache();

    Ok(decoded_text.trim().to_string())
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer
        .token_to_id(token)
        .ok_or_else(|| TranscriptionError::InferenceFailed(format!("token not found: {}", token)))
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
