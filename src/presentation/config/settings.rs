use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub uploads: UploadSettings,
    pub transcription: TranscriptionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub dir: String,
    pub max_file_size_mb: usize,
}

impl UploadSettings {
    pub fn max_bytes(&self) -> u64 {
        self.max_file_size_mb as u64 * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

impl TryFrom<String> for TranscriptionProvider {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!(
                "Invalid transcription provider: {}. Expected: local or openai",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

impl Settings {
    /// Reads settings from the environment, falling back to defaults suitable
    /// for a local run.
    pub fn from_env() -> Result<Self, String> {
        let provider = match std::env::var("TRANSCRIPTION_PROVIDER") {
            Ok(v) => TranscriptionProvider::try_from(v)?,
            Err(_) => TranscriptionProvider::Local,
        };

        let model = std::env::var("WHISPER_MODEL").unwrap_or_else(|_| {
            match provider {
                TranscriptionProvider::Local => "openai/whisper-base",
                TranscriptionProvider::OpenAi => "whisper-1",
            }
            .to_string()
        });

        Ok(Self {
            server: ServerSettings {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
            },
            uploads: UploadSettings {
                dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
                max_file_size_mb: std::env::var("MAX_UPLOAD_MB")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            },
            transcription: TranscriptionSettings {
                provider,
                model,
                api_key: std::env::var("OPENAI_API_KEY").ok(),
                base_url: std::env::var("OPENAI_BASE_URL").ok(),
            },
            logging: LoggingSettings {
                level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                json_format: std::env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
            },
        })
    }
}
