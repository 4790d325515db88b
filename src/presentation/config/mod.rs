mod settings;

pub use settings::{
    LoggingSettings, ServerSettings, Settings, TranscriptionProvider, TranscriptionSettings,
    UploadSettings,
};
