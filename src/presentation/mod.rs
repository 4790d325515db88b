pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{
    LoggingSettings, ServerSettings, Settings, TranscriptionProvider, TranscriptionSettings,
    UploadSettings,
};
pub use router::create_router;
pub use state::AppState;
