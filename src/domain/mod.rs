mod recording;
mod staging_path;

pub use recording::{Recording, RecordingId};
pub use staging_path::StagingPath;
