use std::fmt;
use std::path::Path;

use super::recording::Recording;

const DEFAULT_EXTENSION: &str = "webm";

/// Relative location of a staged recording inside the uploads area.
///
/// Derived from the recording id, never from the client filename alone, so two
/// in-flight requests can never collide on the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingPath(String);

impl StagingPath {
    pub fn for_recording(recording: &Recording) -> Self {
        let ext = Path::new(&recording.filename)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| is_safe_extension(e))
            .unwrap_or(DEFAULT_EXTENSION);
        Self(format!("recording-{}.{}", recording.id.as_uuid(), ext))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_safe_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

impl fmt::Display for StagingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
