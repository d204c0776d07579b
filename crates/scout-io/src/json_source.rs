//! Raw speaker JSON: reading a saved listing and writing a fresh one

use crate::error::SourceError;
use crate::SpeakerSource;
use async_trait::async_trait;
use scout_domain::SpeakerRecord;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads speakers from a JSON array of `{name, title, company}` objects
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File being read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SpeakerSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<SpeakerRecord>, SourceError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        let speakers: Vec<SpeakerRecord> = serde_json::from_str(&json)?;
        info!(path = %self.path.display(), speakers = speakers.len(), "Loaded speakers");
        Ok(speakers)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write speakers as pretty-printed JSON, creating the parent directory
pub fn save_raw_speakers(path: impl AsRef<Path>, speakers: &[SpeakerRecord]) -> Result<(), SourceError> {
    let path = path.as_ref();
    let io_error = |source| SourceError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(speakers)?;
    std::fs::write(path, json).map_err(io_error)?;

    info!(path = %path.display(), speakers = speakers.len(), "Saved raw speakers");
    Ok(())
}
