//! Application configuration.
//!
//! Provides paths for generated output and bundled tracks, plus
//! backend selection for the music model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AuralisError, Result};
use crate::model::Backend;

/// The discrete durations (seconds) offered by the duration selector.
pub const ALLOWED_DURATIONS: [u32; 3] = [10, 20, 30];

/// Configuration for the Auralis application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where generated WAV files are written.
    pub generated_dir: PathBuf,

    /// Directory containing the bundled predefined tracks.
    pub tracks_dir: PathBuf,

    /// Which music model backend to use.
    pub backend: Backend,

    /// Base URL of the inference bridge (bridge backend only).
    pub bridge_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generated_dir: PathBuf::from("generated"),
            tracks_dir: PathBuf::from("tracks"),
            backend: Backend::default(),
            bridge_url: "http://localhost:8001".to_string(),
        }
    }
}

impl AppConfig {
    /// Creates a config with custom directories, keeping default backend settings.
    pub fn with_dirs(generated_dir: impl Into<PathBuf>, tracks_dir: impl Into<PathBuf>) -> Self {
        Self {
            generated_dir: generated_dir.into(),
            tracks_dir: tracks_dir.into(),
            ..Default::default()
        }
    }

    /// Returns the path of a bundled track file inside the tracks directory.
    pub fn track_path(&self, file_name: &str) -> PathBuf {
        self.tracks_dir.join(file_name)
    }

    /// Creates the generated-output directory if it does not exist yet.
    pub fn ensure_generated_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.generated_dir).map_err(|e| {
            AuralisError::audio_write_failed(
                format!("Failed to create output directory: {}", e),
                self.generated_dir.display().to_string(),
            )
        })?;
        Ok(&self.generated_dir)
    }

    /// Returns true if `duration` is one of the offered values.
    pub fn duration_allowed(duration: u32) -> bool {
        ALLOWED_DURATIONS.contains(&duration)
    }
}
