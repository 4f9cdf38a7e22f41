//! Predefined track catalog.
//!
//! Three bundled tracks ship with the application. Playing one resolves
//! its name to a fixed file under the tracks directory and verifies the
//! file exists before offering playback and download.

use std::path::PathBuf;

use tracing::debug;

use crate::config::AppConfig;
use crate::error::{AuralisError, Result};

/// A bundled track selectable without invoking generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredefinedTrack {
    /// Short name used in errors and download file names.
    pub name: &'static str,
    /// Label shown in the track selector.
    pub display_name: &'static str,
    /// File name under the tracks directory.
    pub file_name: &'static str,
}

/// A resolved, playable track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPlayback {
    /// Track short name.
    pub name: String,
    /// Path of the existing audio file.
    pub path: PathBuf,
    /// Suggested file name for a download, `<Name>.mp3`.
    pub download_name: String,
}

/// The fixed three-track catalog.
pub const CATALOG: [PredefinedTrack; 3] = [
    PredefinedTrack {
        name: "Matushka",
        display_name: "Matushka (Phonk Version)",
        file_name: "matushka.mp3",
    },
    PredefinedTrack {
        name: "Motherboard",
        display_name: "Motherboard (Drum Version)",
        file_name: "motherboard.mp3",
    },
    PredefinedTrack {
        name: "Veridis Quo",
        display_name: "Veridis Quo (Soft Version)",
        file_name: "veridis_quo.mp3",
    },
];

/// Finds a catalog entry whose name or label matches the selection.
///
/// Matching is case-insensitive and accepts any selector label that
/// contains the track's short name, so both "Matushka" and
/// "Matushka (Phonk Version)" resolve.
pub fn find(selection: &str) -> Option<&'static PredefinedTrack> {
    let needle = selection.to_lowercase();
    CATALOG
        .iter()
        .find(|t| needle.contains(&t.name.to_lowercase()) || t.name.to_lowercase() == needle)
}

/// Resolves a track to a playable file, checking existence first.
///
/// A missing file yields [`crate::error::ErrorCode::TrackNotFound`] naming
/// both the track and the path it was expected at. No fallback is
/// attempted.
pub fn resolve(track: &PredefinedTrack, config: &AppConfig) -> Result<TrackPlayback> {
    let path = config.track_path(track.file_name);
    debug!(track = track.name, path = %path.display(), "resolving predefined track");

    if !path.exists() {
        return Err(AuralisError::track_not_found(
            track.name,
            path.display().to_string(),
        ));
    }

    Ok(TrackPlayback {
        name: track.name.to_string(),
        path,
        download_name: format!("{}.mp3", track.name),
    })
}
