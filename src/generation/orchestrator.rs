//! Generation orchestrator.
//!
//! Validates a request, drives the shared model handle, and writes the
//! resulting waveform to a uniquely named file in the output directory.

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tracing::{info, warn};

use crate::audio::write_wav;
use crate::config::{AppConfig, ALLOWED_DURATIONS};
use crate::error::{AuralisError, Result};
use crate::model::ModelHandle;

/// A generated audio file and its request metadata.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Path of the written WAV file.
    pub path: PathBuf,
    /// Prompt the clip was generated from.
    pub prompt: String,
    /// Requested duration in seconds.
    pub duration_sec: u32,
    /// Sample rate of the written audio in Hz.
    pub sample_rate: u32,
    /// Wall-clock time the synthesis call took, in seconds.
    pub generation_time_sec: f32,
    /// When the artifact was created.
    pub created_at: SystemTime,
}

impl Artifact {
    /// Suggested file name for a download of this artifact.
    pub fn download_name(&self) -> &'static str {
        "auralis_output.wav"
    }
}

/// Checks a generation request before any model work happens.
///
/// A blank prompt or an off-menu duration is rejected here, so an invalid
/// request never reaches the model.
pub fn validate_request(prompt: &str, duration_sec: u32) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(AuralisError::invalid_prompt());
    }
    if !AppConfig::duration_allowed(duration_sec) {
        return Err(AuralisError::invalid_duration(
            duration_sec,
            &ALLOWED_DURATIONS,
        ));
    }
    Ok(())
}

/// Generates a clip from a prompt and writes it to the output directory.
///
/// Blocks until synthesis completes. The configure-then-generate sequence
/// runs atomically under the model handle's lock, so overlapping requests
/// cannot leak durations into each other.
pub fn generate(
    model: &ModelHandle,
    config: &AppConfig,
    prompt: &str,
    duration_sec: u32,
) -> Result<Artifact> {
    validate_request(prompt, duration_sec)?;
    config.ensure_generated_dir()?;

    info!(prompt, duration_sec, "starting generation");
    let started = Instant::now();

    let waveform = model.generate_clip(prompt, duration_sec)?;
    let generation_time_sec = started.elapsed().as_secs_f32();

    let stem = unique_output_stem(&config.generated_dir, unix_timestamp());
    let path = write_wav(&stem, &waveform)?;

    info!(
        path = %path.display(),
        generation_time_sec,
        clip_sec = waveform.duration_sec(),
        sample_rate = waveform.sample_rate,
        "generation complete"
    );

    Ok(Artifact {
        path,
        prompt: prompt.to_string(),
        duration_sec,
        sample_rate: waveform.sample_rate,
        generation_time_sec,
        created_at: SystemTime::now(),
    })
}

/// Picks an unused output stem for the given timestamp.
///
/// The base name is `generated_<unixtimestamp>`. Two requests finishing in
/// the same second would collide, so taken names get a numeric suffix:
/// `generated_<ts>_1`, `generated_<ts>_2`, and so on.
fn unique_output_stem(dir: &Path, timestamp: u64) -> PathBuf {
    let base = dir.join(format!("generated_{}", timestamp));
    if !base.with_extension("wav").exists() {
        return base;
    }
    for suffix in 1u32.. {
        let candidate = dir.join(format!("generated_{}_{}", timestamp, suffix));
        if !candidate.with_extension("wav").exists() {
            if suffix > 1 {
                warn!(timestamp, suffix, "output name collision, disambiguating");
            }
            return candidate;
        }
    }
    unreachable!("suffix search is unbounded")
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
