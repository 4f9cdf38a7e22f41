//! Music model backends.
//!
//! This module contains:
//! - [`provider`]: the [`MusicModel`] trait and [`Waveform`] type
//! - [`bridge`]: HTTP bridge to an external MusicGen inference server
//! - [`mock`]: deterministic offline model for tests and local runs
//!
//! [`ModelHandle`] is the process-wide shared handle: it is created once
//! at startup, reused across all requests, and serializes the stateful
//! configure-then-generate sequence behind a lock.

pub mod bridge;
pub mod mock;
pub mod provider;

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AppConfig;
use crate::error::{AuralisError, Result};

pub use bridge::BridgeModel;
pub use mock::{FailingModel, MockModel, MockStats, MOCK_SAMPLE_RATE};
pub use provider::{MusicModel, Waveform};

/// Available music model backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Offline deterministic synth; no external dependencies.
    #[default]
    Mock,
    /// Remote MusicGen inference server over HTTP.
    Bridge,
}

impl Backend {
    /// Returns the string representation of the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Mock => "mock",
            Backend::Bridge => "bridge",
        }
    }

    /// Parses a backend from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mock" => Some(Backend::Mock),
            "bridge" | "musicgen" => Some(Backend::Bridge),
            _ => None,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Process-wide shared model handle.
///
/// The underlying model API is stateful (duration is configured on the
/// handle, then generation reads it), so two concurrent requests could
/// otherwise overwrite each other's duration between the two steps. The
/// handle takes its lock once around the whole sequence, making
/// configure-then-generate atomic per request.
pub struct ModelHandle {
    inner: Mutex<Box<dyn MusicModel>>,
    sample_rate: u32,
    version: String,
}

impl ModelHandle {
    /// Wraps a model in a shared handle.
    pub fn new(model: Box<dyn MusicModel>) -> Self {
        let sample_rate = model.sample_rate();
        let version = model.version().to_string();
        Self {
            inner: Mutex::new(model),
            sample_rate,
            version,
        }
    }

    /// Output sample rate of the wrapped model.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Version string of the wrapped model.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Synthesizes one waveform per prompt at the given duration.
    ///
    /// Holds the model lock across both the duration update and the
    /// generation call.
    pub fn generate_batch(&self, prompts: &[String], duration_sec: u32) -> Result<Vec<Waveform>> {
        let mut model = self.inner.lock().map_err(|_| {
            AuralisError::generation_failed("Model handle poisoned by an earlier panic")
        })?;
        model.set_duration(duration_sec)?;
        model.generate(prompts)
    }

    /// Synthesizes a single clip from one prompt.
    pub fn generate_clip(&self, prompt: &str, duration_sec: u32) -> Result<Waveform> {
        let mut batch = self.generate_batch(&[prompt.to_string()], duration_sec)?;
        batch.pop().ok_or_else(|| {
            AuralisError::generation_failed("Model returned an empty waveform batch")
        })
    }
}

/// Constructs the configured backend and wraps it in a [`ModelHandle`].
///
/// Called once at startup; the returned handle is reused for the process
/// lifetime, so model setup cost is paid a single time.
pub fn load_model(config: &AppConfig) -> Result<ModelHandle> {
    let model: Box<dyn MusicModel> = match config.backend {
        Backend::Mock => Box::new(MockModel::new()),
        Backend::Bridge => Box::new(BridgeModel::connect(&config.bridge_url)?),
    };
    info!(
        backend = %config.backend,
        version = model.version(),
        sample_rate = model.sample_rate(),
        "model backend loaded"
    );
    Ok(ModelHandle::new(model))
}
