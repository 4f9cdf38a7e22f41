//! The music model contract.
//!
//! The pretrained model is an external collaborator: it is configured with
//! a target duration, then asked to synthesize one waveform per prompt.
//! Everything behind this trait (tokenization, decoding, weights) is opaque
//! to the rest of the crate.

use crate::error::Result;

/// A mono waveform returned by the model.
#[derive(Debug, Clone)]
pub struct Waveform {
    /// PCM samples in [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz, fixed by the model.
    pub sample_rate: u32,
}

impl Waveform {
    /// Creates a waveform from raw samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Duration of the waveform in seconds.
    pub fn duration_sec(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Returns true if the waveform holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Interface every music model backend implements.
///
/// The underlying model API is stateful: duration is set on the handle
/// before generation and applies to the next `generate` call. Callers must
/// not interleave `set_duration` and `generate` from concurrent requests;
/// [`crate::model::ModelHandle`] wraps implementations in a lock and keeps
/// the pair atomic.
pub trait MusicModel: Send {
    /// Output sample rate in Hz, fixed per model.
    fn sample_rate(&self) -> u32;

    /// Sets the target duration for subsequent generation calls.
    fn set_duration(&mut self, duration_sec: u32) -> Result<()>;

    /// Synthesizes one waveform per prompt, blocking until complete.
    fn generate(&mut self, prompts: &[String]) -> Result<Vec<Waveform>>;

    /// Model identifier for logs and artifact metadata.
    fn version(&self) -> &str;
}
