//! Offline mock model.
//!
//! Synthesizes a deterministic sine tone instead of calling a real
//! backend. Used by tests and by `--backend mock`, so the binary works
//! without an inference server.

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{AuralisError, Result};
use crate::model::provider::{MusicModel, Waveform};

/// Output sample rate of the mock, matching MusicGen-small.
pub const MOCK_SAMPLE_RATE: u32 = 32_000;

/// Counters shared with tests to observe how the model was driven.
#[derive(Debug, Default)]
pub struct MockStats {
    /// Number of completed generate calls.
    pub generate_calls: AtomicUsize,
    /// Duration that was configured for the most recent generate call.
    pub last_duration_sec: AtomicU32,
}

/// Deterministic stand-in for a pretrained music model.
///
/// The tone frequency is derived from the prompt text, so different
/// prompts produce audibly (and byte-wise) different output.
pub struct MockModel {
    duration_sec: u32,
    /// Artificial per-call latency, used by concurrency tests to force overlap.
    latency: Duration,
    stats: Arc<MockStats>,
}

impl MockModel {
    /// Creates a mock with no artificial latency.
    pub fn new() -> Self {
        Self {
            duration_sec: 0,
            latency: Duration::ZERO,
            stats: Arc::new(MockStats::default()),
        }
    }

    /// Creates a mock that sleeps inside `generate` to widen race windows.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::new()
        }
    }

    /// Returns the shared stats handle for assertions.
    pub fn stats(&self) -> Arc<MockStats> {
        Arc::clone(&self.stats)
    }

    fn tone_frequency(prompt: &str) -> f32 {
        // Map the prompt to a stable frequency in the 220-660 Hz band.
        let hash: u32 = prompt
            .bytes()
            .fold(2166136261u32, |h, b| (h ^ b as u32).wrapping_mul(16777619));
        220.0 + (hash % 440) as f32
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicModel for MockModel {
    fn sample_rate(&self) -> u32 {
        MOCK_SAMPLE_RATE
    }

    fn set_duration(&mut self, duration_sec: u32) -> Result<()> {
        self.duration_sec = duration_sec;
        Ok(())
    }

    fn generate(&mut self, prompts: &[String]) -> Result<Vec<Waveform>> {
        if self.duration_sec == 0 {
            return Err(AuralisError::generation_failed(
                "Generation requested before a duration was configured",
            ));
        }
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let sample_count = self.duration_sec as usize * MOCK_SAMPLE_RATE as usize;
        let waveforms = prompts
            .iter()
            .map(|prompt| {
                let freq = Self::tone_frequency(prompt);
                let samples = (0..sample_count)
                    .map(|i| {
                        let t = i as f32 / MOCK_SAMPLE_RATE as f32;
                        0.5 * (TAU * freq * t).sin()
                    })
                    .collect();
                Waveform::new(samples, MOCK_SAMPLE_RATE)
            })
            .collect();

        self.stats
            .last_duration_sec
            .store(self.duration_sec, Ordering::SeqCst);
        self.stats.generate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(waveforms)
    }

    fn version(&self) -> &str {
        "mock-sine-v1"
    }
}

/// Model that fails every generate call, for error-path tests.
pub struct FailingModel;

impl MusicModel for FailingModel {
    fn sample_rate(&self) -> u32 {
        MOCK_SAMPLE_RATE
    }

    fn set_duration(&mut self, _duration_sec: u32) -> Result<()> {
        Ok(())
    }

    fn generate(&mut self, _prompts: &[String]) -> Result<Vec<Waveform>> {
        Err(AuralisError::generation_failed(
            "Synthesis failed (simulated backend error)",
        ))
    }

    fn version(&self) -> &str {
        "failing-v1"
    }
}
