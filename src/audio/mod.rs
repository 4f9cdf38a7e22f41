//! Audio output module.
//!
//! Provides loudness-normalized WAV file writing for generated audio.

pub mod wav;

// Re-export commonly used items
pub use wav::{samples_to_duration, write_wav, CHANNELS};
