//! Loudness-normalized WAV output.
//!
//! Mirrors the audio writer contract used by the generation pipeline:
//! take a path stem, normalize the waveform, and encode mono 16-bit PCM
//! at the model's sample rate.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::debug;

use crate::error::{AuralisError, Result};
use crate::model::Waveform;

/// RMS target for the loudness strategy, roughly -14 dBFS.
const TARGET_RMS: f32 = 0.2;

/// Peak ceiling after normalization; leaves headroom below full scale.
const PEAK_CEILING: f32 = 0.99;

/// Number of output channels (generated audio is mono).
pub const CHANNELS: u16 = 1;

/// Writes a waveform to `<stem>.wav`, loudness-normalized.
///
/// `stem` is the output path without extension. Returns the final path of
/// the written file.
pub fn write_wav(stem: &Path, waveform: &Waveform) -> Result<PathBuf> {
    let path = stem.with_extension("wav");

    if waveform.is_empty() {
        return Err(AuralisError::audio_write_failed(
            "Refusing to write an empty waveform",
            path.display().to_string(),
        ));
    }

    let samples = normalize_loudness(&waveform.samples);

    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(&path, spec).map_err(|e| {
        AuralisError::audio_write_failed(
            format!("Failed to create WAV file: {}", e),
            path.display().to_string(),
        )
    })?;

    for sample in &samples {
        let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(quantized).map_err(|e| {
            AuralisError::audio_write_failed(
                format!("Failed to write sample: {}", e),
                path.display().to_string(),
            )
        })?;
    }

    writer.finalize().map_err(|e| {
        AuralisError::audio_write_failed(
            format!("Failed to finalize WAV file: {}", e),
            path.display().to_string(),
        )
    })?;

    debug!(
        path = %path.display(),
        samples = samples.len(),
        sample_rate = waveform.sample_rate,
        "wrote wav file"
    );

    Ok(path)
}

/// Scales samples toward [`TARGET_RMS`], then caps peaks at [`PEAK_CEILING`].
///
/// Silent input is returned unchanged rather than amplified into noise.
fn normalize_loudness(samples: &[f32]) -> Vec<f32> {
    let rms = (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt();
    if rms <= f32::EPSILON {
        return samples.to_vec();
    }

    let gain = TARGET_RMS / rms;
    let peak = samples
        .iter()
        .fold(0.0f32, |max, s| max.max(s.abs()))
        * gain;

    // Back the gain off if normalization would push peaks past the ceiling.
    let gain = if peak > PEAK_CEILING {
        gain * PEAK_CEILING / peak
    } else {
        gain
    };

    samples.iter().map(|s| s * gain).collect()
}

/// Converts a sample count to a duration in seconds.
pub fn samples_to_duration(sample_count: usize, sample_rate: u32) -> f32 {
    if sample_rate == 0 {
        return 0.0;
    }
    sample_count as f32 / sample_rate as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MOCK_SAMPLE_RATE;

    fn sine(duration_sec: u32, amplitude: f32) -> Waveform {
        let count = duration_sec as usize * MOCK_SAMPLE_RATE as usize;
        let samples = (0..count)
            .map(|i| {
                let t = i as f32 / MOCK_SAMPLE_RATE as f32;
                amplitude * (std::f32::consts::TAU * 440.0 * t).sin()
            })
            .collect();
        Waveform::new(samples, MOCK_SAMPLE_RATE)
    }

    #[test]
    fn write_wav_appends_extension_and_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let stem = tmp.path().join("clip");
        let path = write_wav(&stem, &sine(1, 0.5)).unwrap();
        assert_eq!(path.extension().unwrap(), "wav");
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 44); // more than just a header
    }

    #[test]
    fn written_wav_preserves_sample_rate_and_length() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_wav(&tmp.path().join("clip"), &sine(2, 0.5)).unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, MOCK_SAMPLE_RATE);
        assert_eq!(spec.channels, CHANNELS);
        assert_eq!(reader.len() as usize, 2 * MOCK_SAMPLE_RATE as usize);
    }

    #[test]
    fn empty_waveform_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = write_wav(
            &tmp.path().join("clip"),
            &Waveform::new(vec![], MOCK_SAMPLE_RATE),
        )
        .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::AudioWriteFailed);
    }

    #[test]
    fn quiet_input_is_boosted_toward_target() {
        let quiet = vec![0.01f32; 1000];
        let normalized = normalize_loudness(&quiet);
        let rms =
            (normalized.iter().map(|s| s * s).sum::<f32>() / normalized.len() as f32).sqrt();
        assert!((rms - TARGET_RMS).abs() < 0.01);
    }

    #[test]
    fn peaks_stay_under_ceiling() {
        let spiky: Vec<f32> = (0..1000)
            .map(|i| if i == 500 { 1.0 } else { 0.001 })
            .collect();
        let normalized = normalize_loudness(&spiky);
        let peak = normalized.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak <= PEAK_CEILING + 1e-6);
    }

    #[test]
    fn silence_passes_through() {
        let silence = vec![0.0f32; 100];
        assert_eq!(normalize_loudness(&silence), silence);
    }

    #[test]
    fn samples_to_duration_conversion() {
        assert_eq!(samples_to_duration(32_000, 32_000), 1.0);
        assert_eq!(samples_to_duration(0, 32_000), 0.0);
        assert_eq!(samples_to_duration(100, 0), 0.0);
    }
}
