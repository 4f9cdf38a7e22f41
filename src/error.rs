//! Error types for Auralis.
//!
//! Provides a single error type covering validation, model loading,
//! generation, audio encoding, and track resolution.

use std::fmt;

/// Error categories for all fallible operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Prompt is empty or whitespace-only.
    InvalidPrompt,
    /// Duration is not one of the offered values.
    InvalidDuration,
    /// Model backend could not be constructed.
    ModelLoadFailed,
    /// Synthesis call failed (bridge error, OOM, bad response).
    GenerationFailed,
    /// Generated waveform could not be encoded to disk.
    AudioWriteFailed,
    /// Predefined track file missing on disk.
    TrackNotFound,
}

impl ErrorCode {
    /// Returns the string code for log fields and user-facing messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidPrompt => "INVALID_PROMPT",
            ErrorCode::InvalidDuration => "INVALID_DURATION",
            ErrorCode::ModelLoadFailed => "MODEL_LOAD_FAILED",
            ErrorCode::GenerationFailed => "GENERATION_FAILED",
            ErrorCode::AudioWriteFailed => "AUDIO_WRITE_FAILED",
            ErrorCode::TrackNotFound => "TRACK_NOT_FOUND",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for Auralis operations.
#[derive(Debug)]
pub struct AuralisError {
    /// The error code category.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional context (file path, track name, etc.).
    pub context: Option<String>,
}

impl AuralisError {
    /// Creates a new AuralisError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Creates a new AuralisError with additional context.
    pub fn with_context(
        code: ErrorCode,
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Prompt was empty or whitespace-only.
    pub fn invalid_prompt() -> Self {
        Self::new(
            ErrorCode::InvalidPrompt,
            "Please enter a prompt to generate music.",
        )
    }

    /// Duration outside the offered discrete set.
    pub fn invalid_duration(duration: u32, allowed: &[u32]) -> Self {
        Self::with_context(
            ErrorCode::InvalidDuration,
            format!("Duration must be one of {:?} seconds, got {}", allowed, duration),
            duration.to_string(),
        )
    }

    /// Model backend failed to construct.
    pub fn model_load_failed(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelLoadFailed, reason)
    }

    /// Synthesis call failed.
    pub fn generation_failed(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::GenerationFailed, reason)
    }

    /// WAV encoding failed.
    pub fn audio_write_failed(reason: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_context(ErrorCode::AudioWriteFailed, reason, path)
    }

    /// Predefined track missing from disk.
    pub fn track_not_found(track_name: &str, path: impl Into<String>) -> Self {
        let path = path.into();
        Self::with_context(
            ErrorCode::TrackNotFound,
            format!("{} track not found at {}", track_name, path),
            path,
        )
    }
}

impl fmt::Display for AuralisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, " (context: {})", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for AuralisError {}

/// Result type alias using AuralisError.
pub type Result<T> = std::result::Result<T, AuralisError>;
