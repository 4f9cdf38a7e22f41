//! Auralis: a text-to-music companion.
//!
//! Generates short music clips from text prompts through an external
//! pretrained model backend, and plays back a small catalog of bundled
//! tracks. Synthesis itself happens behind the [`model::MusicModel`]
//! seam; this crate is the orchestration around it.
//!
//! # Modules
//!
//! - [`config`] - Application configuration (paths, backend selection)
//! - [`error`] - Error types and result alias
//! - [`model`] - Model backends and the shared, locked model handle
//! - [`audio`] - Loudness-normalized WAV output
//! - [`generation`] - Request validation, orchestration, progress
//! - [`tracks`] - Predefined track catalog and resolution
//! - [`ui`] - Session state machine for the presentation layer
//!
//! # Example
//!
//! ```rust
//! use auralis::config::AppConfig;
//! use auralis::generation::generate;
//! use auralis::model::load_model;
//!
//! let tmp = tempfile::tempdir().unwrap();
//! let config = AppConfig::with_dirs(tmp.path().join("generated"), tmp.path().join("tracks"));
//! let model = load_model(&config).unwrap();
//! let artifact = generate(&model, &config, "calm piano", 10).unwrap();
//! assert!(artifact.path.exists());
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod generation;
pub mod model;
pub mod tracks;
pub mod ui;

// Re-export commonly used types at crate root for convenience
pub use config::{AppConfig, ALLOWED_DURATIONS};
pub use error::{AuralisError, ErrorCode, Result};
pub use generation::{generate, validate_request, Artifact, ProgressTicker};
pub use model::{load_model, Backend, ModelHandle, MusicModel, Waveform};
pub use tracks::{PredefinedTrack, TrackPlayback, CATALOG};
