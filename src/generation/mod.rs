//! Music generation module.
//!
//! Orchestrates validation, model invocation, and artifact output.

pub mod orchestrator;
pub mod progress;

// Re-export commonly used items
pub use orchestrator::{generate, validate_request, Artifact};
pub use progress::ProgressTicker;
