//! Presentation-layer session state.
//!
//! Models the single-page flow as an explicit state machine:
//! Idle -> (mode selected) -> AwaitingInput -> (submit) -> Processing ->
//! (Result | Error) -> back to input. The front-end in `main.rs` renders
//! this state; keeping it pure makes the transition rules testable
//! without a terminal.

use crate::generation::Artifact;
use crate::tracks::TrackPlayback;

/// The two mutually exclusive interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Free-text prompt plus duration selector.
    GenerateMusic,
    /// Fixed-choice selector over the bundled tracks.
    PlayPredefinedTrack,
}

impl Mode {
    /// Label shown in the mode selector.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::GenerateMusic => "Generate Music",
            Mode::PlayPredefinedTrack => "Play Predefined Track",
        }
    }
}

/// A successful submission result.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A freshly generated clip.
    Generated(Artifact),
    /// A resolved bundled track.
    Track(TrackPlayback),
}

/// Current screen of the session.
#[derive(Debug, Clone)]
pub enum Screen {
    /// No mode selected yet.
    Idle,
    /// Mode selected, waiting for the user to fill in and submit.
    AwaitingInput(Mode),
    /// A submission is being processed.
    Processing(Mode),
    /// Last submission succeeded.
    Result(Mode, Outcome),
    /// Last submission failed.
    Error(Mode, String),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Idle
    }
}

/// One user session of the single-page UI.
///
/// Sessions do not persist; every new session starts at Idle.
#[derive(Debug, Default)]
pub struct Session {
    screen: Screen,
    warning: Option<String>,
}

impl Session {
    /// Creates a session in the Idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Non-fatal warning to render alongside the current screen, if any.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Currently selected mode, if any.
    pub fn mode(&self) -> Option<Mode> {
        match self.screen() {
            Screen::Idle => None,
            Screen::AwaitingInput(mode)
            | Screen::Processing(mode)
            | Screen::Result(mode, _)
            | Screen::Error(mode, _) => Some(*mode),
        }
    }

    /// Selects a mode, clearing any prior result, error, or warning.
    ///
    /// Switching modes never carries state across: a result rendered in
    /// one mode disappears when the other is selected.
    pub fn select_mode(&mut self, mode: Mode) {
        self.warning = None;
        self.screen = Screen::AwaitingInput(mode);
    }

    /// Records a non-fatal validation warning without leaving the input screen.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warning = Some(message.into());
    }

    /// Marks the current submission as in flight.
    pub fn begin_processing(&mut self) {
        self.warning = None;
        if let Some(mode) = self.mode() {
            self.screen = Screen::Processing(mode);
        }
    }

    /// Records a successful outcome for the current mode.
    pub fn finish(&mut self, outcome: Outcome) {
        if let Some(mode) = self.mode() {
            self.screen = Screen::Result(mode, outcome);
        }
    }

    /// Records a failure for the current mode and leaves the session usable.
    pub fn fail(&mut self, message: impl Into<String>) {
        if let Some(mode) = self.mode() {
            self.screen = Screen::Error(mode, message.into());
        }
    }

    /// Returns to the Idle state, dropping all result and warning state.
    pub fn reset(&mut self) {
        self.warning = None;
        self.screen = Screen::Idle;
    }

    /// The outcome on screen, if the session is showing a result.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self.screen() {
            Screen::Result(_, outcome) => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_playback() -> TrackPlayback {
        TrackPlayback {
            name: "Matushka".to_string(),
            path: PathBuf::from("tracks/matushka.mp3"),
            download_name: "Matushka.mp3".to_string(),
        }
    }

    #[test]
    fn session_starts_idle() {
        let session = Session::new();
        assert!(matches!(session.screen(), Screen::Idle));
        assert!(session.mode().is_none());
        assert!(session.warning().is_none());
    }

    #[test]
    fn submit_flow_reaches_result() {
        let mut session = Session::new();
        session.select_mode(Mode::PlayPredefinedTrack);
        assert!(matches!(
            session.screen(),
            Screen::AwaitingInput(Mode::PlayPredefinedTrack)
        ));

        session.begin_processing();
        assert!(matches!(session.screen(), Screen::Processing(_)));

        session.finish(Outcome::Track(sample_playback()));
        assert!(session.outcome().is_some());
    }

    #[test]
    fn switching_modes_clears_prior_result() {
        let mut session = Session::new();
        session.select_mode(Mode::PlayPredefinedTrack);
        session.begin_processing();
        session.finish(Outcome::Track(sample_playback()));
        assert!(session.outcome().is_some());

        session.select_mode(Mode::GenerateMusic);
        assert!(session.outcome().is_none());
        assert!(matches!(
            session.screen(),
            Screen::AwaitingInput(Mode::GenerateMusic)
        ));
    }

    #[test]
    fn warning_keeps_input_screen() {
        let mut session = Session::new();
        session.select_mode(Mode::GenerateMusic);
        session.warn("Please enter a prompt to generate music.");
        assert!(matches!(session.screen(), Screen::AwaitingInput(_)));
        assert!(session.warning().is_some());

        // Starting real work clears the warning.
        session.begin_processing();
        assert!(session.warning().is_none());
    }

    #[test]
    fn failure_is_recoverable_by_mode_switch() {
        let mut session = Session::new();
        session.select_mode(Mode::PlayPredefinedTrack);
        session.begin_processing();
        session.fail("Matushka track not found at tracks/matushka.mp3");
        assert!(matches!(session.screen(), Screen::Error(_, _)));

        session.select_mode(Mode::GenerateMusic);
        assert!(matches!(session.screen(), Screen::AwaitingInput(_)));
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut session = Session::new();
        session.select_mode(Mode::GenerateMusic);
        session.warn("warning");
        session.reset();
        assert!(matches!(session.screen(), Screen::Idle));
        assert!(session.warning().is_none());
    }
}
