//! Driver error types.

use crate::action::FailureCause;
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while driving a game.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DriverErrorKind {
    /// A player's action was rejected while strict mode was on.
    #[display("Failure: {}", _0)]
    BadAction(FailureCause),
    /// The game is in progress but no roster member holds the turn.
    #[display("No player holds the turn before turn {}", turn)]
    NoCurrentPlayer {
        /// Number of the turn that could not be started.
        turn: usize,
    },
    /// A player failed to produce an action.
    #[display("Player {} failed to take a turn: {}", player, message)]
    Player {
        /// Name of the failing player.
        player: String,
        /// The player's error.
        message: String,
    },
    /// The game factory could not build a game.
    #[display("Game setup failed: {}", _0)]
    Setup(String),
    /// The report sink could not be written.
    #[display("Report output failed: {}", _0)]
    Report(String),
}

/// Driver error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Driver error: {} at {}:{}", kind, file, line)]
pub struct DriverError {
    /// Error kind.
    pub kind: DriverErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DriverError {
    /// Creates a new driver error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: DriverErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &DriverErrorKind {
        &self.kind
    }

    /// Returns the rejected action's cause, if this is a strict-mode abort.
    pub fn failure_cause(&self) -> Option<FailureCause> {
        match self.kind {
            DriverErrorKind::BadAction(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DriverError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(DriverErrorKind::Report(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_action_message_names_the_cause() {
        let err = DriverError::new(DriverErrorKind::BadAction(FailureCause::InsufficientCards));
        let message = err.to_string();
        assert!(message.contains("Failure: insufficient_cards"), "{message}");
        assert!(message.contains("error.rs"), "{message}");
        assert_eq!(err.failure_cause(), Some(FailureCause::InsufficientCards));
    }

    #[test]
    fn io_errors_become_report_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = DriverError::from(io);
        assert!(matches!(err.kind(), DriverErrorKind::Report(msg) if msg.contains("pipe closed")));
        assert_eq!(err.failure_cause(), None);
    }
}
