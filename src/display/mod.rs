//! Presentation hooks: live observers and the game-over summary.

mod console;
mod observer;

pub use console::{ConsolePresenter, NoopPresenter};
pub use observer::TracingObserver;

use crate::game::{GameState, Scores};
use derive_getters::Getters;
use std::fmt;
use std::time::Duration;

/// Shown under the game-over summary.
pub const REPLAY_PROMPT: &str = "To play again, press Enter and select a new ticket to discard";

/// Watches a game while it is played.
///
/// The driver is the only caller, and only calls it when display is enabled.
pub trait DisplayObserver<G: GameState>: Send {
    /// Shows the current state. Called before each action is applied.
    fn update(&mut self, game: &G);

    /// Shows the final state.
    fn update_game_ended(&mut self, game: &G);

    /// Releases whatever the observer holds open.
    fn close(&mut self);
}

/// Shows the game-over summary and waits until the viewer dismisses it.
pub trait SummaryPresenter: Send {
    /// Presents `summary`, blocking until it is dismissed.
    fn present(&mut self, summary: &GameSummary) -> std::io::Result<()>;
}

/// Final report of a completed game.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct GameSummary {
    /// Wall-clock time from the first turn to game over.
    execution_time: Duration,
    /// Whether the game state reported the game as over.
    game_over: bool,
    /// Name of the winner, if any.
    winner: Option<String>,
    /// Scores visible at the end.
    final_scores: Scores,
}

impl GameSummary {
    /// Creates a new summary.
    pub fn new(
        execution_time: Duration,
        game_over: bool,
        winner: Option<String>,
        final_scores: Scores,
    ) -> Self {
        Self {
            execution_time,
            game_over,
            winner,
            final_scores,
        }
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Execution Time: {:.2} seconds",
            self.execution_time.as_secs_f64()
        )?;
        if self.game_over {
            writeln!(f, "Game Over")?;
        }
        writeln!(f, "Winner: {}", self.winner.as_deref().unwrap_or("None"))?;
        write!(f, "Final Scores: {}", self.final_scores)
    }
}
