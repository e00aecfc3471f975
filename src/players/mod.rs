//! Player trait and implementations.

mod steady;

pub use steady::SteadyPlayer;

use crate::action::ActionResult;
use crate::game::GameState;
use anyhow::Result;

/// Per-call settings the driver hands to every player callback.
///
/// Players read the debug flag from here instead of having it written
/// into them at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerContext {
    debug: bool,
    turn: usize,
}

impl PlayerContext {
    /// Creates a context for the given turn.
    pub fn new(debug: bool, turn: usize) -> Self {
        Self { debug, turn }
    }

    /// Whether the player should produce debug output.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Number of actions applied before this call, across all players.
    pub fn turn(&self) -> usize {
        self.turn
    }
}

/// Trait for players that take turns in a game of type `G`.
#[async_trait::async_trait]
pub trait Player<G: GameState>: Send {
    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Chooses the next action.
    ///
    /// The player sees the full game state and may take as long as it
    /// needs; the driver waits for the result.
    async fn take_turn(&mut self, game: &G, ctx: &PlayerContext) -> Result<G::Action>;

    /// Called after the game has applied (or rejected) this player's action.
    fn on_action_complete(&mut self, _game: &G, _result: &ActionResult, _ctx: &PlayerContext) {}

    /// Called once for every player when the game ends.
    fn game_ended(&mut self, _game: &G, _ctx: &PlayerContext) {}

    /// Extra text for the debug report. Empty output is not printed.
    fn debug_print(&self, _game: &G, _ctx: &PlayerContext) -> String {
        String::new()
    }
}
