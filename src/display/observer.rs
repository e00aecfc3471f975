//! Observer that narrates the game through tracing.

use super::DisplayObserver;
use crate::game::GameState;
use tracing::{debug, info};

/// Logs every state refresh at debug level and the final state at info.
///
/// Used when display is enabled but no graphical observer is supplied.
#[derive(Debug, Default)]
pub struct TracingObserver {
    updates: usize,
    closed: bool,
}

impl TracingObserver {
    /// Creates a new observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of refreshes seen since the last close.
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Whether [`DisplayObserver::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<G: GameState> DisplayObserver<G> for TracingObserver {
    fn update(&mut self, game: &G) {
        self.closed = false;
        self.updates += 1;
        debug!(update = self.updates, table = %game.face_up_cards(), "Display refresh");
    }

    fn update_game_ended(&mut self, game: &G) {
        info!(
            winner = ?game.status().winner(),
            scores = %game.visible_scores(),
            "Display: game ended"
        );
    }

    fn close(&mut self) {
        debug!(updates = self.updates, "Display closed");
        self.updates = 0;
        self.closed = true;
    }
}
