//! Racer that always moves the same distance.

use super::{Player, PlayerContext};
use crate::action::ActionResult;
use crate::demo::{RaceAction, RaceGame};
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Demo player for [`RaceGame`] that advances a fixed stride every turn.
///
/// A stride of zero rests instead. Strides above
/// [`crate::demo::MAX_STRIDE`] are proposed as-is, which makes this player
/// handy for exercising rejected actions.
#[derive(Debug)]
pub struct SteadyPlayer {
    name: String,
    stride: u8,
    think_time: Duration,
    accepted: usize,
    rejected: usize,
}

impl SteadyPlayer {
    /// Creates a new steady player.
    pub fn new(name: impl Into<String>, stride: u8) -> Self {
        Self {
            name: name.into(),
            stride,
            think_time: Duration::ZERO,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Adds a delay before every action to simulate thinking.
    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        self
    }

    /// Spaces proposed on every turn.
    pub fn stride(&self) -> u8 {
        self.stride
    }

    /// Number of this player's actions the game accepted.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Number of this player's actions the game rejected.
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

#[async_trait::async_trait]
impl Player<RaceGame> for SteadyPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn take_turn(&mut self, _game: &RaceGame, ctx: &PlayerContext) -> Result<RaceAction> {
        if ctx.debug() {
            debug!(player = %self.name, turn = ctx.turn(), "Choosing action");
        }

        if !self.think_time.is_zero() {
            tokio::time::sleep(self.think_time).await;
        }

        Ok(match self.stride {
            0 => RaceAction::Rest,
            stride => RaceAction::Advance(stride),
        })
    }

    fn on_action_complete(&mut self, _game: &RaceGame, result: &ActionResult, _ctx: &PlayerContext) {
        match result.failure_cause() {
            None => self.accepted += 1,
            Some(cause) => {
                self.rejected += 1;
                warn!(player = %self.name, %cause, "Action rejected");
            }
        }
    }

    fn game_ended(&mut self, game: &RaceGame, _ctx: &PlayerContext) {
        info!(
            player = %self.name,
            accepted = self.accepted,
            rejected = self.rejected,
            rounds = game.rounds_completed(),
            "Race finished"
        );
    }

    fn debug_print(&self, _game: &RaceGame, ctx: &PlayerContext) -> String {
        if !ctx.debug() {
            return String::new();
        }
        format!(
            "{} strides {} ({} accepted, {} rejected)",
            self.name, self.stride, self.accepted, self.rejected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::FailureCause;
    use crate::game::{PlayerId, Seat};

    fn game() -> RaceGame {
        RaceGame::new(&[Seat::new(PlayerId(0), "Ann")], 10, 3, false).expect("setup failed")
    }

    #[tokio::test]
    async fn zero_stride_rests() {
        let mut player = SteadyPlayer::new("Ann", 0);
        let action = player
            .take_turn(&game(), &PlayerContext::new(false, 0))
            .await
            .expect("turn failed");
        assert_eq!(action, RaceAction::Rest);
    }

    #[tokio::test]
    async fn stride_is_proposed_unchanged() {
        let mut player = SteadyPlayer::new("Ann", 7);
        let action = player
            .take_turn(&game(), &PlayerContext::new(false, 0))
            .await
            .expect("turn failed");
        assert_eq!(action, RaceAction::Advance(7));
    }

    #[test]
    fn tallies_results_and_reports_them_when_debugging() {
        let mut player = SteadyPlayer::new("Ann", 2);
        let ctx = PlayerContext::new(true, 0);
        player.on_action_complete(&game(), &ActionResult::Success, &ctx);
        player.on_action_complete(&game(), &ActionResult::Failure(FailureCause::InvalidAction), &ctx);
        assert_eq!(player.accepted(), 1);
        assert_eq!(player.rejected(), 1);
        assert_eq!(
            player.debug_print(&game(), &ctx),
            "Ann strides 2 (1 accepted, 1 rejected)"
        );
        assert!(player.debug_print(&game(), &PlayerContext::new(false, 0)).is_empty());
    }
}
