//! A minimal race game for exercising the driver without a full rule set.
//!
//! Each player moves a marker along a track of `target` spaces. On their
//! turn a player advances between 1 and [`MAX_STRIDE`] spaces, or rests.
//! The first to reach the target wins; otherwise the leader when the round
//! cap runs out wins, and a tie at the top has no winner.
//!
//! A rejected action forfeits the turn, so a misbehaving player cannot
//! stall the game.

use crate::action::{ActionResult, FailureCause};
use crate::error::{DriverError, DriverErrorKind};
use crate::game::{GameFactory, GameState, GameStatus, PlayerId, Scores, Seat};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

/// Largest number of spaces a single action may cover.
pub const MAX_STRIDE: u8 = 3;

/// Default length of the track.
pub const DEFAULT_TARGET: u32 = 20;

/// A move in the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum RaceAction {
    /// Move forward this many spaces.
    #[display("advance {}", _0)]
    Advance(u8),
    /// Stay put.
    #[display("rest")]
    Rest,
}

/// What a racer can see about their own progress.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct RaceInfo {
    /// Spaces covered so far.
    position: u32,
    /// Spaces needed to win.
    target: u32,
    /// Completed rounds.
    round: usize,
}

impl fmt::Display for RaceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position {} of {} (round {})",
            self.position, self.target, self.round
        )
    }
}

/// State of one race.
#[derive(Debug, Clone)]
pub struct RaceGame {
    seats: Vec<Seat>,
    positions: Vec<u32>,
    current: usize,
    rounds_completed: usize,
    max_rounds: usize,
    target: u32,
    debug: bool,
    winner: Option<String>,
    finished: bool,
}

impl RaceGame {
    /// Creates a race for the given seats.
    ///
    /// # Errors
    ///
    /// Fails with [`DriverErrorKind::Setup`] if there are no seats or the
    /// target is zero.
    #[instrument(skip(seats, debug), fields(players = seats.len()))]
    pub fn new(
        seats: &[Seat],
        target: u32,
        max_rounds: usize,
        debug: bool,
    ) -> Result<Self, DriverError> {
        if seats.is_empty() {
            return Err(DriverError::new(DriverErrorKind::Setup(
                "a race needs at least one player".to_string(),
            )));
        }
        if target == 0 {
            return Err(DriverError::new(DriverErrorKind::Setup(
                "the track must be at least one space long".to_string(),
            )));
        }

        info!(target, max_rounds, "Starting race");
        Ok(Self {
            seats: seats.to_vec(),
            positions: vec![0; seats.len()],
            current: 0,
            rounds_completed: 0,
            max_rounds,
            target,
            debug,
            winner: None,
            finished: max_rounds == 0,
        })
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> PlayerId {
        *self.seats[self.current].id()
    }

    /// Spaces covered by `player`, or `None` for an unknown player.
    pub fn position(&self, player: PlayerId) -> Option<u32> {
        self.seat_index(player).map(|i| self.positions[i])
    }

    /// Number of fully completed rounds.
    pub fn rounds_completed(&self) -> usize {
        self.rounds_completed
    }

    /// Length of the track.
    pub fn target(&self) -> u32 {
        self.target
    }

    fn seat_index(&self, player: PlayerId) -> Option<usize> {
        self.seats.iter().position(|seat| *seat.id() == player)
    }

    fn pass_turn(&mut self) {
        self.current = (self.current + 1) % self.seats.len();
        if self.current == 0 {
            self.rounds_completed += 1;
            if self.rounds_completed >= self.max_rounds {
                self.finished = true;
                self.winner = self.leader();
                info!(rounds = self.rounds_completed, winner = ?self.winner, "Round cap reached");
            }
        }
    }

    /// Sole leader by position, if there is one.
    fn leader(&self) -> Option<String> {
        let best = self.positions.iter().copied().max()?;
        let mut leaders = self
            .positions
            .iter()
            .enumerate()
            .filter(|&(_, &position)| position == best);
        let (index, _) = leaders.next()?;
        if leaders.next().is_some() {
            return None;
        }
        Some(self.seats[index].name().clone())
    }
}

impl GameState for RaceGame {
    type Action = RaceAction;
    type Info = RaceInfo;

    fn status(&self) -> GameStatus {
        if self.finished {
            GameStatus::Over {
                winner: self.winner.clone(),
            }
        } else {
            GameStatus::InProgress
        }
    }

    fn is_turn(&self, player: PlayerId) -> bool {
        !self.finished && self.seats[self.current].id() == &player
    }

    #[instrument(skip(self), fields(round = self.rounds_completed))]
    fn perform_action(&mut self, player: PlayerId, action: RaceAction) -> ActionResult {
        if self.finished {
            return ActionResult::Failure(FailureCause::GameOver);
        }
        if !self.is_turn(player) {
            return ActionResult::Failure(FailureCause::NotYourTurn);
        }

        let result = match action {
            RaceAction::Advance(stride) if stride == 0 || stride > MAX_STRIDE => {
                ActionResult::Failure(FailureCause::InvalidAction)
            }
            RaceAction::Advance(stride) => {
                let position = &mut self.positions[self.current];
                *position = position.saturating_add(u32::from(stride)).min(self.target);
                if *position == self.target {
                    self.finished = true;
                    self.winner = Some(self.seats[self.current].name().clone());
                    info!(winner = ?self.winner, "Target reached");
                }
                ActionResult::Success
            }
            RaceAction::Rest => ActionResult::Success,
        };

        if self.debug {
            debug!(%result, "Race action applied");
        }

        if !self.finished {
            self.pass_turn();
        }
        result
    }

    fn player_info(&self, player: PlayerId) -> RaceInfo {
        RaceInfo {
            position: self.position(player).unwrap_or(0),
            target: self.target,
            round: self.rounds_completed,
        }
    }

    fn visible_scores(&self) -> Scores {
        self.seats
            .iter()
            .zip(&self.positions)
            .map(|(seat, &position)| (seat.name().clone(), i64::from(position)))
            .collect()
    }

    fn face_up_cards(&self) -> String {
        let track = self
            .seats
            .iter()
            .zip(&self.positions)
            .map(|(seat, position)| format!("{} {}/{}", seat.name(), position, self.target))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Track: {}", track)
    }
}

/// Builds [`RaceGame`]s with a fixed track length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceFactory {
    target: u32,
}

impl RaceFactory {
    /// Creates a factory for tracks of `target` spaces.
    pub fn new(target: u32) -> Self {
        Self { target }
    }
}

impl Default for RaceFactory {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

impl GameFactory for RaceFactory {
    type Game = RaceGame;

    fn create(
        &self,
        seats: &[Seat],
        max_rounds: usize,
        debug: bool,
    ) -> Result<RaceGame, DriverError> {
        RaceGame::new(seats, self.target, max_rounds, debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(names: &[&str]) -> Vec<Seat> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Seat::new(PlayerId(i), *name))
            .collect()
    }

    #[test]
    fn turns_rotate_in_seat_order() {
        let mut game = RaceGame::new(&seats(&["A", "B"]), 10, 5, false).expect("setup failed");
        assert!(game.is_turn(PlayerId(0)));
        assert!(!game.is_turn(PlayerId(1)));

        assert!(game.perform_action(PlayerId(0), RaceAction::Advance(2)).is_success());
        assert!(game.is_turn(PlayerId(1)));
        assert_eq!(game.rounds_completed(), 0);

        assert!(game.perform_action(PlayerId(1), RaceAction::Rest).is_success());
        assert!(game.is_turn(PlayerId(0)));
        assert_eq!(game.rounds_completed(), 1);
    }

    #[test]
    fn out_of_turn_action_is_rejected_without_passing() {
        let mut game = RaceGame::new(&seats(&["A", "B"]), 10, 5, false).expect("setup failed");
        let result = game.perform_action(PlayerId(1), RaceAction::Advance(1));
        assert_eq!(result, ActionResult::Failure(FailureCause::NotYourTurn));
        assert!(game.is_turn(PlayerId(0)));
        assert_eq!(game.position(PlayerId(1)), Some(0));
    }

    #[test]
    fn oversized_stride_forfeits_the_turn() {
        let mut game = RaceGame::new(&seats(&["A", "B"]), 10, 5, false).expect("setup failed");
        let result = game.perform_action(PlayerId(0), RaceAction::Advance(MAX_STRIDE + 1));
        assert_eq!(result.failure_cause(), Some(FailureCause::InvalidAction));
        assert_eq!(game.position(PlayerId(0)), Some(0));
        assert!(game.is_turn(PlayerId(1)));
    }

    #[test]
    fn reaching_target_wins() {
        let mut game = RaceGame::new(&seats(&["A", "B"]), 3, 5, false).expect("setup failed");
        assert!(game.perform_action(PlayerId(0), RaceAction::Advance(3)).is_success());
        assert_eq!(
            game.status(),
            GameStatus::Over {
                winner: Some("A".to_string())
            }
        );
        assert!(!game.is_turn(PlayerId(1)));
        assert_eq!(
            game.perform_action(PlayerId(1), RaceAction::Rest),
            ActionResult::Failure(FailureCause::GameOver)
        );
    }

    #[test]
    fn round_cap_ends_with_leader() {
        let mut game = RaceGame::new(&seats(&["A", "B"]), 50, 1, false).expect("setup failed");
        game.perform_action(PlayerId(0), RaceAction::Advance(1));
        assert!(!game.status().is_over());
        game.perform_action(PlayerId(1), RaceAction::Advance(2));
        assert_eq!(game.status().winner(), Some("B"));
    }

    #[test]
    fn tied_leaders_have_no_winner() {
        let mut game = RaceGame::new(&seats(&["A", "B"]), 50, 1, false).expect("setup failed");
        game.perform_action(PlayerId(0), RaceAction::Advance(2));
        game.perform_action(PlayerId(1), RaceAction::Advance(2));
        assert_eq!(game.status(), GameStatus::Over { winner: None });
    }

    #[test]
    fn long_track_advance_saturates() {
        let mut game =
            RaceGame::new(&seats(&["A"]), u32::MAX, 5, true).expect("setup failed");
        game.positions[0] = u32::MAX - 1;
        assert!(game.perform_action(PlayerId(0), RaceAction::Advance(3)).is_success());
        assert_eq!(game.position(PlayerId(0)), Some(u32::MAX));
        assert_eq!(game.status().winner(), Some("A"));
    }

    #[test]
    fn setup_rejects_empty_roster() {
        let err = RaceGame::new(&[], 10, 5, false).expect_err("empty roster accepted");
        assert!(matches!(err.kind(), DriverErrorKind::Setup(_)));
    }

    #[test]
    fn face_up_text_lists_every_racer() {
        let mut game = RaceGame::new(&seats(&["A", "B"]), 10, 5, false).expect("setup failed");
        game.perform_action(PlayerId(0), RaceAction::Advance(3));
        assert_eq!(game.face_up_cards(), "Track: A 3/10, B 0/10");
        assert_eq!(game.visible_scores().get("A"), Some(3));
        assert_eq!(
            game.player_info(PlayerId(0)).to_string(),
            "position 3 of 10 (round 0)"
        );
    }
}
