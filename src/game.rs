//! Game-state collaborator contracts.
//!
//! The rules of the game (route legality, card handling, scoring) live
//! behind [`GameState`]. The driver only asks it whose turn it is, hands it
//! actions, and reads back what a player is allowed to see.

use crate::action::ActionResult;
use crate::error::DriverError;
use derive_getters::Getters;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a player in the driver's roster.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Serialize, Deserialize,
)]
#[display("#{}", _0)]
pub struct PlayerId(pub usize);

impl PlayerId {
    /// Returns the roster index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A player as seen by the game factory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Seat {
    /// Roster position.
    id: PlayerId,
    /// Display name.
    name: String,
}

impl Seat {
    /// Creates a new seat.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Whether the game is still running, and who won if not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Players are still taking turns.
    InProgress,
    /// The game has ended. `winner` is `None` for a game without a winner.
    Over {
        /// Name of the winning player.
        winner: Option<String>,
    },
}

impl GameStatus {
    /// Returns `true` once the game has ended.
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Over { .. })
    }

    /// Returns the winner's name, if the game is over and has one.
    pub fn winner(&self) -> Option<&str> {
        match self {
            GameStatus::Over { winner } => winner.as_deref(),
            GameStatus::InProgress => None,
        }
    }
}

/// Publicly visible scores, in the order the game reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores(Vec<(String, i64)>);

impl Scores {
    /// Creates an empty score sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a player's score.
    pub fn push(&mut self, name: impl Into<String>, score: i64) {
        self.0.push((name.into(), score));
    }

    /// Looks up a player's score by name.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|(player, _)| player == name)
            .map(|(_, score)| *score)
    }

    /// Iterates over `(name, score)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// Number of scored players.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no scores are recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Scores {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, score)| (name.into(), score))
                .collect(),
        )
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, score)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, score)?;
        }
        write!(f, "}}")
    }
}

/// The game-state machine driven by [`crate::TurnDriver`].
///
/// Implementations must keep exactly one player current while the game is
/// in progress, and must end the game on their own once the round cap they
/// were created with is reached.
pub trait GameState: Send + Sync {
    /// A move a player proposes.
    type Action: fmt::Display + Send;

    /// What a player is allowed to know about their own position.
    type Info: fmt::Display + Send;

    /// Reports whether the game has ended.
    fn status(&self) -> GameStatus;

    /// Returns `true` if `player` may act now.
    fn is_turn(&self, player: PlayerId) -> bool;

    /// Validates and applies `action` on behalf of `player`.
    fn perform_action(&mut self, player: PlayerId, action: Self::Action) -> ActionResult;

    /// Snapshot of the information visible to `player`.
    fn player_info(&self, player: PlayerId) -> Self::Info;

    /// Scores as visible to every player.
    fn visible_scores(&self) -> Scores;

    /// Text rendering of the public face-up cards.
    fn face_up_cards(&self) -> String;
}

/// Builds a fresh [`GameState`] for each run.
pub trait GameFactory {
    /// The game this factory builds.
    type Game: GameState;

    /// Creates a game for the given seats.
    fn create(
        &self,
        seats: &[Seat],
        max_rounds: usize,
        debug: bool,
    ) -> Result<Self::Game, DriverError>;
}

impl<G, F> GameFactory for F
where
    G: GameState,
    F: Fn(&[Seat], usize, bool) -> Result<G, DriverError>,
{
    type Game = G;

    fn create(&self, seats: &[Seat], max_rounds: usize, debug: bool) -> Result<G, DriverError> {
        self(seats, max_rounds, debug)
    }
}
