//! Outcomes of applying a player's action to the game state.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Why the game state rejected an action.
///
/// This is the vocabulary shared between game implementations and the
/// driver. Causes render in `snake_case`, and parse back from the same form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    /// The acting player does not hold the turn.
    NotYourTurn,
    /// The action is malformed or not permitted in the current phase.
    InvalidAction,
    /// Another player already owns the route.
    RouteAlreadyClaimed,
    /// The route does not exist on the map.
    NoSuchRoute,
    /// The player lacks the train cards to pay for the claim.
    InsufficientCards,
    /// The player lacks the train pieces to place on the route.
    InsufficientTrains,
    /// The cards offered do not match the route's color.
    WrongColor,
    /// There is nothing left to draw.
    DeckEmpty,
    /// A face-up wild card was taken as the second draw of a turn.
    WildDrawnSecond,
    /// The destination tickets kept do not satisfy the selection rules.
    InvalidDestinationSelection,
    /// The game is already over.
    GameOver,
}

/// Result of [`crate::GameState::perform_action`].
///
/// Immutable once produced; the driver hands it to the acting player and,
/// in strict mode, turns a failure into a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "cause", rename_all = "snake_case")]
pub enum ActionResult {
    /// The action was applied.
    Success,
    /// The action was rejected.
    Failure(FailureCause),
}

impl ActionResult {
    /// Returns `true` if the action was applied.
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success)
    }

    /// Returns the rejection reason, if any.
    pub fn failure_cause(&self) -> Option<FailureCause> {
        match self {
            ActionResult::Success => None,
            ActionResult::Failure(cause) => Some(*cause),
        }
    }
}

impl std::fmt::Display for ActionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionResult::Success => write!(f, "success"),
            ActionResult::Failure(cause) => write!(f, "failure ({})", cause),
        }
    }
}
