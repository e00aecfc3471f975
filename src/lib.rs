//! Strictly Routes - turn driver for route-building board game simulations
//!
//! This library runs the turn loop of a multiplayer board game: it asks the
//! player who holds the turn for an action, applies it to the game state,
//! reports the result, and stops when the game state says the game is over.
//!
//! # Architecture
//!
//! - **Driver**: [`TurnDriver`] owns the loop and the configuration
//! - **Game**: rules live behind the [`GameState`] and [`GameFactory`] traits
//! - **Players**: decision-making lives behind the [`Player`] trait
//! - **Display**: optional [`DisplayObserver`] and [`SummaryPresenter`] hooks
//! - **Demo**: a small race game ([`RaceGame`]) for end-to-end runs
//!
//! # Example
//!
//! ```no_run
//! use strictly_routes::{DriverConfig, Player, RaceFactory, RaceGame, SteadyPlayer, TurnDriver};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut players: Vec<Box<dyn Player<RaceGame>>> = vec![
//!     Box::new(SteadyPlayer::new("Alice", 3)),
//!     Box::new(SteadyPlayer::new("Bob", 2)),
//! ];
//!
//! let mut driver = TurnDriver::new(&mut players, RaceFactory::default(), DriverConfig::headless());
//! driver.run().await?;
//! println!("Winner: {:?}", driver.winner());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod config;
mod display;
mod driver;
mod error;
mod game;
mod players;

/// Demonstration race game.
pub mod demo;

// Crate-level exports - Actions
pub use action::{ActionResult, FailureCause};

// Crate-level exports - Configuration
pub use config::{ConfigError, ConfigErrorKind, DriverConfig};

// Crate-level exports - Display hooks
pub use display::{
    ConsolePresenter, DisplayObserver, GameSummary, NoopPresenter, REPLAY_PROMPT,
    SummaryPresenter, TracingObserver,
};

// Crate-level exports - Driver
pub use driver::{TurnDriver, TurnPhase};

// Crate-level exports - Errors
pub use error::{DriverError, DriverErrorKind};

// Crate-level exports - Game contracts
pub use game::{GameFactory, GameState, GameStatus, PlayerId, Scores, Seat};

// Crate-level exports - Players
pub use players::{Player, PlayerContext, SteadyPlayer};

// Crate-level exports - Demo game
pub use demo::{RaceAction, RaceFactory, RaceGame, RaceInfo};
