//! Turn orchestration between players.

use crate::action::ActionResult;
use crate::config::DriverConfig;
use crate::display::{DisplayObserver, GameSummary, NoopPresenter, SummaryPresenter, TracingObserver};
use crate::error::{DriverError, DriverErrorKind};
use crate::game::{GameFactory, GameState, PlayerId, Seat};
use crate::players::{Player, PlayerContext};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Where the turn loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting to find the player who holds the turn.
    AwaitingTurn,
    /// The given player has acted; the inter-turn pause comes next.
    ActionTaken(PlayerId),
    /// The game state reported the game as over.
    GameOver,
}

/// Drives a game: asks the current player for an action, applies it, and
/// reports results until the game state says the game is over.
///
/// The roster is borrowed for the lifetime of the driver; players stay
/// owned by the caller.
pub struct TurnDriver<'a, F: GameFactory> {
    roster: &'a mut [Box<dyn Player<F::Game>>],
    factory: F,
    config: DriverConfig,
    observer: Option<Box<dyn DisplayObserver<F::Game>>>,
    presenter: Box<dyn SummaryPresenter>,
    report: Box<dyn Write + Send>,
    game: Option<F::Game>,
    phase: TurnPhase,
    winner: Option<String>,
    summary: Option<GameSummary>,
    turns_taken: usize,
}

impl<'a, F: GameFactory> TurnDriver<'a, F> {
    /// Creates a new driver.
    ///
    /// The textual report goes to stdout and the game-over summary is not
    /// presented until a presenter is supplied.
    #[instrument(skip_all, fields(players = roster.len()))]
    pub fn new(roster: &'a mut [Box<dyn Player<F::Game>>], factory: F, config: DriverConfig) -> Self {
        info!(
            players = roster.len(),
            display = config.use_display(),
            debug = config.print_debug(),
            strict = config.strict_failures(),
            "Creating turn driver"
        );
        Self {
            roster,
            factory,
            config,
            observer: None,
            presenter: Box::new(NoopPresenter),
            report: Box::new(std::io::stdout()),
            game: None,
            phase: TurnPhase::AwaitingTurn,
            winner: None,
            summary: None,
            turns_taken: 0,
        }
    }

    /// Uses `observer` when display is enabled, instead of a [`TracingObserver`].
    #[instrument(skip_all)]
    pub fn with_observer(mut self, observer: Box<dyn DisplayObserver<F::Game>>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Uses `presenter` to show the game-over summary when display is enabled.
    #[instrument(skip_all)]
    pub fn with_presenter(mut self, presenter: Box<dyn SummaryPresenter>) -> Self {
        self.presenter = presenter;
        self
    }

    /// Sends the textual report (debug lines and summary) to `report`.
    #[instrument(skip_all)]
    pub fn with_report(mut self, report: Box<dyn Write + Send>) -> Self {
        self.report = report;
        self
    }

    /// The configuration captured at construction.
    #[instrument(skip_all)]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Seats handed to the game factory, in roster order.
    #[instrument(skip_all)]
    pub fn seats(&self) -> Vec<Seat> {
        self.roster
            .iter()
            .enumerate()
            .map(|(i, player)| Seat::new(PlayerId(i), player.name()))
            .collect()
    }

    /// Builds a fresh game through the factory.
    #[instrument(skip(self))]
    pub fn create_game(&self) -> Result<F::Game, DriverError> {
        self.factory.create(
            &self.seats(),
            *self.config.maximum_rounds(),
            *self.config.print_debug(),
        )
    }

    /// Creates a new game and plays it to the end.
    ///
    /// # Errors
    ///
    /// Fails if the game cannot be created, a player cannot produce an
    /// action, no player holds the turn, the report cannot be written, or
    /// (in strict mode) any action is rejected.
    #[instrument(skip(self), fields(players = self.roster.len()))]
    pub async fn run(&mut self) -> Result<(), DriverError> {
        let game = self.create_game()?;
        self.play(game).await
    }

    /// Plays an already created game to the end.
    ///
    /// The game is kept afterwards and available through [`Self::game`],
    /// whether or not play succeeded.
    #[instrument(skip_all)]
    pub async fn play(&mut self, mut game: F::Game) -> Result<(), DriverError> {
        self.winner = None;
        self.summary = None;
        self.turns_taken = 0;
        self.phase = TurnPhase::AwaitingTurn;

        let outcome = self.drive(&mut game).await;
        if outcome.is_err() && *self.config.use_display() {
            if let Some(observer) = self.observer.as_mut() {
                observer.close();
            }
        }
        self.game = Some(game);
        outcome
    }

    /// Winner of the last completed game, or `None` before one completes.
    #[instrument(skip_all)]
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// The last game played, if any.
    #[instrument(skip_all)]
    pub fn game(&self) -> Option<&F::Game> {
        self.game.as_ref()
    }

    /// Summary of the last completed game.
    #[instrument(skip_all)]
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    /// Where the turn loop stopped.
    #[instrument(skip_all)]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Number of actions applied in the current or last game.
    #[instrument(skip_all)]
    pub fn turns_taken(&self) -> usize {
        self.turns_taken
    }

    #[instrument(skip_all)]
    async fn drive(&mut self, game: &mut F::Game) -> Result<(), DriverError> {
        let start = Instant::now();

        if *self.config.use_display() && self.observer.is_none() {
            debug!("No observer supplied, narrating through tracing");
            let observer: Box<dyn DisplayObserver<F::Game>> = Box::new(TracingObserver::new());
            self.observer = Some(observer);
        }

        loop {
            let next = match self.phase {
                TurnPhase::AwaitingTurn => {
                    if game.status().is_over() {
                        TurnPhase::GameOver
                    } else {
                        let player = self.current_player(game)?;
                        self.take_turn(game, player).await?;
                        TurnPhase::ActionTaken(player)
                    }
                }
                TurnPhase::ActionTaken(_) => {
                    let pause = self.config.pause();
                    if !pause.is_zero() {
                        tokio::time::sleep(pause).await;
                    }
                    TurnPhase::AwaitingTurn
                }
                TurnPhase::GameOver => break,
            };
            self.phase = next;
        }

        self.game_over(game, start)
    }

    /// First player in roster order who holds the turn.
    #[instrument(skip_all, fields(turn = self.turns_taken))]
    fn current_player(&self, game: &F::Game) -> Result<PlayerId, DriverError> {
        match (0..self.roster.len()).map(PlayerId).find(|id| game.is_turn(*id)) {
            Some(id) => Ok(id),
            None => {
                error!(turn = self.turns_taken, "Game in progress but nobody holds the turn");
                Err(DriverError::new(DriverErrorKind::NoCurrentPlayer {
                    turn: self.turns_taken,
                }))
            }
        }
    }

    #[instrument(skip(self, game), fields(turn = self.turns_taken))]
    async fn take_turn(&mut self, game: &mut F::Game, id: PlayerId) -> Result<(), DriverError> {
        let debug = *self.config.print_debug();
        let display = *self.config.use_display();
        let ctx = PlayerContext::new(debug, self.turns_taken);

        let player = &mut self.roster[id.index()];
        let name = player.name().to_string();

        debug!(player = %name, "Waiting for action");
        let action = player.take_turn(game, &ctx).await.map_err(|e| {
            DriverError::new(DriverErrorKind::Player {
                player: name.clone(),
                message: e.to_string(),
            })
        })?;
        let action_text = action.to_string();

        let info = game.player_info(id);
        if display {
            if let Some(observer) = self.observer.as_mut() {
                observer.update(game);
            }
        }

        let result = game.perform_action(id, action);
        self.turns_taken += 1;
        player.on_action_complete(game, &result, &ctx);
        info!(player = %name, action = %action_text, %result, "Action performed");

        // After the action, so drawn cards show up in the face-up listing.
        if debug {
            writeln!(self.report, "{}", game.face_up_cards())?;
            writeln!(self.report, "Player {}: {}\nDoing Action: {}", name, info, action_text)?;
            let extra = player.debug_print(game, &ctx);
            if !extra.is_empty() {
                writeln!(self.report, "{}", extra)?;
            }
            writeln!(self.report)?;
        }

        if let ActionResult::Failure(cause) = result {
            if *self.config.strict_failures() {
                error!(player = %name, %cause, "Rejected action in strict mode");
                return Err(DriverError::new(DriverErrorKind::BadAction(cause)));
            }
            warn!(player = %name, %cause, "Rejected action, continuing");
        }

        Ok(())
    }

    #[instrument(skip_all)]
    fn game_over(&mut self, game: &F::Game, start: Instant) -> Result<(), DriverError> {
        let display = *self.config.use_display();
        let ctx = PlayerContext::new(*self.config.print_debug(), self.turns_taken);
        for player in self.roster.iter_mut() {
            player.game_ended(game, &ctx);
        }

        let status = game.status();
        self.winner = status.winner().map(str::to_string);
        let summary = GameSummary::new(
            start.elapsed(),
            status.is_over(),
            self.winner.clone(),
            game.visible_scores(),
        );

        if display {
            self.presenter.present(&summary)?;
            if let Some(observer) = self.observer.as_mut() {
                observer.update_game_ended(game);
            }
        }

        writeln!(self.report, "{}", summary)?;
        writeln!(self.report)?;
        self.report.flush()?;

        if display {
            if let Some(observer) = self.observer.as_mut() {
                observer.close();
            }
        }

        info!(
            winner = ?self.winner,
            turns = self.turns_taken,
            elapsed_ms = u64::try_from(summary.execution_time().as_millis()).unwrap_or(u64::MAX),
            "Game over"
        );
        self.summary = Some(summary);
        Ok(())
    }
}
