//! Strictly Routes - CLI
//!
//! Runs the demo race game through the turn driver.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use std::time::Duration;
use strictly_routes::{
    ConsolePresenter, DriverConfig, Player, RaceFactory, RaceGame, SteadyPlayer, TurnDriver,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Stride used for players named without one.
const DEFAULT_STRIDE: u8 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            players,
            rounds,
            target,
            pause_ms,
            headless,
            quiet,
            lenient,
        } => {
            let config = load_config(config, rounds, pause_ms, headless, quiet, lenient)?;
            run_race(config, &players, target).await
        }
        Command::Config { output } => write_default_config(output),
    }
}

/// Loads the config file, if any, and applies command-line overrides.
#[instrument]
fn load_config(
    path: Option<PathBuf>,
    rounds: Option<usize>,
    pause_ms: Option<u64>,
    headless: bool,
    quiet: bool,
    lenient: bool,
) -> Result<DriverConfig> {
    let mut config = match path {
        Some(path) => DriverConfig::from_file(&path)?,
        None => DriverConfig::default(),
    };

    if let Some(rounds) = rounds {
        config = config.with_maximum_rounds(rounds);
    }
    if let Some(pause_ms) = pause_ms {
        config = config.with_pause(Duration::from_millis(pause_ms));
    }
    if headless {
        config = config.with_display(false);
    }
    if quiet {
        config = config.with_debug(false);
    }
    if lenient {
        config = config.with_strict_failures(false);
    }
    Ok(config)
}

/// Parses `NAME` or `NAME:STRIDE`.
fn parse_player(entry: &str) -> Result<SteadyPlayer> {
    match entry.split_once(':') {
        Some((name, stride)) => {
            let stride = stride
                .trim()
                .parse::<u8>()
                .with_context(|| format!("Invalid stride for player {}", name.trim()))?;
            Ok(SteadyPlayer::new(name.trim(), stride))
        }
        None => Ok(SteadyPlayer::new(entry.trim(), DEFAULT_STRIDE)),
    }
}

/// Plays one race and prints the outcome.
#[instrument(skip(config))]
async fn run_race(config: DriverConfig, players: &[String], target: u32) -> Result<()> {
    let mut roster = players
        .iter()
        .map(|entry| parse_player(entry).map(|p| Box::new(p) as Box<dyn Player<RaceGame>>))
        .collect::<Result<Vec<_>>>()?;

    info!(players = roster.len(), target, "Starting race");

    let display = *config.use_display();
    let mut driver = TurnDriver::new(&mut roster, RaceFactory::new(target), config);
    if display {
        driver = driver.with_presenter(Box::new(ConsolePresenter::stdio()));
    }

    driver.run().await?;
    info!(winner = ?driver.winner(), "Race complete");
    Ok(())
}

/// Writes the default configuration to a file or stdout.
#[instrument]
fn write_default_config(output: Option<PathBuf>) -> Result<()> {
    let toml = DriverConfig::default().to_toml()?;
    match output {
        Some(path) => std::fs::write(&path, toml)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", toml),
    }
    Ok(())
}
