//! Command-line interface for strictly_routes.

use clap::{Parser, Subcommand};

/// Strictly Routes - turn driver for route-building board games
#[derive(Parser, Debug)]
#[command(name = "strictly_routes")]
#[command(about = "Turn driver for route-building board game simulations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the demo race game between steady players
    Run {
        /// Path to a driver config file (TOML)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Player names, comma-separated. Each name may carry a stride as NAME:STRIDE
        #[arg(short, long, value_delimiter = ',', default_value = "Alice:3,Bob:2")]
        players: Vec<String>,

        /// Override the round cap
        #[arg(long)]
        rounds: Option<usize>,

        /// Length of the race track
        #[arg(long, default_value = "20")]
        target: u32,

        /// Override the pause between turns, in milliseconds
        #[arg(long)]
        pause_ms: Option<u64>,

        /// Disable the display observer and game-over prompt
        #[arg(long)]
        headless: bool,

        /// Disable per-turn debug output
        #[arg(long)]
        quiet: bool,

        /// Keep playing when an action is rejected
        #[arg(long)]
        lenient: bool,
    },

    /// Print the default driver configuration as TOML
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
}
