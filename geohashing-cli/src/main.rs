//! Geohashing CLI - Command-line interface
//!
//! Computes xkcd geohashes and manages the local DJIA cache and settings.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::cache::CacheAction;
use commands::common::ModeArg;
use commands::config::ConfigCommands;
use commands::hash::HashArgs;

#[derive(Parser)]
#[command(name = "geohashing")]
#[command(version, about = "Find xkcd geohash coordinates", long_about = None)]
struct Cli {
    /// Mirror all log output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the geohash for a position and date
    Hash {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Date in YYYY-MM-DD format (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Lookup mode (default: geohash.mode from the config file)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Print the DJIA opening value for a date
    Djia {
        /// Date in YYYY-MM-DD format (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Manage the DJIA cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// View and modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Hash {
            lat,
            lon,
            date,
            mode,
        } => commands::hash::run(
            HashArgs {
                latitude: lat,
                longitude: lon,
                date,
                mode,
            },
            cli.verbose,
        ),
        Commands::Djia { date } => commands::djia::run(date, cli.verbose),
        Commands::Cache { action } => commands::cache::run(action, cli.verbose),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
