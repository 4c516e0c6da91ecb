//! Waymark CLI - remember where you parked.
//!
//! This binary provides a command-line interface to the waymark library:
//! record and clear parking spots, inspect status and history, manage
//! vehicles, and run live tracking against a replayed walk.

mod commands;
mod error;
mod replay;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use waymark::logging::{default_log_dir, default_log_file, init_logging};
use waymark::store::ParkingStore;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "waymark")]
#[command(version = waymark::VERSION)]
#[command(about = "Remember where you parked", long_about = None)]
struct Cli {
    /// Directory holding the parking store
    #[arg(long, default_value = ".waymark", global = true)]
    store_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record where a vehicle is parked
    Park(commands::park::ParkArgs),
    /// Clear the active spot, archiving it into history
    Clear(commands::clear::ClearArgs),
    /// Show active parking spots
    Status(commands::status::StatusArgs),
    /// Show cleared spots, newest first
    History(commands::history::HistoryArgs),
    /// Manage registered vehicles
    Vehicles {
        #[command(subcommand)]
        action: commands::vehicles::VehicleAction,
    },
    /// Compute distance, bearing, and walking ETA to the active spot
    Reading(commands::reading::ReadingArgs),
    /// Run a live tracking session against a replayed walk
    Track(commands::track::TrackArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _logging_guard = match init_logging(default_log_dir(), default_log_file()) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let store = ParkingStore::open(&cli.store_dir)?;

    match cli.command {
        Command::Park(args) => commands::park::run(&store, args),
        Command::Clear(args) => commands::clear::run(&store, args),
        Command::Status(args) => commands::status::run(&store, args),
        Command::History(args) => commands::history::run(&store, args),
        Command::Vehicles { action } => commands::vehicles::run(&store, action),
        Command::Reading(args) => commands::reading::run(&store, args),
        Command::Track(args) => commands::track::run(&store, args).await,
    }
}
