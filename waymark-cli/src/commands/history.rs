//! Show cleared parking spots, newest first.

use clap::Args;

use waymark::store::ParkingStore;

use crate::error::CliError;

/// Arguments for the `history` command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Maximum number of entries to show
    #[arg(long, default_value = "10")]
    pub limit: usize,
}

/// Run the `history` command.
pub fn run(store: &ParkingStore, args: HistoryArgs) -> Result<(), CliError> {
    let history = store.history()?;
    if history.is_empty() {
        println!("No parking history yet.");
        return Ok(());
    }

    for spot in history.iter().take(args.limit) {
        let note = spot.note.as_deref().unwrap_or("-");
        println!(
            "{}  {}  {}",
            spot.parked_at.format("%Y-%m-%d %H:%M"),
            spot.location,
            note
        );
    }
    if history.len() > args.limit {
        println!("... and {} more", history.len() - args.limit);
    }

    Ok(())
}
