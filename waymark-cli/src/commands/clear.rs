//! Clear the active spot, archiving it into history.

use chrono::Utc;
use clap::Args;

use waymark::spot::format_hours_minutes;
use waymark::store::ParkingStore;

use crate::commands::resolve_vehicle;
use crate::error::CliError;

/// Arguments for the `clear` command.
#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Vehicle id (defaults to the first registered vehicle)
    #[arg(long)]
    pub vehicle: Option<String>,
}

/// Run the `clear` command.
pub fn run(store: &ParkingStore, args: ClearArgs) -> Result<(), CliError> {
    let vehicle = resolve_vehicle(store, args.vehicle.as_deref())?;

    let spot = store
        .clear_active_spot(&vehicle.id)?
        .ok_or_else(|| CliError::NoActiveSpot(vehicle.id.clone()))?;

    let now = Utc::now();
    println!("Spot cleared for {}", vehicle.name);
    println!(
        "  Parked for: {}",
        format_hours_minutes(spot.parked_duration(now))
    );
    let due = spot.fee_due(now);
    if due > 0 {
        println!("  Fee due:    {}", due);
    }

    Ok(())
}
