//! Show active parking spots.

use chrono::Utc;
use clap::Args;

use waymark::spot::{format_hours_minutes, ReminderStatus};
use waymark::store::ParkingStore;

use crate::error::CliError;

/// Arguments for the `status` command.
#[derive(Debug, Args)]
pub struct StatusArgs {}

/// Run the `status` command.
pub fn run(store: &ParkingStore, _args: StatusArgs) -> Result<(), CliError> {
    let spots = store.active_spots()?;
    if spots.is_empty() {
        println!("No active parking spots.");
        return Ok(());
    }

    let vehicles = store.vehicles()?;
    let now = Utc::now();

    for (vehicle_id, spot) in &spots {
        let name = vehicles
            .iter()
            .find(|v| &v.id == vehicle_id)
            .map(|v| format!("{} ({})", v.name, v.plate_number))
            .unwrap_or_else(|| vehicle_id.clone());

        println!("{}", name);
        println!("  Location:   {}", spot.location);
        if let Some(address) = &spot.address {
            println!("  Address:    {}", address);
        }
        if let Some(note) = &spot.note {
            println!("  Note:       {}", note);
        }
        println!(
            "  Parked for: {}",
            format_hours_minutes(spot.parked_duration(now))
        );
        println!("  Fee:        {} (due: {})", spot.fee, spot.fee_due(now));
        match spot.reminder_status(now) {
            ReminderStatus::None => {}
            reminder => println!("  Reminder:   {}", reminder),
        }
    }

    Ok(())
}
