//! Record a parking spot.

use chrono::Utc;
use clap::Args;

use waymark::geo::Coordinate;
use waymark::spot::{FeeSchedule, ParkingSpot};
use waymark::store::ParkingStore;

use crate::commands::resolve_vehicle;
use crate::error::CliError;

/// Arguments for the `park` command.
#[derive(Debug, Args)]
pub struct ParkArgs {
    /// Latitude of the spot in decimal degrees
    #[arg(long)]
    pub lat: f64,

    /// Longitude of the spot in decimal degrees
    #[arg(long)]
    pub lon: f64,

    /// Vehicle id (defaults to the first registered vehicle)
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Free-form note ("Level 3, pillar B7")
    #[arg(long)]
    pub note: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    /// Hourly rate; every started hour bills in full
    #[arg(long, conflicts_with = "fixed")]
    pub hourly: Option<u32>,

    /// Flat fee regardless of duration
    #[arg(long)]
    pub fixed: Option<u32>,

    /// Set a reminder this many minutes from now
    #[arg(long)]
    pub remind_in: Option<i64>,

    /// Replace an existing active spot instead of refusing
    #[arg(long)]
    pub replace: bool,
}

/// Run the `park` command.
pub fn run(store: &ParkingStore, args: ParkArgs) -> Result<(), CliError> {
    let vehicle = resolve_vehicle(store, args.vehicle.as_deref())?;
    let location = Coordinate::new(args.lat, args.lon)?;

    if !args.replace {
        if let Some(existing) = store.active_spot(&vehicle.id)? {
            return Err(CliError::AlreadyParked {
                vehicle: vehicle.id,
                spot_id: existing.id,
            });
        }
    }

    let now = Utc::now();
    let mut spot = ParkingSpot::new(now.timestamp_millis().to_string(), &vehicle.id, location);
    spot.note = args.note;
    spot.address = args.address;
    spot.fee = match (args.hourly, args.fixed) {
        (Some(rate), _) => FeeSchedule::Hourly { rate },
        (None, Some(amount)) => FeeSchedule::Fixed { amount },
        (None, None) => FeeSchedule::Free,
    };
    if let Some(minutes) = args.remind_in {
        spot.set_reminder(now, minutes);
    }

    store.save_active_spot(&spot)?;

    println!("Parked {} ({})", vehicle.name, vehicle.plate_number);
    println!("  Location: {}", spot.location);
    if let Some(note) = &spot.note {
        println!("  Note:     {}", note);
    }
    println!("  Fee:      {}", spot.fee);
    if spot.reminder_at.is_some() {
        println!("  Reminder: {}", spot.reminder_status(now));
    }

    Ok(())
}
