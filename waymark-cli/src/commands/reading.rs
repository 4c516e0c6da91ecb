//! One-shot reading from an observer position to the active spot.

use clap::Args;

use waymark::geo::Coordinate;
use waymark::store::ParkingStore;
use waymark::tracking::{compute_reading, DEFAULT_WALKING_SPEED_MPS};

use crate::commands::resolve_vehicle;
use crate::error::CliError;

/// Arguments for the `reading` command.
#[derive(Debug, Args)]
pub struct ReadingArgs {
    /// Observer latitude in decimal degrees
    #[arg(long)]
    pub lat: f64,

    /// Observer longitude in decimal degrees
    #[arg(long)]
    pub lon: f64,

    /// Vehicle id (defaults to the first registered vehicle)
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Walking speed in meters per second
    #[arg(long, default_value_t = DEFAULT_WALKING_SPEED_MPS)]
    pub speed: f64,
}

/// Run the `reading` command.
pub fn run(store: &ParkingStore, args: ReadingArgs) -> Result<(), CliError> {
    let vehicle = resolve_vehicle(store, args.vehicle.as_deref())?;
    let spot = store
        .active_spot(&vehicle.id)?
        .ok_or_else(|| CliError::NoActiveSpot(vehicle.id.clone()))?;

    let observer = Coordinate::new(args.lat, args.lon)?;
    let reading = compute_reading(spot.location, observer, args.speed)?;

    println!("Distance: {}", reading.formatted_distance);
    if reading.has_bearing() {
        println!("Bearing:  {:.0}°", reading.bearing_degrees);
    } else {
        println!("Bearing:  -- (at target)");
    }
    println!("ETA:      ~{} min walk", reading.eta_minutes);

    Ok(())
}
