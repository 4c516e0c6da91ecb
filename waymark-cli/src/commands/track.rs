//! Live tracking session driven by a replayed walk.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tokio::sync::broadcast::error::RecvError;

use waymark::store::ParkingStore;
use waymark::tracking::{
    RefreshStrategy, SignalStatus, TrackingSession, TrackingSessionConfig,
    DEFAULT_WALKING_SPEED_MPS,
};

use crate::commands::resolve_vehicle;
use crate::error::CliError;
use crate::replay::ReplayLocationSource;

/// Arguments for the `track` command.
#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Replay file with recorded observer samples (JSON)
    #[arg(long)]
    pub replay: PathBuf,

    /// Vehicle id (defaults to the first registered vehicle)
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Refresh cadence in milliseconds
    #[arg(long, default_value = "1000")]
    pub interval_ms: u64,

    /// Walking speed in meters per second
    #[arg(long, default_value_t = DEFAULT_WALKING_SPEED_MPS)]
    pub speed: f64,

    /// Re-request a one-shot fix per tick instead of a continuous watch
    #[arg(long)]
    pub poll: bool,
}

/// Run the `track` command.
pub async fn run(store: &ParkingStore, args: TrackArgs) -> Result<(), CliError> {
    let vehicle = resolve_vehicle(store, args.vehicle.as_deref())?;
    let spot = store
        .active_spot(&vehicle.id)?
        .ok_or_else(|| CliError::NoActiveSpot(vehicle.id.clone()))?;

    let replay = ReplayLocationSource::from_file(&args.replay)?;
    let replay_duration = replay.duration();
    let sample_count = replay.len();

    let config = TrackingSessionConfig {
        tick_interval: Duration::from_millis(args.interval_ms),
        walking_speed_mps: args.speed,
        strategy: if args.poll {
            RefreshStrategy::Poll
        } else {
            RefreshStrategy::Watch
        },
        ..Default::default()
    };

    println!(
        "Tracking {} at {} ({} samples)",
        vehicle.name, spot.location, sample_count
    );
    println!("Awaiting signal...");

    let handle = TrackingSession::with_config(spot.location, replay, config)?.start();
    let mut readings = handle.subscribe();

    // Follow the replay to its end plus a grace tick, then wind down
    let deadline = tokio::time::sleep(replay_duration + Duration::from_millis(2 * args.interval_ms));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,

            received = readings.recv() => match received {
                Ok(reading) => {
                    let bearing = if reading.has_bearing() {
                        format!("{:.0}°", reading.bearing_degrees)
                    } else {
                        "--".to_string()
                    };
                    println!(
                        "{:>8}  bearing {:>5}  ~{} min",
                        reading.formatted_distance, bearing, reading.eta_minutes
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    println!("(skipped {} readings)", skipped);
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    let status = handle.status();
    match status.signal {
        SignalStatus::Active => println!("Tracking complete."),
        SignalStatus::SignalLost => println!("Tracking complete (signal lost at end of replay)."),
        SignalStatus::Unknown => println!("No signal was ever acquired."),
    }

    handle.shutdown().await;
    Ok(())
}
