//! Reminder daemon - fires parking reminders as they come due.
//!
//! The daemon runs as an independent async task that periodically scans
//! the active spots in the store. A spot whose reminder time has passed
//! produces one [`ReminderEvent`] on the outbound channel and has its
//! reminder cleared in the store, so each reminder fires exactly once
//! even across process restarts.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::store::ParkingStore;

/// Configuration for the reminder daemon.
#[derive(Debug, Clone)]
pub struct ReminderDaemonConfig {
    /// How often to scan for due reminders.
    pub check_interval: Duration,
}

impl Default for ReminderDaemonConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(10),
        }
    }
}

/// A reminder that has come due.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEvent {
    /// The vehicle whose parking session triggered the reminder.
    pub vehicle_id: String,

    /// The parking spot the reminder was set on.
    pub spot_id: String,

    /// Human-readable alert text.
    pub message: String,
}

/// The reminder scanning daemon.
pub struct ReminderDaemon {
    store: ParkingStore,
    config: ReminderDaemonConfig,
    events_tx: mpsc::Sender<ReminderEvent>,
}

impl ReminderDaemon {
    /// Create a daemon with the default configuration.
    pub fn new(store: ParkingStore, events_tx: mpsc::Sender<ReminderEvent>) -> Self {
        Self::with_config(store, events_tx, ReminderDaemonConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(
        store: ParkingStore,
        events_tx: mpsc::Sender<ReminderEvent>,
        config: ReminderDaemonConfig,
    ) -> Self {
        Self {
            store,
            config,
            events_tx,
        }
    }

    /// Run the daemon until shutdown is signaled.
    pub async fn run(self, shutdown: CancellationToken) {
        debug!(interval = ?self.config.check_interval, "Reminder daemon starting");

        let mut interval = tokio::time::interval(self.config.check_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    debug!("Reminder daemon shutting down");
                    break;
                }

                _ = interval.tick() => {
                    self.fire_due_reminders();
                }
            }
        }
    }

    /// Scan active spots and fire every due reminder once.
    fn fire_due_reminders(&self) {
        let spots = match self.store.active_spots() {
            Ok(spots) => spots,
            Err(err) => {
                warn!(error = %err, "Reminder scan could not read active spots");
                return;
            }
        };

        let vehicles = self.store.vehicles().unwrap_or_default();
        let now = Utc::now();

        for (vehicle_id, mut spot) in spots {
            let due = spot.reminder_at.is_some_and(|at| at <= now);
            if !due {
                continue;
            }

            let vehicle_name = vehicles
                .iter()
                .find(|v| v.id == vehicle_id)
                .map(|v| v.name.clone())
                .unwrap_or_else(|| "Your vehicle".to_string());

            let event = ReminderEvent {
                vehicle_id: vehicle_id.clone(),
                spot_id: spot.id.clone(),
                message: format!(
                    "Parking reminder: {} session is reaching its limit",
                    vehicle_name
                ),
            };

            info!(vehicle_id = %vehicle_id, spot_id = %spot.id, "Reminder due");

            if self.events_tx.try_send(event).is_err() {
                // Receiver gone or full; leave the reminder set so it
                // fires on a later scan instead of being lost
                warn!(vehicle_id = %vehicle_id, "Reminder event not delivered, keeping reminder");
                continue;
            }

            // Clear so it fires once
            spot.clear_reminder();
            if let Err(err) = self.store.save_active_spot(&spot) {
                warn!(error = %err, "Failed to persist cleared reminder");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use tempfile::TempDir;

    use crate::geo::Coordinate;
    use crate::spot::{ParkingSpot, Vehicle, VehicleKind};

    fn store() -> (ParkingStore, TempDir) {
        let dir = TempDir::new().expect("tempdir");
        let store = ParkingStore::open(dir.path()).expect("store");
        (store, dir)
    }

    fn parked_spot(reminder_offset_minutes: i64) -> ParkingSpot {
        let mut spot = ParkingSpot::new(
            "s1",
            "v1",
            Coordinate::new(18.5204, 73.8567).unwrap(),
        );
        spot.reminder_at = Some(Utc::now() + ChronoDuration::minutes(reminder_offset_minutes));
        spot
    }

    fn daemon_with(
        store: &ParkingStore,
    ) -> (ReminderDaemon, mpsc::Receiver<ReminderEvent>) {
        let (tx, rx) = mpsc::channel(16);
        (ReminderDaemon::new(store.clone(), tx), rx)
    }

    #[test]
    fn test_due_reminder_fires_and_clears() {
        let (store, _dir) = store();
        store
            .save_vehicles(&[Vehicle::new(
                "v1",
                "Main Ride",
                "Model 3",
                "MH-12-PA-777",
                VehicleKind::Ev,
            )])
            .unwrap();
        store.save_active_spot(&parked_spot(-1)).unwrap();

        let (daemon, mut rx) = daemon_with(&store);
        daemon.fire_due_reminders();

        let event = rx.try_recv().expect("Should fire a reminder");
        assert_eq!(event.vehicle_id, "v1");
        assert_eq!(event.spot_id, "s1");
        assert!(event.message.contains("Main Ride"));

        // Reminder cleared in the store, fires only once
        let spot = store.active_spot("v1").unwrap().unwrap();
        assert!(spot.reminder_at.is_none());

        daemon.fire_due_reminders();
        assert!(rx.try_recv().is_err(), "Cleared reminder must not refire");
    }

    #[test]
    fn test_pending_reminder_does_not_fire() {
        let (store, _dir) = store();
        store.save_active_spot(&parked_spot(30)).unwrap();

        let (daemon, mut rx) = daemon_with(&store);
        daemon.fire_due_reminders();

        assert!(rx.try_recv().is_err());

        // Reminder still set for the future scan
        let spot = store.active_spot("v1").unwrap().unwrap();
        assert!(spot.reminder_at.is_some());
    }

    #[test]
    fn test_unknown_vehicle_gets_generic_message() {
        let (store, _dir) = store();
        store.save_active_spot(&parked_spot(-1)).unwrap();

        let (daemon, mut rx) = daemon_with(&store);
        daemon.fire_due_reminders();

        let event = rx.try_recv().expect("Should fire a reminder");
        assert!(event.message.contains("Your vehicle"));
    }

    #[test]
    fn test_undelivered_event_keeps_reminder() {
        let (store, _dir) = store();
        store.save_active_spot(&parked_spot(-1)).unwrap();

        let (tx, rx) = mpsc::channel(16);
        drop(rx);
        let daemon = ReminderDaemon::new(store.clone(), tx);
        daemon.fire_due_reminders();

        // Delivery failed, so the reminder must survive for a retry
        let spot = store.active_spot("v1").unwrap().unwrap();
        assert!(spot.reminder_at.is_some());
    }

    #[tokio::test]
    async fn test_daemon_run_and_shutdown() {
        let (store, _dir) = store();
        store.save_active_spot(&parked_spot(-1)).unwrap();

        let (tx, mut rx) = mpsc::channel(16);
        let config = ReminderDaemonConfig {
            check_interval: Duration::from_millis(20),
        };
        let daemon = ReminderDaemon::with_config(store, tx, config);

        let shutdown = CancellationToken::new();
        let task = tokio::spawn(daemon.run(shutdown.clone()));

        let event = tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("Daemon should fire within one interval")
            .expect("Channel open");
        assert_eq!(event.spot_id, "s1");

        shutdown.cancel();
        task.await.unwrap();
    }
}
