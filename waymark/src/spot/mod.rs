//! Parking-spot domain: vehicles, spots, fees, and reminders.
//!
//! A [`ParkingSpot`] records where a vehicle was left plus the
//! annotations a returning driver cares about (note, photos, fee
//! schedule, meter limit, reminder). The [`ReminderDaemon`] watches
//! active spots and fires each due reminder exactly once.

mod fee;
mod reminder;
mod types;

pub use fee::FeeSchedule;
pub use reminder::{ReminderDaemon, ReminderDaemonConfig, ReminderEvent};
pub use types::{format_hours_minutes, ParkingSpot, ReminderStatus, Vehicle, VehicleKind};
