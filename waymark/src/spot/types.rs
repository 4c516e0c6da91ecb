//! Core types for vehicles and parking spots.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::spot::fee::FeeSchedule;

/// Vehicle category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    #[default]
    Sedan,
    Suv,
    Ev,
    Truck,
    Bike,
}

impl std::fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sedan => write!(f, "Sedan"),
            Self::Suv => write!(f, "SUV"),
            Self::Ev => write!(f, "EV"),
            Self::Truck => write!(f, "Truck"),
            Self::Bike => write!(f, "Bike"),
        }
    }
}

/// A registered vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Stable identifier.
    pub id: String,

    /// Display name ("Main Ride").
    pub name: String,

    /// Manufacturer model.
    pub model: String,

    /// License plate.
    pub plate_number: String,

    /// Vehicle category.
    #[serde(default)]
    pub kind: VehicleKind,
}

impl Vehicle {
    /// Create a vehicle record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        model: impl Into<String>,
        plate_number: impl Into<String>,
        kind: VehicleKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model: model.into(),
            plate_number: plate_number.into(),
            kind,
        }
    }
}

/// Reminder state of a parking spot at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderStatus {
    /// No reminder is set.
    None,
    /// Reminder is set and has not fired yet.
    Pending(Duration),
    /// The reminder time has passed.
    Due,
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "No reminder"),
            Self::Pending(remaining) => {
                let secs = remaining.num_seconds().max(0);
                write!(f, "{}m {}s left", secs / 60, secs % 60)
            }
            Self::Due => write!(f, "Triggered"),
        }
    }
}

/// A recorded parking spot.
///
/// One spot may be active per vehicle at a time; cleared spots move to
/// the history. Wall-clock timestamps are used throughout so records
/// survive serialization across process restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    /// Stable identifier.
    pub id: String,

    /// The vehicle parked here.
    pub vehicle_id: String,

    /// Where the vehicle is.
    pub location: Coordinate,

    /// Street address, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Free-form context ("Level 3, pillar B7").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Nearby landmarks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<String>,

    /// Paths to captured photos.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<std::path::PathBuf>,

    /// When the vehicle was parked.
    pub parked_at: DateTime<Utc>,

    /// When to remind the user, if a reminder is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_at: Option<DateTime<Utc>>,

    /// Fee schedule for this spot.
    #[serde(default)]
    pub fee: FeeSchedule,

    /// Parking-meter limit in minutes, if the spot is metered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_limit_minutes: Option<u32>,
}

impl ParkingSpot {
    /// Create a spot parked now with no annotations.
    pub fn new(
        id: impl Into<String>,
        vehicle_id: impl Into<String>,
        location: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            location,
            address: None,
            note: None,
            landmarks: Vec::new(),
            photos: Vec::new(),
            parked_at: Utc::now(),
            reminder_at: None,
            fee: FeeSchedule::default(),
            meter_limit_minutes: None,
        }
    }

    /// How long the vehicle has been parked as of `now`.
    ///
    /// Clock skew can make a persisted `parked_at` land in the future;
    /// the duration is clamped to zero rather than going negative.
    pub fn parked_duration(&self, now: DateTime<Utc>) -> Duration {
        (now - self.parked_at).max(Duration::zero())
    }

    /// Fee owed as of `now` under this spot's schedule.
    pub fn fee_due(&self, now: DateTime<Utc>) -> u32 {
        self.fee.amount_due(self.parked_duration(now))
    }

    /// Set a reminder to fire after `minutes` from `now`.
    pub fn set_reminder(&mut self, now: DateTime<Utc>, minutes: i64) {
        self.reminder_at = Some(now + Duration::minutes(minutes));
    }

    /// Remove any reminder.
    pub fn clear_reminder(&mut self) {
        self.reminder_at = None;
    }

    /// Reminder state as of `now`.
    pub fn reminder_status(&self, now: DateTime<Utc>) -> ReminderStatus {
        match self.reminder_at {
            None => ReminderStatus::None,
            Some(at) if at <= now => ReminderStatus::Due,
            Some(at) => ReminderStatus::Pending(at - now),
        }
    }
}

/// Format a duration as zero-padded hours and minutes ("02h 05m").
pub fn format_hours_minutes(duration: Duration) -> String {
    let total_secs = duration.num_seconds().max(0);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    format!("{:02}h {:02}m", hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Coordinate {
        Coordinate::new(18.5204, 73.8567).unwrap()
    }

    fn spot() -> ParkingSpot {
        ParkingSpot::new("s1", "v1", location())
    }

    #[test]
    fn test_new_spot_defaults() {
        let spot = spot();
        assert_eq!(spot.fee, FeeSchedule::Free);
        assert!(spot.reminder_at.is_none());
        assert!(spot.note.is_none());
        assert!(spot.photos.is_empty());
    }

    #[test]
    fn test_parked_duration() {
        let mut spot = spot();
        let now = Utc::now();
        spot.parked_at = now - Duration::minutes(90);

        let parked = spot.parked_duration(now);
        assert_eq!(parked.num_minutes(), 90);
    }

    #[test]
    fn test_parked_duration_clamps_future_timestamp() {
        let mut spot = spot();
        let now = Utc::now();
        spot.parked_at = now + Duration::minutes(5);

        assert_eq!(spot.parked_duration(now), Duration::zero());
    }

    #[test]
    fn test_reminder_lifecycle() {
        let mut spot = spot();
        let now = Utc::now();

        assert_eq!(spot.reminder_status(now), ReminderStatus::None);

        spot.set_reminder(now, 30);
        match spot.reminder_status(now) {
            ReminderStatus::Pending(remaining) => {
                assert_eq!(remaining.num_minutes(), 30);
            }
            other => panic!("Expected pending reminder, got {:?}", other),
        }

        // Past the reminder time
        let later = now + Duration::minutes(31);
        assert_eq!(spot.reminder_status(later), ReminderStatus::Due);

        spot.clear_reminder();
        assert_eq!(spot.reminder_status(later), ReminderStatus::None);
    }

    #[test]
    fn test_reminder_status_display() {
        assert_eq!(ReminderStatus::None.to_string(), "No reminder");
        assert_eq!(ReminderStatus::Due.to_string(), "Triggered");
        assert_eq!(
            ReminderStatus::Pending(Duration::seconds(150)).to_string(),
            "2m 30s left"
        );
    }

    #[test]
    fn test_format_hours_minutes() {
        assert_eq!(format_hours_minutes(Duration::zero()), "00h 00m");
        assert_eq!(format_hours_minutes(Duration::minutes(5)), "00h 05m");
        assert_eq!(
            format_hours_minutes(Duration::hours(2) + Duration::minutes(5)),
            "02h 05m"
        );
        assert_eq!(format_hours_minutes(Duration::hours(27)), "27h 00m");
    }

    #[test]
    fn test_spot_serde_round_trip() {
        let mut spot = spot();
        spot.note = Some("Level 3, pillar B7".to_string());
        spot.fee = FeeSchedule::Hourly { rate: 40 };
        spot.set_reminder(Utc::now(), 60);

        let json = serde_json::to_string(&spot).unwrap();
        let back: ParkingSpot = serde_json::from_str(&json).unwrap();
        assert_eq!(spot, back);
    }

    #[test]
    fn test_vehicle_serde_defaults_kind() {
        let json = r#"{"id":"v1","name":"Main Ride","model":"Model 3","plate_number":"MH-12-PA-777"}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.kind, VehicleKind::Sedan);
    }

    #[test]
    fn test_vehicle_kind_display() {
        assert_eq!(VehicleKind::Ev.to_string(), "EV");
        assert_eq!(VehicleKind::Bike.to_string(), "Bike");
    }
}
