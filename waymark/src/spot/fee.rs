//! Parking fee estimation.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Milliseconds in one billable hour.
const HOUR_MS: i64 = 3_600_000;

/// How a parking spot charges.
///
/// Hourly spots bill every started hour in full; a 61-minute stay costs
/// two hours. A zero-length stay bills nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeeSchedule {
    /// No charge.
    #[default]
    Free,
    /// Charged per started hour.
    Hourly { rate: u32 },
    /// Flat charge regardless of duration.
    Fixed { amount: u32 },
}

impl FeeSchedule {
    /// Amount owed for a stay of the given duration.
    pub fn amount_due(&self, parked: Duration) -> u32 {
        match self {
            Self::Free => 0,
            Self::Hourly { rate } => {
                let ms = parked.num_milliseconds().max(0);
                let hours = (ms as u64).div_ceil(HOUR_MS as u64);
                u32::try_from(hours)
                    .unwrap_or(u32::MAX)
                    .saturating_mul(*rate)
            }
            Self::Fixed { amount } => *amount,
        }
    }
}

impl std::fmt::Display for FeeSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Hourly { rate } => write!(f, "{}/hr", rate),
            Self::Fixed { amount } => write!(f, "{} fixed", amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_never_charges() {
        assert_eq!(FeeSchedule::Free.amount_due(Duration::hours(100)), 0);
    }

    #[test]
    fn test_hourly_bills_started_hours() {
        let schedule = FeeSchedule::Hourly { rate: 40 };

        assert_eq!(schedule.amount_due(Duration::zero()), 0);
        assert_eq!(schedule.amount_due(Duration::minutes(1)), 40);
        assert_eq!(schedule.amount_due(Duration::minutes(60)), 40);
        assert_eq!(schedule.amount_due(Duration::minutes(61)), 80);
        assert_eq!(schedule.amount_due(Duration::hours(3)), 120);
    }

    #[test]
    fn test_hourly_negative_duration_bills_nothing() {
        let schedule = FeeSchedule::Hourly { rate: 40 };
        assert_eq!(schedule.amount_due(Duration::minutes(-10)), 0);
    }

    #[test]
    fn test_fixed_is_flat() {
        let schedule = FeeSchedule::Fixed { amount: 60 };
        assert_eq!(schedule.amount_due(Duration::minutes(1)), 60);
        assert_eq!(schedule.amount_due(Duration::hours(12)), 60);
    }

    #[test]
    fn test_display() {
        assert_eq!(FeeSchedule::Free.to_string(), "free");
        assert_eq!(FeeSchedule::Hourly { rate: 40 }.to_string(), "40/hr");
        assert_eq!(FeeSchedule::Fixed { amount: 60 }.to_string(), "60 fixed");
    }

    #[test]
    fn test_serde_tagged_representation() {
        let json = serde_json::to_string(&FeeSchedule::Hourly { rate: 40 }).unwrap();
        assert_eq!(json, r#"{"type":"hourly","rate":40}"#);

        let back: FeeSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FeeSchedule::Hourly { rate: 40 });
    }
}
