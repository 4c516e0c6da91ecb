//! Tracking reading computation.
//!
//! A [`TrackingReading`] is the derived view the presentation layer
//! consumes: great-circle distance, initial bearing, a straight-line
//! walking ETA, and a display string for the distance. Readings are
//! transient - each one is superseded by the next and none are retained.

use crate::geo::{distance_meters, initial_bearing, Coordinate, GeoError};

/// Default pedestrian walking speed in meters per second.
pub const DEFAULT_WALKING_SPEED_MPS: f64 = 1.4;

/// Distance at which display switches from meters to kilometers.
const KM_DISPLAY_THRESHOLD_M: f64 = 1000.0;

/// A derived navigation reading from observer toward target.
///
/// Pure function of its inputs: identical inputs produce bit-identical
/// readings. No history is kept; consumers always want the latest value.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingReading {
    /// Great-circle distance to the target in meters.
    pub distance_meters: f64,

    /// Initial bearing toward the target in degrees (0-360, 0=north).
    ///
    /// Meaningless when the observer is at the target; check
    /// [`has_bearing`](Self::has_bearing) before rendering a compass.
    pub bearing_degrees: f64,

    /// Straight-line walking time estimate in whole minutes (rounded up).
    ///
    /// Intentionally approximate: not path-aware.
    pub eta_minutes: u32,

    /// Display string: integer meters below 1 km, one-decimal kilometers
    /// at or above ("999m", "1.0km", "1.5km").
    pub formatted_distance: String,
}

impl TrackingReading {
    /// Whether the bearing carries directional meaning.
    ///
    /// At the target there is no well-defined azimuth; the bearing field
    /// holds 0.0 but must not be rendered as "due north".
    pub fn has_bearing(&self) -> bool {
        self.distance_meters > 0.0
    }
}

/// Compute a tracking reading for an observer heading to a target.
///
/// # Arguments
///
/// * `target` - The fixed coordinate being navigated toward
/// * `observer` - The current observer position
/// * `walking_speed_mps` - Assumed walking speed in meters per second
///
/// # Errors
///
/// Returns [`GeoError::InvalidWalkingSpeed`] if the speed is not finite
/// or not greater than zero. Coordinate validity is guaranteed by the
/// [`Coordinate`] type, so there are no other error conditions.
///
/// # Example
///
/// ```
/// use waymark::geo::Coordinate;
/// use waymark::tracking::{compute_reading, DEFAULT_WALKING_SPEED_MPS};
///
/// let target = Coordinate::new(37.8044, -122.2712).unwrap();
/// let observer = Coordinate::new(37.7749, -122.4194).unwrap();
///
/// let reading = compute_reading(target, observer, DEFAULT_WALKING_SPEED_MPS).unwrap();
/// assert!(reading.distance_meters > 13_000.0);
/// assert!(reading.formatted_distance.ends_with("km"));
/// ```
pub fn compute_reading(
    target: Coordinate,
    observer: Coordinate,
    walking_speed_mps: f64,
) -> Result<TrackingReading, GeoError> {
    if !walking_speed_mps.is_finite() || walking_speed_mps <= 0.0 {
        return Err(GeoError::InvalidWalkingSpeed(walking_speed_mps));
    }

    let distance = distance_meters(observer, target);
    let bearing = initial_bearing(observer, target);
    let eta_minutes = (distance / walking_speed_mps / 60.0).ceil() as u32;

    Ok(TrackingReading {
        distance_meters: distance,
        bearing_degrees: bearing,
        eta_minutes,
        formatted_distance: format_distance(distance),
    })
}

/// Format a distance for display.
///
/// Below 1 km: floored integer meters with an "m" suffix. At or above:
/// kilometers with one decimal place and a "km" suffix.
pub fn format_distance(meters: f64) -> String {
    if meters >= KM_DISPLAY_THRESHOLD_M {
        format!("{:.1}km", meters / 1000.0)
    } else {
        format!("{}m", meters.floor() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SF: (f64, f64) = (37.7749, -122.4194);
    const OAKLAND: (f64, f64) = (37.8044, -122.2712);

    fn coord(pair: (f64, f64)) -> Coordinate {
        Coordinate::new(pair.0, pair.1).unwrap()
    }

    // ==================== compute_reading tests ====================

    #[test]
    fn test_reading_is_deterministic() {
        let target = coord(OAKLAND);
        let observer = coord(SF);

        let first = compute_reading(target, observer, 1.4).unwrap();
        let second = compute_reading(target, observer, 1.4).unwrap();

        // Bit-identical, not just approximately equal
        assert_eq!(first, second);
    }

    #[test]
    fn test_san_francisco_to_oakland_scenario() {
        let reading = compute_reading(coord(OAKLAND), coord(SF), 1.4).unwrap();

        assert!(
            (13_000.0..=13_500.0).contains(&reading.distance_meters),
            "Expected 13,000-13,500m, got {}",
            reading.distance_meters
        );
        // Oakland lies north of east from SF, so the azimuth sits below 90°
        assert!(
            (70.0..=82.0).contains(&reading.bearing_degrees),
            "Expected ~76°, got {}",
            reading.bearing_degrees
        );
        assert!(
            (155..=161).contains(&reading.eta_minutes),
            "Expected 155-161 min at 1.4 m/s, got {}",
            reading.eta_minutes
        );
        assert!(reading.has_bearing());
    }

    #[test]
    fn test_observer_at_target() {
        let point = coord(SF);
        let reading = compute_reading(point, point, 1.4).unwrap();

        assert_eq!(reading.distance_meters, 0.0);
        assert!(reading.bearing_degrees.is_finite());
        assert_eq!(reading.eta_minutes, 0);
        assert_eq!(reading.formatted_distance, "0m");
        assert!(
            !reading.has_bearing(),
            "Coincident points have no meaningful bearing"
        );
    }

    #[test]
    fn test_invalid_walking_speed_rejected() {
        let target = coord(OAKLAND);
        let observer = coord(SF);

        for speed in [0.0, -1.4, f64::NAN, f64::INFINITY] {
            let result = compute_reading(target, observer, speed);
            assert!(
                matches!(result, Err(GeoError::InvalidWalkingSpeed(_))),
                "Speed {} should be rejected",
                speed
            );
        }
    }

    #[test]
    fn test_eta_rounds_up() {
        // ~154m north of the equator origin: 154 / 1.4 / 60 = 1.83 min -> 2
        let target = coord((0.001385, 0.0));
        let observer = coord((0.0, 0.0));

        let reading = compute_reading(target, observer, 1.4).unwrap();
        assert_eq!(reading.eta_minutes, 2);
    }

    #[test]
    fn test_eta_monotonic_in_distance() {
        let observer = coord((0.0, 0.0));
        let mut last_eta = 0;

        for milli_deg in [0, 2, 5, 10, 50, 100, 500] {
            let target = coord((milli_deg as f64 / 1000.0, 0.0));
            let reading = compute_reading(target, observer, 1.4).unwrap();
            assert!(
                reading.eta_minutes >= last_eta,
                "ETA must not decrease as distance grows"
            );
            last_eta = reading.eta_minutes;
        }
    }

    #[test]
    fn test_faster_walker_arrives_sooner() {
        let target = coord(OAKLAND);
        let observer = coord(SF);

        let stroll = compute_reading(target, observer, 1.0).unwrap();
        let brisk = compute_reading(target, observer, 2.0).unwrap();

        assert!(brisk.eta_minutes < stroll.eta_minutes);
    }

    // ==================== format_distance tests ====================

    #[test]
    fn test_format_meters_below_threshold() {
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(42.7), "42m");
        assert_eq!(format_distance(999.0), "999m");
        assert_eq!(format_distance(999.9), "999m");
    }

    #[test]
    fn test_format_kilometers_at_threshold() {
        assert_eq!(format_distance(1000.0), "1.0km");
        assert_eq!(format_distance(1500.0), "1.5km");
        assert_eq!(format_distance(13_400.0), "13.4km");
    }
}
