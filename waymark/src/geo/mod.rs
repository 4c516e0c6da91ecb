//! Geodesic math for walking navigation.
//!
//! This module provides the great-circle distance and initial-bearing
//! calculations used when guiding a pedestrian back to a parked vehicle.
//! All math uses the spherical earth approximation, which is accurate to
//! well under 0.5% at walking distances.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Bearing: degrees true (0-360, 0=north, 90=east)
//! - Distance: meters

mod types;

pub use types::{Coordinate, GeoError, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

use std::f64::consts::PI;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = PI / 180.0;

/// Radians to degrees conversion factor.
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Calculate the great-circle distance between two coordinates.
///
/// Uses the haversine formula, which is numerically stable at the short
/// distances this crate deals in.
///
/// # Arguments
///
/// * `from` - Observer position
/// * `to` - Target position
///
/// # Returns
///
/// Distance in meters. Coincident points yield exactly 0.0.
///
/// # Example
///
/// ```
/// use waymark::geo::{distance_meters, Coordinate};
///
/// // 1 degree of latitude is approximately 111 km
/// let a = Coordinate::new(0.0, 0.0).unwrap();
/// let b = Coordinate::new(1.0, 0.0).unwrap();
/// let dist = distance_meters(a, b);
/// assert!((dist - 111_195.0).abs() < 100.0);
/// ```
pub fn distance_meters(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude() * DEG_TO_RAD;
    let lat2_rad = to.latitude() * DEG_TO_RAD;
    let delta_lat = (to.latitude() - from.latitude()) * DEG_TO_RAD;
    let delta_lon = (to.longitude() - from.longitude()) * DEG_TO_RAD;

    // Haversine formula
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Calculate the initial bearing from one coordinate to another.
///
/// Returns the forward azimuth (direction to travel from `from` toward
/// `to`) along the great-circle path. The bearing changes along the path;
/// this is the value at the starting point.
///
/// # Arguments
///
/// * `from` - Observer position
/// * `to` - Target position
///
/// # Returns
///
/// Bearing in degrees (0-360, 0=north, 90=east). Coincident points yield
/// 0.0, which carries no directional meaning - callers must treat it as
/// "no azimuth", not "due north".
///
/// # Example
///
/// ```
/// use waymark::geo::{initial_bearing, Coordinate};
///
/// // Bearing from the origin to a point due east
/// let origin = Coordinate::new(0.0, 0.0).unwrap();
/// let east = Coordinate::new(0.0, 1.0).unwrap();
/// let bearing = initial_bearing(origin, east);
/// assert!((bearing - 90.0).abs() < 0.1);
/// ```
pub fn initial_bearing(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude() * DEG_TO_RAD;
    let lat2_rad = to.latitude() * DEG_TO_RAD;
    let delta_lon = (to.longitude() - from.longitude()) * DEG_TO_RAD;

    let y = delta_lon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    let bearing_deg = y.atan2(x) * RAD_TO_DEG;

    // Normalize from (-180, 180] to [0, 360)
    (bearing_deg + 360.0) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    // ==================== distance_meters tests ====================

    #[test]
    fn test_distance_one_degree_latitude() {
        // 1 degree of latitude is ~111.2 km on the mean sphere
        let dist = distance_meters(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!(
            (dist - 111_195.0).abs() < 100.0,
            "1° lat should be ~111.2km, got {}",
            dist
        );
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        let dist = distance_meters(coord(45.0, -122.0), coord(45.0, -122.0));
        assert_eq!(dist, 0.0, "Same point should have exactly zero distance");
    }

    #[test]
    fn test_distance_symmetry() {
        let a = coord(45.0, -122.0);
        let b = coord(46.0, -121.0);

        let dist_ab = distance_meters(a, b);
        let dist_ba = distance_meters(b, a);

        let relative = (dist_ab - dist_ba).abs() / dist_ab;
        assert!(
            relative < 1e-6,
            "Distance should be symmetric within 1e-6 relative, diff {}",
            relative
        );
    }

    #[test]
    fn test_distance_san_francisco_to_oakland() {
        // Downtown SF to downtown Oakland is ~13.4km
        let sf = coord(37.7749, -122.4194);
        let oakland = coord(37.8044, -122.2712);
        let dist = distance_meters(sf, oakland);

        assert!(
            (13_000.0..=13_500.0).contains(&dist),
            "Expected 13,000-13,500m, got {}",
            dist
        );
    }

    #[test]
    fn test_distance_across_antimeridian() {
        // Points either side of the ±180 meridian are close, not half a
        // world apart
        let west = coord(0.0, 179.9);
        let east = coord(0.0, -179.9);
        let dist = distance_meters(west, east);

        assert!(
            dist < 25_000.0,
            "0.2° across the antimeridian should be ~22km, got {}",
            dist
        );
    }

    // ==================== initial_bearing tests ====================

    #[test]
    fn test_bearing_north() {
        let bearing = initial_bearing(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!(
            bearing.abs() < 0.5 || (bearing - 360.0).abs() < 0.5,
            "Due north should be ~0°, got {}",
            bearing
        );
    }

    #[test]
    fn test_bearing_east() {
        let bearing = initial_bearing(coord(0.0, 0.0), coord(0.0, 1.0));
        assert!(
            (bearing - 90.0).abs() < 0.5,
            "Due east should be ~90°, got {}",
            bearing
        );
    }

    #[test]
    fn test_bearing_south() {
        let bearing = initial_bearing(coord(1.0, 0.0), coord(0.0, 0.0));
        assert!(
            (bearing - 180.0).abs() < 0.5,
            "Due south should be ~180°, got {}",
            bearing
        );
    }

    #[test]
    fn test_bearing_west() {
        let bearing = initial_bearing(coord(0.0, 0.0), coord(0.0, -1.0));
        assert!(
            (bearing - 270.0).abs() < 0.5,
            "Due west should be ~270°, got {}",
            bearing
        );
    }

    #[test]
    fn test_bearing_always_in_range() {
        let pairs = [
            (coord(37.7749, -122.4194), coord(37.8044, -122.2712)),
            (coord(51.5074, -0.1278), coord(48.8566, 2.3522)),
            (coord(-33.8688, 151.2093), coord(35.6762, 139.6503)),
            (coord(0.0, 179.9), coord(0.0, -179.9)),
        ];

        for (from, to) in pairs {
            let bearing = initial_bearing(from, to);
            assert!(
                (0.0..360.0).contains(&bearing),
                "Bearing {} out of [0, 360) for {} -> {}",
                bearing,
                from,
                to
            );
        }
    }

    #[test]
    fn test_bearing_not_symmetric() {
        // London -> Paris and Paris -> London differ by roughly 180°, but
        // not exactly, because the great circle is not a rhumb line
        let london = coord(51.5074, -0.1278);
        let paris = coord(48.8566, 2.3522);

        let out = initial_bearing(london, paris);
        let back = initial_bearing(paris, london);

        let diff = (back - out - 180.0).abs();
        assert!(
            diff > 0.5 && diff < 10.0,
            "Reverse bearing should differ from out+180° by a small angle, got {}",
            diff
        );
    }

    #[test]
    fn test_bearing_coincident_points_finite() {
        let bearing = initial_bearing(coord(45.0, 10.0), coord(45.0, 10.0));
        assert!(bearing.is_finite());
        assert_eq!(bearing, 0.0);
    }
}
