//! Geographic type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Valid latitude range in degrees
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range in degrees
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A WGS-84 geographic coordinate in decimal degrees.
///
/// Construction is validated: latitude must lie in [-90, 90] and longitude
/// in [-180, 180]. Out-of-range input is rejected, never clamped, so any
/// `Coordinate` in circulation satisfies the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude/longitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidLatitude`] or [`GeoError::InvalidLongitude`]
    /// if either component is out of range or not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use waymark::geo::Coordinate;
    ///
    /// let sf = Coordinate::new(37.7749, -122.4194).unwrap();
    /// assert_eq!(sf.latitude(), 37.7749);
    ///
    /// assert!(Coordinate::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees north (-90 to 90).
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees east (-180 to 180).
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Serde-facing representation without the range invariant.
#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(coord: Coordinate) -> Self {
        RawCoordinate {
            latitude: coord.latitude,
            longitude: coord.longitude,
        }
    }
}

/// Errors that can occur when constructing geographic values.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Latitude is outside valid range (-90 to 90) or not finite
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180 to 180) or not finite
    InvalidLongitude(f64),
    /// Walking speed must be finite and greater than zero
    InvalidWalkingSpeed(f64),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            GeoError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
            GeoError::InvalidWalkingSpeed(speed) => {
                write!(
                    f,
                    "Invalid walking speed: {} m/s (must be greater than zero)",
                    speed
                )
            }
        }
    }
}

impl std::error::Error for GeoError {}
