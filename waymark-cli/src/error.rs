//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use waymark::geo::GeoError;
use waymark::store::StoreError;
use waymark::tracking::SessionError;

use crate::replay::ReplayError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Store operation failed
    Store(StoreError),
    /// Invalid coordinate or speed on the command line
    Geo(GeoError),
    /// Invalid tracking configuration
    Session(SessionError),
    /// Failed to load a replay file
    Replay(ReplayError),
    /// No vehicle matches the given id
    UnknownVehicle(String),
    /// A vehicle with the given id is already registered
    DuplicateVehicle(String),
    /// The vehicle already has an active spot
    AlreadyParked { vehicle: String, spot_id: String },
    /// The vehicle has no active spot
    NoActiveSpot(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::AlreadyParked { vehicle, .. } => {
                eprintln!();
                eprintln!("Clear the existing spot first:");
                eprintln!("  waymark clear --vehicle {}", vehicle);
            }
            CliError::NoActiveSpot(vehicle) => {
                eprintln!();
                eprintln!("Record a spot first:");
                eprintln!("  waymark park --vehicle {} --lat <LAT> --lon <LON>", vehicle);
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Store(e) => write!(f, "Store error: {}", e),
            CliError::Geo(e) => write!(f, "{}", e),
            CliError::Session(e) => write!(f, "Invalid tracking configuration: {}", e),
            CliError::Replay(e) => write!(f, "Failed to load replay: {}", e),
            CliError::UnknownVehicle(id) => write!(f, "No vehicle with id '{}'", id),
            CliError::DuplicateVehicle(id) => {
                write!(f, "A vehicle with id '{}' is already registered", id)
            }
            CliError::AlreadyParked { vehicle, spot_id } => {
                write!(f, "Vehicle '{}' already has active spot '{}'", vehicle, spot_id)
            }
            CliError::NoActiveSpot(vehicle) => {
                write!(f, "Vehicle '{}' has no active parking spot", vehicle)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Store(e) => Some(e),
            CliError::Geo(e) => Some(e),
            CliError::Session(e) => Some(e),
            CliError::Replay(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}

impl From<GeoError> for CliError {
    fn from(e: GeoError) -> Self {
        CliError::Geo(e)
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        CliError::Session(e)
    }
}

impl From<ReplayError> for CliError {
    fn from(e: ReplayError) -> Self {
        CliError::Replay(e)
    }
}
