//! JSON-backed persistence for vehicles, active spots, and history.
//!
//! The store keeps one JSON file per collection under a root directory:
//!
//! - `vehicles.json` - registered vehicles
//! - `active_spots.json` - vehicle id → active parking spot
//! - `history.json` - cleared spots, newest first, capped at
//!   [`HISTORY_LIMIT`]
//!
//! Every operation reads and writes the whole file; the data volumes
//! here (one household's vehicles and parking history) make that the
//! simplest correct choice. Writes go through a temp file and rename so
//! a crash never leaves a half-written collection behind.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::spot::{ParkingSpot, Vehicle};

/// Maximum number of history entries retained.
pub const HISTORY_LIMIT: usize = 50;

const VEHICLES_FILE: &str = "vehicles.json";
const ACTIVE_SPOTS_FILE: &str = "active_spots.json";
const HISTORY_FILE: &str = "history.json";

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to create the store directory.
    #[error("Failed to create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read a collection file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a collection file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A collection file exists but does not parse.
    #[error("Malformed data in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed parking store.
///
/// Cheap to clone; every handle points at the same directory.
#[derive(Debug, Clone)]
pub struct ParkingStore {
    root: PathBuf,
}

impl ParkingStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::CreateDir {
            path: root.clone(),
            source,
        })?;
        debug!(root = %root.display(), "Parking store opened");
        Ok(Self { root })
    }

    /// Directory this store lives in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All registered vehicles.
    pub fn vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        self.read_or_default(VEHICLES_FILE)
    }

    /// Replace the vehicle list.
    pub fn save_vehicles(&self, vehicles: &[Vehicle]) -> Result<(), StoreError> {
        self.write_atomic(VEHICLES_FILE, &vehicles)
    }

    /// All active spots, keyed by vehicle id.
    pub fn active_spots(&self) -> Result<BTreeMap<String, ParkingSpot>, StoreError> {
        self.read_or_default(ACTIVE_SPOTS_FILE)
    }

    /// The active spot for one vehicle, if any.
    pub fn active_spot(&self, vehicle_id: &str) -> Result<Option<ParkingSpot>, StoreError> {
        Ok(self.active_spots()?.remove(vehicle_id))
    }

    /// Record or replace the active spot for the spot's vehicle.
    pub fn save_active_spot(&self, spot: &ParkingSpot) -> Result<(), StoreError> {
        let mut spots = self.active_spots()?;
        spots.insert(spot.vehicle_id.clone(), spot.clone());
        self.write_atomic(ACTIVE_SPOTS_FILE, &spots)
    }

    /// Clear the active spot for a vehicle, archiving it into history.
    ///
    /// History keeps the newest entries first and never grows past
    /// [`HISTORY_LIMIT`]. Returns the archived spot, or `None` if the
    /// vehicle had no active spot.
    pub fn clear_active_spot(
        &self,
        vehicle_id: &str,
    ) -> Result<Option<ParkingSpot>, StoreError> {
        let mut spots = self.active_spots()?;
        let Some(spot) = spots.remove(vehicle_id) else {
            return Ok(None);
        };

        let mut history = self.history()?;
        history.insert(0, spot.clone());
        history.truncate(HISTORY_LIMIT);

        self.write_atomic(HISTORY_FILE, &history)?;
        self.write_atomic(ACTIVE_SPOTS_FILE, &spots)?;

        debug!(vehicle_id, spot_id = %spot.id, "Active spot archived");
        Ok(Some(spot))
    }

    /// Cleared spots, newest first.
    pub fn history(&self) -> Result<Vec<ParkingSpot>, StoreError> {
        self.read_or_default(HISTORY_FILE)
    }

    /// Read a collection, treating a missing file as the empty default.
    fn read_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StoreError> {
        let path = self.root.join(name);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        serde_json::from_slice(&data).map_err(|source| StoreError::Malformed { path, source })
    }

    /// Write a collection atomically via temp file + rename.
    fn write_atomic<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let path = self.root.join(name);
        let tmp = self.root.join(format!("{name}.tmp"));

        let data = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Malformed {
            path: path.clone(),
            source,
        })?;

        fs::write(&tmp, data).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Write { path, source })
    }
}
