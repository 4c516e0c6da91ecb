//! Replay location source - plays a recorded walk back as live fixes.
//!
//! A replay file is a JSON array of samples:
//!
//! ```json
//! [
//!   { "latitude": 37.7749, "longitude": -122.4194, "delay_ms": 0 },
//!   { "latitude": 37.7790, "longitude": -122.4000, "delay_ms": 2000 }
//! ]
//! ```
//!
//! Each sample is delivered after its delay, then the watch ends - which
//! exercises the session's signal-lost handling the same way a real GPS
//! dropout would.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::debug;

use waymark::geo::{Coordinate, GeoError};
use waymark::tracking::{LocationSource, ObserverSample, PositionUnavailable};

/// Error type for replay file loading.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Failed to read the file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON of the expected shape.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A sample carries an out-of-range coordinate.
    #[error("Invalid sample {index} in {path}: {source}")]
    InvalidSample {
        path: PathBuf,
        index: usize,
        #[source]
        source: GeoError,
    },

    /// The file contains no samples.
    #[error("Replay file {path} contains no samples")]
    Empty { path: PathBuf },
}

/// On-disk sample representation.
#[derive(Debug, Deserialize)]
struct ReplaySample {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    delay_ms: u64,
}

/// A [`LocationSource`] that replays recorded fixes.
pub struct ReplayLocationSource {
    samples: Vec<(Coordinate, Duration)>,
    /// Cursor for one-shot requests.
    next: Mutex<usize>,
}

impl ReplayLocationSource {
    /// Load a replay from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ReplayError> {
        let data = std::fs::read(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: Vec<ReplaySample> =
            serde_json::from_slice(&data).map_err(|source| ReplayError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut samples = Vec::with_capacity(raw.len());
        for (index, sample) in raw.into_iter().enumerate() {
            let coordinate = Coordinate::new(sample.latitude, sample.longitude).map_err(
                |source| ReplayError::InvalidSample {
                    path: path.to_path_buf(),
                    index,
                    source,
                },
            )?;
            samples.push((coordinate, Duration::from_millis(sample.delay_ms)));
        }

        if samples.is_empty() {
            return Err(ReplayError::Empty {
                path: path.to_path_buf(),
            });
        }

        debug!(path = %path.display(), count = samples.len(), "Replay loaded");
        Ok(Self::new(samples))
    }

    /// Build a replay from in-memory samples.
    pub fn new(samples: Vec<(Coordinate, Duration)>) -> Self {
        Self {
            samples,
            next: Mutex::new(0),
        }
    }

    /// Number of samples in the replay.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the replay holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total wall-clock time the replay takes to deliver.
    pub fn duration(&self) -> Duration {
        self.samples.iter().map(|(_, delay)| *delay).sum()
    }
}

impl LocationSource for ReplayLocationSource {
    async fn current_position(&self) -> Result<ObserverSample, PositionUnavailable> {
        let index = {
            let mut next = self.next.lock().expect("replay cursor");
            let index = *next;
            // Stay on the final sample once the script runs out
            *next = (index + 1).min(self.samples.len().saturating_sub(1));
            index
        };

        match self.samples.get(index) {
            Some((coordinate, _)) => Ok(ObserverSample::new(*coordinate)),
            None => Err(PositionUnavailable::NoFix("replay exhausted".to_string())),
        }
    }

    fn watch_position(&self) -> mpsc::Receiver<ObserverSample> {
        let (tx, rx) = mpsc::channel(16);
        let samples = self.samples.clone();

        tokio::spawn(async move {
            for (coordinate, delay) in samples {
                tokio::time::sleep(delay).await;
                if tx.send(ObserverSample::new(coordinate)).await.is_err() {
                    // Session cancelled; stop replaying
                    break;
                }
            }
        });

        rx
    }
}
