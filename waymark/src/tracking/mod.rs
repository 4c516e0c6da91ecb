//! Live tracking toward a parked vehicle.
//!
//! This module turns a fixed target coordinate and a stream of observer
//! fixes into a continuously refreshed [`TrackingReading`] (distance,
//! bearing, walking ETA).
//!
//! # Architecture
//!
//! A [`TrackingSession`] owns everything with a lifetime: the
//! [`LocationSource`] subscription, the refresh timer, and the working
//! status. The returned [`SessionHandle`] is the single point of control -
//! cancelling it (explicitly or by dropping it) releases the subscription
//! and timer, and no reading is published afterwards.
//!
//! Consumers read the session two ways:
//!
//! - **Pull**: [`SessionHandle::status`] returns the latest
//!   [`TrackingStatus`] snapshot at any time.
//! - **Push**: [`SessionHandle::subscribe`] yields a broadcast receiver
//!   of readings as they are recomputed.
//!
//! # Signal discipline
//!
//! Environmental failures (permission denied, no GPS fix, a source gone
//! quiet) are steady-state conditions, not errors: the session flags
//! [`SignalStatus::SignalLost`], keeps the last reading, and tries again
//! on the next tick or sample. Only invalid caller input (bad walking
//! speed, zero interval) fails loudly, at construction.
//!
//! # Usage
//!
//! ```ignore
//! use waymark::geo::Coordinate;
//! use waymark::tracking::{TrackingSession, SignalStatus};
//!
//! let target = Coordinate::new(37.8044, -122.2712)?;
//! let handle = TrackingSession::new(target, gps).start();
//!
//! match handle.status().reading {
//!     Some(reading) => println!("{} away", reading.formatted_distance),
//!     None => println!("Awaiting signal"),
//! }
//!
//! handle.shutdown().await; // or just drop it
//! ```

mod provider;
mod reading;
mod session;
mod source;
mod state;

pub use provider::{TrackingBroadcaster, TrackingProvider};
pub use reading::{compute_reading, format_distance, TrackingReading, DEFAULT_WALKING_SPEED_MPS};
pub use session::{
    RefreshStrategy, SessionError, SessionHandle, TrackingSession, TrackingSessionConfig,
};
pub use source::{LocationSource, PositionUnavailable};
pub use state::{ObserverSample, SessionState, SignalStatus, TrackingStatus};
