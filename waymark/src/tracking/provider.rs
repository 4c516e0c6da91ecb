//! Consumer-facing traits for tracking data.
//!
//! Presentation code depends on these seams rather than on the concrete
//! session type:
//!
//! - [`TrackingProvider`] - Query API (pull)
//! - [`TrackingBroadcaster`] - Subscription API (push)

use tokio::sync::broadcast;

use crate::tracking::reading::TrackingReading;
use crate::tracking::session::SessionHandle;
use crate::tracking::state::{SignalStatus, TrackingStatus};

/// Trait for querying the current tracking state (pull API).
pub trait TrackingProvider: Send + Sync {
    /// Get the complete tracking status snapshot.
    fn status(&self) -> TrackingStatus;

    /// Get the latest reading, if any fix has been obtained.
    fn reading(&self) -> Option<TrackingReading>;

    /// Get the signal status.
    fn signal_status(&self) -> SignalStatus;

    /// Check whether a reading is available.
    fn has_reading(&self) -> bool;
}

/// Trait for subscribing to reading updates (push API).
pub trait TrackingBroadcaster: Send + Sync {
    /// Subscribe to reading updates.
    fn subscribe(&self) -> broadcast::Receiver<TrackingReading>;
}

impl TrackingProvider for SessionHandle {
    fn status(&self) -> TrackingStatus {
        SessionHandle::status(self)
    }

    fn reading(&self) -> Option<TrackingReading> {
        SessionHandle::reading(self)
    }

    fn signal_status(&self) -> SignalStatus {
        SessionHandle::signal_status(self)
    }

    fn has_reading(&self) -> bool {
        self.status().has_reading()
    }
}

impl TrackingBroadcaster for SessionHandle {
    fn subscribe(&self) -> broadcast::Receiver<TrackingReading> {
        SessionHandle::subscribe(self)
    }
}
