//! Core state types for tracking sessions.
//!
//! This module defines the types shared across the tracking machinery:
//!
//! - [`ObserverSample`] - A position fix with its capture time
//! - [`SignalStatus`] - Is the location source producing fixes?
//! - [`SessionState`] - Lifecycle of a tracking session
//! - [`TrackingStatus`] - Complete snapshot for consumers

use std::time::Instant;

use crate::geo::Coordinate;
use crate::tracking::reading::TrackingReading;

/// A single observer position fix.
///
/// Produced by a [`LocationSource`](crate::tracking::LocationSource) at
/// device-dependent, irregular intervals. The timestamp lets consumers
/// judge freshness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverSample {
    /// Observer position.
    pub coordinate: Coordinate,

    /// When this fix was captured.
    pub timestamp: Instant,
}

impl ObserverSample {
    /// Create a sample captured now.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            timestamp: Instant::now(),
        }
    }

    /// Get the age of this sample.
    pub fn age(&self) -> std::time::Duration {
        self.timestamp.elapsed()
    }
}

/// Location signal status.
///
/// Replaces silent failure handling with an explicit state: a session
/// whose source stops producing fixes keeps its last reading but flags
/// the signal as lost, so consumers can render "awaiting signal" instead
/// of presenting stale data as current truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalStatus {
    /// No fix has been obtained yet.
    #[default]
    Unknown,
    /// Fixes are arriving within the configured timeout.
    Active,
    /// The source failed or went quiet; the last reading may be stale.
    SignalLost,
}

impl std::fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Active => write!(f, "Active"),
            Self::SignalLost => write!(f, "Signal lost"),
        }
    }
}

/// Tracking session lifecycle state.
///
/// Sessions move strictly forward: `Idle -> Active -> Stopped`. A stopped
/// session never becomes active again; callers create a new session
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created but not started.
    Idle,
    /// Running: the source subscription and refresh timer are live.
    Active,
    /// Cancelled; no further readings will be published.
    Stopped,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Active => write!(f, "Active"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Complete tracking status for consumers.
///
/// Provides everything the presentation layer needs: the latest reading
/// (if any fix has ever been obtained), the signal state, and when the
/// last fix arrived.
#[derive(Debug, Clone, Default)]
pub struct TrackingStatus {
    /// Most recent reading, if a fix has ever been obtained.
    pub reading: Option<TrackingReading>,

    /// Whether the location source is currently producing fixes.
    pub signal: SignalStatus,

    /// When the most recent fix arrived.
    pub last_fix: Option<Instant>,
}

impl TrackingStatus {
    /// Status before any fix has been obtained.
    pub fn awaiting_signal() -> Self {
        Self::default()
    }

    /// Check whether a reading is available.
    pub fn has_reading(&self) -> bool {
        self.reading.is_some()
    }
}
