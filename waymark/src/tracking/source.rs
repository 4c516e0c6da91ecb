//! Location source abstraction.
//!
//! A [`LocationSource`] is the platform boundary: whatever produces
//! observer fixes (a device GPS, a network locator, a replay file in
//! tests) implements this trait and the tracking machinery stays
//! agnostic.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::tracking::state::ObserverSample;

/// Error type for failed position requests.
///
/// These are environmental conditions, not programmer errors: a session
/// absorbs them into [`SignalStatus::SignalLost`](super::SignalStatus)
/// and keeps trying rather than terminating.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PositionUnavailable {
    /// The user or platform denied access to location data.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The fix did not arrive in time.
    #[error("Location request timed out after {0:?}")]
    Timeout(Duration),

    /// The source cannot currently produce a fix (hardware or signal
    /// failure).
    #[error("No position fix available: {0}")]
    NoFix(String),
}

/// A supplier of observer position fixes.
///
/// Implementations provide both access patterns the tracking machinery
/// uses:
///
/// - [`current_position`](Self::current_position) - one-shot fix, used by
///   polled sessions (and callers that just want a single reading)
/// - [`watch_position`](Self::watch_position) - continuous subscription
///   delivered over a channel
///
/// # Subscription lifetime
///
/// Dropping the receiver returned by `watch_position` is the cancellation
/// signal: the source must stop producing fixes once its sender reports
/// the channel closed. This keeps platform location tracking (and its
/// battery cost) scoped to exactly the session that wants it.
pub trait LocationSource: Send + Sync + 'static {
    /// Request a single position fix.
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<ObserverSample, PositionUnavailable>> + Send;

    /// Subscribe to continuous position updates.
    ///
    /// Samples arrive at source-dependent, irregular intervals until the
    /// receiver is dropped.
    fn watch_position(&self) -> mpsc::Receiver<ObserverSample>;
}
