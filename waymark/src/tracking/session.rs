//! Tracking session - a live, cancellable reading refresh loop.
//!
//! A session owns its location subscription and refresh timer outright.
//! Nothing leaks past cancellation: dropping or cancelling the
//! [`SessionHandle`] stops the timer and releases the source
//! subscription, and no reading is ever published afterwards.
//!
//! # Refresh strategies
//!
//! - [`RefreshStrategy::Watch`] - subscribe to continuous updates and
//!   recompute on every sample and every timer tick (live navigation).
//! - [`RefreshStrategy::Poll`] - issue a bounded one-shot fix request on
//!   every tick (the stationary spot-detail case, where a continuous
//!   subscription is not worth its battery cost).
//!
//! # Signal discipline
//!
//! Source failures never terminate a session. A failed or absent fix
//! flips the status to `SignalLost` while the last reading is retained,
//! and the next tick or sample tries again.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::geo::{Coordinate, GeoError};
use crate::tracking::reading::{compute_reading, TrackingReading, DEFAULT_WALKING_SPEED_MPS};
use crate::tracking::source::LocationSource;
use crate::tracking::state::{ObserverSample, SessionState, SignalStatus, TrackingStatus};

/// Capacity of the readings broadcast channel.
const READINGS_CHANNEL_CAPACITY: usize = 16;

/// How the session obtains observer samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshStrategy {
    /// Continuous subscription via `watch_position`.
    #[default]
    Watch,
    /// One-shot `current_position` request per tick.
    Poll,
}

/// Error type for session construction.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Invalid geometry parameter in the configuration.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// The refresh interval must be non-zero.
    #[error("Tick interval must be non-zero")]
    ZeroTickInterval,
}

/// Tracking session configuration.
#[derive(Debug, Clone)]
pub struct TrackingSessionConfig {
    /// Cadence of the refresh timer.
    pub tick_interval: Duration,

    /// Assumed walking speed for ETA computation.
    pub walking_speed_mps: f64,

    /// Oldest a sample may be before the signal counts as lost.
    pub signal_timeout: Duration,

    /// Upper bound on a one-shot fix request (poll strategy). A request
    /// that never resolves must not leave the reading perpetually stale.
    pub fix_timeout: Duration,

    /// How observer samples are obtained.
    pub strategy: RefreshStrategy,
}

impl Default for TrackingSessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(3),
            walking_speed_mps: DEFAULT_WALKING_SPEED_MPS,
            signal_timeout: Duration::from_secs(15),
            fix_timeout: Duration::from_secs(10),
            strategy: RefreshStrategy::Watch,
        }
    }
}

/// A tracking session that has not been started yet.
///
/// Holds the target, the location source, and the configuration. Call
/// [`start`](Self::start) to spawn the refresh loop and obtain a
/// [`SessionHandle`].
pub struct TrackingSession<S: LocationSource> {
    target: Coordinate,
    source: S,
    config: TrackingSessionConfig,
}

impl<S: LocationSource> TrackingSession<S> {
    /// Create a session with the default configuration.
    pub fn new(target: Coordinate, source: S) -> Self {
        Self {
            target,
            source,
            config: TrackingSessionConfig::default(),
        }
    }

    /// Create a session with a custom configuration.
    ///
    /// # Errors
    ///
    /// Rejects a non-positive walking speed or a zero tick interval.
    /// Invalid parameters indicate a caller bug and fail loudly here
    /// rather than being absorbed at runtime.
    pub fn with_config(
        target: Coordinate,
        source: S,
        config: TrackingSessionConfig,
    ) -> Result<Self, SessionError> {
        if !config.walking_speed_mps.is_finite() || config.walking_speed_mps <= 0.0 {
            return Err(GeoError::InvalidWalkingSpeed(config.walking_speed_mps).into());
        }
        if config.tick_interval.is_zero() {
            return Err(SessionError::ZeroTickInterval);
        }
        Ok(Self {
            target,
            source,
            config,
        })
    }

    /// Get the target coordinate.
    pub fn target(&self) -> Coordinate {
        self.target
    }

    /// Lifecycle state of an unstarted session.
    pub fn state(&self) -> SessionState {
        SessionState::Idle
    }

    /// Start the session.
    ///
    /// Spawns the refresh loop and returns a handle owning the
    /// cancellation token. The handle cancels the session when dropped.
    pub fn start(self) -> SessionHandle {
        let cancel = CancellationToken::new();
        let shared = Arc::new(RwLock::new(TrackingStatus::awaiting_signal()));
        let (readings_tx, _) = broadcast::channel(READINGS_CHANNEL_CAPACITY);

        let worker = SessionWorker {
            target: self.target,
            source: self.source,
            config: self.config.clone(),
            cancel: cancel.clone(),
            shared: Arc::clone(&shared),
            readings_tx: readings_tx.clone(),
            current: TrackingStatus::awaiting_signal(),
            latest_sample: None,
        };

        let task = tokio::spawn(worker.run());

        SessionHandle {
            cancel,
            shared,
            readings_tx,
            task: Some(task),
        }
    }
}

/// Handle to a running tracking session.
///
/// Combines the pull API ([`status`](Self::status)), the push API
/// ([`subscribe`](Self::subscribe)), and lifecycle control. Dropping the
/// handle cancels the session, so the location subscription can never
/// outlive its owner.
pub struct SessionHandle {
    cancel: CancellationToken,
    shared: Arc<RwLock<TrackingStatus>>,
    readings_tx: broadcast::Sender<TrackingReading>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl SessionHandle {
    /// Get the current tracking status snapshot.
    pub fn status(&self) -> TrackingStatus {
        self.shared.read().unwrap().clone()
    }

    /// Get the latest reading, if any fix has been obtained.
    pub fn reading(&self) -> Option<TrackingReading> {
        self.status().reading
    }

    /// Get the current signal status.
    pub fn signal_status(&self) -> SignalStatus {
        self.status().signal
    }

    /// Subscribe to reading updates.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackingReading> {
        self.readings_tx.subscribe()
    }

    /// Cancel the session.
    ///
    /// Stops the refresh timer and releases the location subscription.
    /// Idempotent: cancelling an already-stopped session has no effect.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Lifecycle state: `Active` until cancelled, `Stopped` after.
    ///
    /// A stopped session never re-enters `Active`; start a new session
    /// instead.
    pub fn state(&self) -> SessionState {
        if self.cancel.is_cancelled() {
            SessionState::Stopped
        } else {
            SessionState::Active
        }
    }

    /// Check whether the session is still active.
    pub fn is_active(&self) -> bool {
        self.state() == SessionState::Active
    }

    /// Cancel the session and wait for the refresh loop to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// The spawned half of a session: owns the source subscription, the
/// timer, and the working status.
struct SessionWorker<S: LocationSource> {
    target: Coordinate,
    source: S,
    config: TrackingSessionConfig,
    cancel: CancellationToken,
    shared: Arc<RwLock<TrackingStatus>>,
    readings_tx: broadcast::Sender<TrackingReading>,
    current: TrackingStatus,
    latest_sample: Option<ObserverSample>,
}

impl<S: LocationSource> SessionWorker<S> {
    async fn run(self) {
        debug!(
            destination = %self.target,
            strategy = ?self.config.strategy,
            interval = ?self.config.tick_interval,
            "Tracking session started"
        );

        match self.config.strategy {
            RefreshStrategy::Watch => self.run_watch().await,
            RefreshStrategy::Poll => self.run_poll().await,
        }
    }

    /// Continuous-subscription loop.
    async fn run_watch(mut self) {
        let mut watch_rx = self.source.watch_position();
        let mut interval = tokio::time::interval(self.config.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut watch_open = true;

        loop {
            tokio::select! {
                biased;

                // Check cancellation first so a queued late sample is
                // never processed after cancel()
                _ = self.cancel.cancelled() => {
                    debug!("Tracking session cancelled");
                    break;
                }

                maybe_sample = watch_rx.recv(), if watch_open => match maybe_sample {
                    Some(sample) => self.apply_sample(sample),
                    None => {
                        watch_open = false;
                        self.mark_signal_lost("location watch ended");
                    }
                },

                _ = interval.tick() => {
                    self.refresh_on_tick();
                }
            }
        }

        debug!("Tracking session stopped");
    }

    /// One-shot-fix-per-tick loop.
    async fn run_poll(mut self) {
        let mut interval = tokio::time::interval(self.config.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    debug!("Tracking session cancelled");
                    break;
                }

                _ = interval.tick() => {
                    let fix = tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => break,
                        result = tokio::time::timeout(
                            self.config.fix_timeout,
                            self.source.current_position(),
                        ) => result,
                    };

                    match fix {
                        Ok(Ok(sample)) => self.apply_sample(sample),
                        Ok(Err(err)) => {
                            self.mark_signal_lost(&format!("position request failed: {err}"));
                        }
                        Err(_) => {
                            self.mark_signal_lost("position request timed out");
                        }
                    }
                }
            }
        }

        debug!("Tracking session stopped");
    }

    /// Fold a fresh sample into the status and publish the new reading.
    fn apply_sample(&mut self, sample: ObserverSample) {
        let reading =
            match compute_reading(self.target, sample.coordinate, self.config.walking_speed_mps) {
                Ok(reading) => reading,
                // Walking speed is validated at construction, so this
                // cannot fire; fail loudly in logs rather than silently
                Err(err) => {
                    warn!(error = %err, "Reading computation rejected input");
                    return;
                }
            };

        self.latest_sample = Some(sample);
        self.current.reading = Some(reading.clone());
        self.current.last_fix = Some(sample.timestamp);

        if self.current.signal != SignalStatus::Active {
            info!(position = %sample.coordinate, "Location signal acquired");
            self.current.signal = SignalStatus::Active;
        }

        self.emit(reading);
        self.publish_status();
    }

    /// Timer-driven refresh: recompute from the latest sample while it is
    /// fresh, or flag the signal as lost once it goes stale.
    fn refresh_on_tick(&mut self) {
        match self.latest_sample {
            Some(sample) if sample.age() <= self.config.signal_timeout => {
                if let Ok(reading) = compute_reading(
                    self.target,
                    sample.coordinate,
                    self.config.walking_speed_mps,
                ) {
                    self.current.reading = Some(reading.clone());
                    self.emit(reading);
                    self.publish_status();
                }
            }
            Some(_) => {
                self.mark_signal_lost("no sample within signal timeout");
            }
            // No fix yet: stay in Unknown until the first sample arrives
            None => {}
        }
    }

    fn mark_signal_lost(&mut self, why: &str) {
        if self.current.signal != SignalStatus::SignalLost {
            warn!(reason = why, "Location signal lost, retaining last reading");
            self.current.signal = SignalStatus::SignalLost;
            self.publish_status();
        }
    }

    fn emit(&self, reading: TrackingReading) {
        if self.cancel.is_cancelled() {
            return;
        }
        // No subscribers is fine; the pull API still sees the status
        let _ = self.readings_tx.send(reading);
    }

    fn publish_status(&self) {
        if let Ok(mut guard) = self.shared.write() {
            *guard = self.current.clone();
        }
    }
}
