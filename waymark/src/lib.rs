//! Waymark - remember where you parked
//!
//! This library provides the core functionality behind a parked-vehicle
//! locator: live distance/bearing/ETA tracking toward a fixed target,
//! parking-spot records with fee and reminder bookkeeping, and a small
//! JSON-backed store.
//!
//! # High-Level API
//!
//! The [`tracking`] module is the heart of the crate. Given a parked
//! location and a [`tracking::LocationSource`], a session keeps a live
//! reading refreshed:
//!
//! ```ignore
//! use waymark::geo::Coordinate;
//! use waymark::tracking::TrackingSession;
//!
//! let target = Coordinate::new(37.8044, -122.2712)?;
//! let handle = TrackingSession::new(target, source).start();
//!
//! let mut readings = handle.subscribe();
//! while let Ok(reading) = readings.recv().await {
//!     println!("{} at {:.0}°", reading.formatted_distance, reading.bearing_degrees);
//! }
//! ```

pub mod assistant;
pub mod geo;
pub mod logging;
pub mod spot;
pub mod store;
pub mod tracking;

/// Version of the waymark library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
