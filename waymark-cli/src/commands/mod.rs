//! CLI command implementations.

pub mod clear;
pub mod history;
pub mod park;
pub mod reading;
pub mod status;
pub mod track;
pub mod vehicles;

use waymark::spot::{Vehicle, VehicleKind};
use waymark::store::ParkingStore;

use crate::error::CliError;

/// Resolve the vehicle a command operates on.
///
/// With an explicit id the vehicle must exist. Without one, the first
/// registered vehicle is used; an empty store is seeded with a default
/// vehicle so the tool works out of the box.
pub fn resolve_vehicle(
    store: &ParkingStore,
    vehicle_id: Option<&str>,
) -> Result<Vehicle, CliError> {
    let mut vehicles = store.vehicles()?;

    if let Some(id) = vehicle_id {
        return vehicles
            .into_iter()
            .find(|v| v.id == id)
            .ok_or_else(|| CliError::UnknownVehicle(id.to_string()));
    }

    if vehicles.is_empty() {
        let default = Vehicle::new(
            "v1",
            "Main Ride",
            "Model 3",
            "MH-12-PA-777",
            VehicleKind::Ev,
        );
        vehicles.push(default.clone());
        store.save_vehicles(&vehicles)?;
        return Ok(default);
    }

    Ok(vehicles.remove(0))
}
