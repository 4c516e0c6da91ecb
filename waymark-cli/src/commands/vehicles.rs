//! Vehicle management CLI commands.

use clap::Subcommand;

use waymark::spot::{Vehicle, VehicleKind};
use waymark::store::ParkingStore;

use crate::error::CliError;

/// Vehicle action subcommands.
#[derive(Debug, Subcommand)]
pub enum VehicleAction {
    /// List registered vehicles
    List,
    /// Register a new vehicle
    Add {
        /// Stable identifier (e.g. "v2")
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Manufacturer model
        #[arg(long)]
        model: String,

        /// License plate
        #[arg(long)]
        plate: String,

        /// Vehicle category
        #[arg(long, value_enum, default_value = "sedan")]
        kind: VehicleKindArg,
    },
    /// Remove a vehicle
    Remove {
        /// Vehicle id to remove
        #[arg(long)]
        id: String,
    },
}

/// Clap-facing vehicle category.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum VehicleKindArg {
    Sedan,
    Suv,
    Ev,
    Truck,
    Bike,
}

impl From<VehicleKindArg> for VehicleKind {
    fn from(arg: VehicleKindArg) -> Self {
        match arg {
            VehicleKindArg::Sedan => VehicleKind::Sedan,
            VehicleKindArg::Suv => VehicleKind::Suv,
            VehicleKindArg::Ev => VehicleKind::Ev,
            VehicleKindArg::Truck => VehicleKind::Truck,
            VehicleKindArg::Bike => VehicleKind::Bike,
        }
    }
}

/// Run a vehicle subcommand.
pub fn run(store: &ParkingStore, action: VehicleAction) -> Result<(), CliError> {
    match action {
        VehicleAction::List => {
            let vehicles = store.vehicles()?;
            if vehicles.is_empty() {
                println!("No vehicles registered.");
                return Ok(());
            }
            for vehicle in vehicles {
                println!(
                    "{}  {}  {} ({}, {})",
                    vehicle.id, vehicle.name, vehicle.plate_number, vehicle.model, vehicle.kind
                );
            }
            Ok(())
        }
        VehicleAction::Add {
            id,
            name,
            model,
            plate,
            kind,
        } => {
            let mut vehicles = store.vehicles()?;
            if vehicles.iter().any(|v| v.id == id) {
                return Err(CliError::DuplicateVehicle(id));
            }
            let vehicle = Vehicle::new(id, name, model, plate, kind.into());
            println!("Registered {} ({})", vehicle.name, vehicle.plate_number);
            vehicles.push(vehicle);
            store.save_vehicles(&vehicles)?;
            Ok(())
        }
        VehicleAction::Remove { id } => {
            let mut vehicles = store.vehicles()?;
            let before = vehicles.len();
            vehicles.retain(|v| v.id != id);
            if vehicles.len() == before {
                return Err(CliError::UnknownVehicle(id));
            }
            store.save_vehicles(&vehicles)?;
            println!("Removed vehicle {}", id);
            Ok(())
        }
    }
}
