//! Repository adapters for the data files

use std::path::Path;

use belt_infra::persistence::{FileVehicleRepository, FileWorkshopRepository};
use belt_types::Result;

/// Open the workshop locations CSV
pub fn open_workshop_repo(path: &Path) -> Result<FileWorkshopRepository> {
    FileWorkshopRepository::open(path)
}

/// Open the vehicle projections CSV
pub fn open_vehicle_repo(path: &Path) -> Result<FileVehicleRepository> {
    FileVehicleRepository::open(path)
}
