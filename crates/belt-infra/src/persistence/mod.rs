//! File-backed implementations of the repository traits

mod file_vehicle_repo;
mod file_workshop_repo;

pub use file_vehicle_repo::FileVehicleRepository;
pub use file_workshop_repo::FileWorkshopRepository;
