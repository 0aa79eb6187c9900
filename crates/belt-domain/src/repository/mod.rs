//! Repository trait definitions for tabular data sources

use belt_types::Error;

use crate::model::{LoadReport, VehicleRecord, Workshop};

/// Source of workshop locations
pub trait WorkshopRepository {
    /// Load all valid workshops
    fn find_all(&self) -> Result<Vec<Workshop>, Error>;

    /// Rows excluded while loading
    fn load_report(&self) -> &LoadReport;
}

/// Source of vehicle (VIN) records
pub trait VehicleRepository {
    /// Load all valid vehicle records
    fn find_all(&self) -> Result<Vec<VehicleRecord>, Error>;

    /// Rows excluded while loading
    fn load_report(&self) -> &LoadReport;
}
