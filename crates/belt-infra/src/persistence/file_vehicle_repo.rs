//! CSV-backed vehicle repository

use std::path::{Path, PathBuf};

use belt_domain::model::{LoadReport, VehicleRecord};
use belt_domain::repository::VehicleRepository;
use belt_types::{Error, Result};

use crate::csv_loader::load_vehicles;

/// Vehicle records read once from a CSV file and held in memory
pub struct FileVehicleRepository {
    path: PathBuf,
    vehicles: Vec<VehicleRecord>,
    report: LoadReport,
}

impl FileVehicleRepository {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let (vehicles, report) = load_vehicles(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            vehicles,
            report,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reload(&mut self) -> Result<()> {
        let (vehicles, report) = load_vehicles(&self.path)?;
        self.vehicles = vehicles;
        self.report = report;
        Ok(())
    }
}

impl VehicleRepository for FileVehicleRepository {
    fn find_all(&self) -> Result<Vec<VehicleRecord>> {
        Ok(self.vehicles.clone())
    }

    fn load_report(&self) -> &LoadReport {
        &self.report
    }
}
