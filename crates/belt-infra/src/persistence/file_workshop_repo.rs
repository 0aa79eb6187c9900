//! CSV-backed workshop repository

use std::path::{Path, PathBuf};

use belt_domain::model::{LoadReport, Workshop};
use belt_domain::repository::WorkshopRepository;
use belt_types::{Error, Result};

use crate::csv_loader::load_workshops;

/// Workshops read once from a CSV file and held in memory
pub struct FileWorkshopRepository {
    path: PathBuf,
    workshops: Vec<Workshop>,
    report: LoadReport,
}

impl FileWorkshopRepository {
    /// Load workshops from a CSV file
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let (workshops, report) = load_workshops(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            workshops,
            report,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the backing file
    pub fn reload(&mut self) -> Result<()> {
        let (workshops, report) = load_workshops(&self.path)?;
        self.workshops = workshops;
        self.report = report;
        Ok(())
    }
}

impl WorkshopRepository for FileWorkshopRepository {
    fn find_all(&self) -> Result<Vec<Workshop>> {
        Ok(self.workshops.clone())
    }

    fn load_report(&self) -> &LoadReport {
        &self.report
    }
}
