//! Coverage Service - load data and build the session
//!
//! 1. Resolve data file paths (arguments first, then config)
//! 2. Load workshops and vehicles, collecting rejected rows
//! 3. Build the coverage session at the requested radius

use std::path::{Path, PathBuf};

use belt_domain::model::{LoadReport, Radius};
use belt_domain::repository::{VehicleRepository, WorkshopRepository};
use belt_domain::{CoverageSession, Dataset};
use belt_types::{ConfigError, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::repository::{open_vehicle_repo, open_workshop_repo};

/// The two input files of a session
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub workshops: PathBuf,
    pub vehicles: PathBuf,
}

/// Pick data files: explicit arguments win over configured defaults
pub fn resolve_data_paths(
    config: &Config,
    workshops: Option<&Path>,
    vehicles: Option<&Path>,
) -> Result<DataPaths> {
    let workshops = workshops
        .map(Path::to_path_buf)
        .or_else(|| config.workshops_path.clone())
        .ok_or_else(|| ConfigError::MissingPath("workshops".to_string()))?;
    let vehicles = vehicles
        .map(Path::to_path_buf)
        .or_else(|| config.vehicles_path.clone())
        .ok_or_else(|| ConfigError::MissingPath("vehicles".to_string()))?;
    Ok(DataPaths {
        workshops,
        vehicles,
    })
}

/// A session plus what was left out while loading it
pub struct LoadedSession {
    pub session: CoverageSession,
    pub workshop_report: LoadReport,
    pub vehicle_report: LoadReport,
}

impl LoadedSession {
    /// Rows excluded across both files
    pub fn rejected_total(&self) -> usize {
        self.workshop_report.rejected_count() + self.vehicle_report.rejected_count()
    }

    /// Rows excluded for bad coordinates across both files
    pub fn invalid_coordinate_total(&self) -> usize {
        self.workshop_report.invalid_coordinate_count()
            + self.vehicle_report.invalid_coordinate_count()
    }
}

/// Build a session from any repository pair
pub fn build_session<W, V>(workshops: &W, vehicles: &V, radius: Radius) -> Result<LoadedSession>
where
    W: WorkshopRepository,
    V: VehicleRepository,
{
    let dataset = Dataset::new(workshops.find_all()?, vehicles.find_all()?);
    info!(
        workshops = dataset.workshops().len(),
        vehicles = dataset.vehicles().len(),
        rejected = workshops.load_report().rejected_count() + vehicles.load_report().rejected_count(),
        "dataset loaded"
    );
    if dataset.is_empty() {
        warn!("no usable rows in either file");
    }
    Ok(LoadedSession {
        session: CoverageSession::new(dataset, radius),
        workshop_report: workshops.load_report().clone(),
        vehicle_report: vehicles.load_report().clone(),
    })
}

/// Load both CSV files and build a session
pub fn open_session(paths: &DataPaths, radius: Radius) -> Result<LoadedSession> {
    let workshops = open_workshop_repo(&paths.workshops)?;
    let vehicles = open_vehicle_repo(&paths.vehicles)?;
    build_session(&workshops, &vehicles, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use belt_types::Error;

    #[test]
    fn test_arguments_override_config() {
        let mut config = Config::default();
        config.workshops_path = Some(PathBuf::from("cfg/ws.csv"));
        config.vehicles_path = Some(PathBuf::from("cfg/proj.csv"));

        let paths =
            resolve_data_paths(&config, Some(Path::new("arg/ws.csv")), None).unwrap();
        assert_eq!(paths.workshops, PathBuf::from("arg/ws.csv"));
        assert_eq!(paths.vehicles, PathBuf::from("cfg/proj.csv"));
    }

    #[test]
    fn test_missing_path_names_the_file() {
        let config = Config::default();
        let err = resolve_data_paths(&config, Some(Path::new("ws.csv")), None).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingPath(ref which)) if which == "vehicles"
        ));
    }
}
