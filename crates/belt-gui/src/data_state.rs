//! Loaded files and the session built from them

use std::path::{Path, PathBuf};

use belt_app::app::{build_session, LoadedSession};
use belt_app::repository::{open_vehicle_repo, open_workshop_repo};
use belt_domain::model::Radius;
use belt_infra::persistence::{FileVehicleRepository, FileWorkshopRepository};
use belt_types::Result;
use tracing::info;

/// The two open data files
struct DataSources {
    workshops: FileWorkshopRepository,
    vehicles: FileVehicleRepository,
}

/// Sources and session always describe the same pair of files
#[derive(Default)]
pub struct DataState {
    sources: Option<DataSources>,
    loaded: Option<LoadedSession>,
    /// Bumped whenever the dataset changes
    generation: u64,
}

impl DataState {
    pub fn loaded(&self) -> Option<&LoadedSession> {
        self.loaded.as_ref()
    }

    pub fn loaded_mut(&mut self) -> Option<&mut LoadedSession> {
        self.loaded.as_mut()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Files behind the current session
    pub fn paths(&self) -> Option<(PathBuf, PathBuf)> {
        self.sources.as_ref().map(|s| {
            (
                s.workshops.path().to_path_buf(),
                s.vehicles.path().to_path_buf(),
            )
        })
    }

    /// Open a new pair of files. On failure the previous dataset stays.
    pub fn load(&mut self, workshops: &Path, vehicles: &Path, radius: Radius) -> Result<()> {
        let sources = DataSources {
            workshops: open_workshop_repo(workshops)?,
            vehicles: open_vehicle_repo(vehicles)?,
        };
        let loaded = build_session(&sources.workshops, &sources.vehicles, radius)?;
        self.commit(Some(sources), Some(loaded));
        Ok(())
    }

    /// Re-read the current files. A failure leaves nothing loaded, since one
    /// file may already hold the new contents.
    pub fn reload(&mut self, radius: Radius) -> Result<()> {
        let Some(mut sources) = self.sources.take() else {
            return Ok(());
        };
        let result = sources
            .workshops
            .reload()
            .and_then(|_| sources.vehicles.reload())
            .and_then(|_| build_session(&sources.workshops, &sources.vehicles, radius));
        match result {
            Ok(loaded) => {
                self.commit(Some(sources), Some(loaded));
                Ok(())
            }
            Err(e) => {
                self.commit(None, None);
                Err(e)
            }
        }
    }

    fn commit(&mut self, sources: Option<DataSources>, loaded: Option<LoadedSession>) {
        if let Some(l) = &loaded {
            info!(
                workshops = l.session.dataset().workshops().len(),
                vehicles = l.session.dataset().vehicles().len(),
                "dataset ready"
            );
        }
        self.sources = sources;
        self.loaded = loaded;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../tests/fixtures")
            .join(name)
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut state = DataState::default();
        state
            .load(&fixture("workshops.csv"), &fixture("vehicles.csv"), Radius::default())
            .unwrap();
        let generation = state.generation();

        let result = state.load(
            &fixture("workshops.csv"),
            &fixture("missing.csv"),
            Radius::default(),
        );
        assert!(result.is_err());
        assert_eq!(state.generation(), generation);
        assert_eq!(state.loaded().unwrap().session.dataset().vehicles().len(), 8);
        let (_, vehicles) = state.paths().unwrap();
        assert!(vehicles.ends_with("vehicles.csv"));
    }

    #[test]
    fn test_failed_reload_clears_dataset() {
        let dir = tempdir().unwrap();
        let workshops = dir.path().join("workshops.csv");
        let vehicles = dir.path().join("vehicles.csv");
        fs::copy(fixture("workshops.csv"), &workshops).unwrap();
        fs::copy(fixture("vehicles.csv"), &vehicles).unwrap();

        let mut state = DataState::default();
        state.load(&workshops, &vehicles, Radius::default()).unwrap();
        assert!(state.loaded().is_some());

        fs::write(&vehicles, "VIN,Pincode\nMA1,400001\n").unwrap();
        assert!(state.reload(Radius::default()).is_err());
        assert!(state.loaded().is_none());
        assert!(state.paths().is_none());
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let dir = tempdir().unwrap();
        let workshops = dir.path().join("workshops.csv");
        let vehicles = dir.path().join("vehicles.csv");
        fs::copy(fixture("workshops.csv"), &workshops).unwrap();
        fs::write(&vehicles, "VIN,Latitude,Longitude\nMA1,19.1136,72.8697\n").unwrap();

        let mut state = DataState::default();
        state.load(&workshops, &vehicles, Radius::default()).unwrap();
        fs::write(
            &vehicles,
            "VIN,Latitude,Longitude\nMA1,19.1136,72.8697\nMA2,19.0771,72.9986\n",
        )
        .unwrap();
        state.reload(Radius::default()).unwrap();
        assert_eq!(state.loaded().unwrap().session.dataset().vehicles().len(), 2);
    }
}
