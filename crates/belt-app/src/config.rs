//! Configuration management for workshop-belt
//!
//! Config stored at: ~/.config/workshop-belt/config.json

use std::path::{Path, PathBuf};

use belt_domain::model::coverage::{MAX_RADIUS_KM, MIN_RADIUS_KM};
use belt_domain::model::Radius;
use belt_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Workshop locations CSV loaded when none is given
    #[serde(default)]
    pub workshops_path: Option<PathBuf>,

    /// Vehicle projections CSV loaded when none is given
    #[serde(default)]
    pub vehicles_path: Option<PathBuf>,

    /// Slider position on startup (km, 1-20)
    #[serde(default = "default_radius_km")]
    pub default_radius_km: u32,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Draw individual vehicle points on the map
    #[serde(default)]
    pub show_vehicle_points: bool,

    /// Directory offered for exports
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

fn default_radius_km() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workshops_path: None,
            vehicles_path: None,
            default_radius_km: default_radius_km(),
            output_format: OutputFormat::default(),
            show_vehicle_points: false,
            export_dir: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("workshop-belt");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default location, or defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn set_default_radius_km(&mut self, km: u32) -> Result<()> {
        if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&(km as f64)) {
            return Err(ConfigError::InvalidValue {
                key: "default_radius_km".to_string(),
                value: km.to_string(),
            }
            .into());
        }
        self.default_radius_km = km;
        Ok(())
    }

    /// Startup radius; a hand-edited out-of-range value is clamped
    pub fn default_radius(&self) -> Radius {
        Radius::clamped(self.default_radius_km as f64)
    }

    /// Directory for exports: configured, else the user's download dir, else cwd
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show_path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        };

        writeln!(f, "Workshop Belt Configuration")?;
        writeln!(f, "===========================")?;
        writeln!(f)?;
        writeln!(f, "Workshops file:  {}", show_path(&self.workshops_path))?;
        writeln!(f, "Vehicles file:   {}", show_path(&self.vehicles_path))?;
        writeln!(f, "Default radius:  {} km", self.default_radius_km)?;
        writeln!(f, "Output format:   {}", self.output_format)?;
        writeln!(f, "Vehicle points:  {}", self.show_vehicle_points)?;
        writeln!(f, "Export dir:      {}", self.export_dir().display())?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use belt_types::Error;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_radius().km(), 5.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.workshops_path = Some(PathBuf::from("data/workshops.csv"));
        config.set_default_radius_km(12).unwrap();
        config.output_format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"show_vehicle_points": true}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.show_vehicle_points);
        assert_eq!(config.default_radius_km, 5);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_radius_setting_validated() {
        let mut config = Config::default();
        assert!(config.set_default_radius_km(0).is_err());
        assert!(config.set_default_radius_km(21).is_err());
        assert_eq!(config.default_radius_km, 5);

        config.default_radius_km = 50;
        assert_eq!(config.default_radius().km(), 20.0);
    }
}
