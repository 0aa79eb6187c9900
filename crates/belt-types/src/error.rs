//! Error types for workshop-belt

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("No {0} file given; pass it as an argument or set it with `config`")]
    MissingPath(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid radius {0} km (must be between 1 and 20)")]
    InvalidRadius(f64),

    #[error(
        "Could not detect required columns in {file}: {}; columns found: {}",
        .missing.join(", "),
        .found.join(", ")
    )]
    MissingColumns {
        file: String,
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("CSV loader error: {0}")]
    CsvLoader(String),

    #[error("CSV export error: {0}")]
    CsvExport(String),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unknown workshop: {0}")]
    UnknownWorkshop(String),
}

pub type Result<T> = std::result::Result<T, Error>;
