//! Rows excluded while loading a tabular source

use serde::Serialize;

/// Why a row was left out of the dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RejectReason {
    /// Latitude/longitude missing, non-numeric or out of range (raw cell text kept)
    InvalidCoordinate { latitude: String, longitude: String },
    MissingName,
    MissingVin,
    DuplicateVin(String),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::InvalidCoordinate {
                latitude,
                longitude,
            } => write!(
                f,
                "invalid coordinate (lat '{}', lon '{}')",
                latitude, longitude
            ),
            RejectReason::MissingName => write!(f, "missing workshop name"),
            RejectReason::MissingVin => write!(f, "missing VIN"),
            RejectReason::DuplicateVin(vin) => write!(f, "duplicate VIN {}", vin),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    /// 1-based line number in the source file
    pub row: usize,
    pub reason: RejectReason,
}

/// Outcome of loading one source file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    /// Source name shown to the user (usually the file name)
    pub source: String,
    pub loaded: usize,
    pub rejected: Vec<RejectedRow>,
}

impl LoadReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn reject(&mut self, row: usize, reason: RejectReason) {
        self.rejected.push(RejectedRow { row, reason });
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Rows rejected because of bad coordinates
    pub fn invalid_coordinate_count(&self) -> usize {
        self.rejected
            .iter()
            .filter(|r| matches!(r.reason, RejectReason::InvalidCoordinate { .. }))
            .count()
    }
}
