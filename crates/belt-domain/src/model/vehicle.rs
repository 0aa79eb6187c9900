//! Vehicle (VIN) record type definitions

use serde::Serialize;

use super::Coordinate;

/// A vehicle row from the projections file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    /// Vehicle Identification Number, unique within a dataset
    pub vin: String,
    pub position: Coordinate,
    /// Customer pincode, when the source file has one
    pub pincode: Option<String>,
    /// NRC VIN count carried by this row (1.0 when the source has no such column)
    pub nrc_vin_count: f64,
    /// 1-based line number in the source file (header is line 1)
    pub row: usize,
}
