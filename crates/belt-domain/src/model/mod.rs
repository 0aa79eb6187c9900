//! Domain model types

pub mod coordinate;
pub mod coverage;
pub mod load_report;
pub mod vehicle;
pub mod workshop;

pub use coordinate::Coordinate;
pub use coverage::{CoverageReport, CoverageResult, MatchedRow, Radius};
pub use load_report::{LoadReport, RejectReason, RejectedRow};
pub use vehicle::VehicleRecord;
pub use workshop::Workshop;
