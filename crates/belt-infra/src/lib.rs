//! Infrastructure layer - CSV loading, CSV export and file-backed repositories

pub mod csv_export;
pub mod csv_loader;
pub mod persistence;
pub mod tabular;
