//! Domain services

pub mod coverage;
pub mod distance;
pub mod distance_matrix;

pub use coverage::{coverage, coverage_with_radius_km};
pub use distance::{distance_between, distance_km, EARTH_RADIUS_KM};
pub use distance_matrix::DistanceMatrix;
