//! Great-circle distance on a spherical Earth

use belt_types::Result;

use crate::model::Coordinate;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two validated coordinates.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let d_phi = (b.latitude() - a.latitude()).to_radians();
    let d_lambda = (b.longitude() - a.longitude()).to_radians();

    // Rounding can push h slightly outside [0, 1] near antipodes
    let h = ((d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance between raw latitude/longitude pairs.
///
/// Fails with `InvalidCoordinate` when any value is non-finite or out of range.
pub fn distance_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    let a = Coordinate::new(lat1, lon1)?;
    let b = Coordinate::new(lat2, lon2)?;
    Ok(distance_km(&a, &b))
}
