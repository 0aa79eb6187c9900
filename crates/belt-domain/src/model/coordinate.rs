//! Validated geographic coordinate

use belt_types::{Error, Result};
use serde::Serialize;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A point on the Earth's surface in decimal degrees.
///
/// Only constructible through [`Coordinate::new`], so every instance is
/// finite and inside the valid latitude/longitude ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let lat_ok = latitude.is_finite() && (MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude);
        let lon_ok =
            longitude.is_finite() && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude);
        if !lat_ok || !lon_ok {
            return Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_range_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(19.076, 72.8777).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::new(90.5, 0.0),
            Err(Error::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::new(0.0, -180.01).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }
}
