//! Coverage results for a workshop at a given radius

use std::collections::BTreeSet;

use belt_types::{Error, Result};
use serde::Serialize;

use super::{VehicleRecord, Workshop};

pub const MIN_RADIUS_KM: f64 = 1.0;
pub const MAX_RADIUS_KM: f64 = 20.0;
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Search radius in kilometers, always inside `[1, 20]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Radius(f64);

impl Radius {
    pub fn new(km: f64) -> Result<Self> {
        if !km.is_finite() || !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&km) {
            return Err(Error::InvalidRadius(km));
        }
        Ok(Self(km))
    }

    /// Clamp an arbitrary value into range (UI boundary). NaN maps to the default.
    pub fn clamped(km: f64) -> Self {
        if km.is_nan() {
            return Self::default();
        }
        Self(km.clamp(MIN_RADIUS_KM, MAX_RADIUS_KM))
    }

    pub fn km(&self) -> f64 {
        self.0
    }

    /// Ties on the boundary count as inside.
    pub fn contains(&self, distance_km: f64) -> bool {
        distance_km <= self.0
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self(DEFAULT_RADIUS_KM)
    }
}

impl std::fmt::Display for Radius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0} km", self.0)
        } else {
            write!(f, "{} km", self.0)
        }
    }
}

/// Vehicles within `radius` of one workshop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageResult {
    pub workshop: Workshop,
    pub radius: Radius,
    pub matching_vins: BTreeSet<String>,
    /// Always `matching_vins.len()`
    pub count: usize,
    /// Sum of `nrc_vin_count` over the matching rows
    pub nrc_vin_total: f64,
}

impl CoverageResult {
    pub fn from_matches<'a>(
        workshop: &Workshop,
        radius: Radius,
        matches: impl IntoIterator<Item = &'a VehicleRecord>,
    ) -> Self {
        let mut matching_vins = BTreeSet::new();
        let mut nrc_vin_total = 0.0;
        for vehicle in matches {
            if matching_vins.insert(vehicle.vin.clone()) {
                nrc_vin_total += vehicle.nrc_vin_count;
            }
        }
        Self {
            workshop: workshop.clone(),
            radius,
            count: matching_vins.len(),
            matching_vins,
            nrc_vin_total,
        }
    }

    pub fn contains(&self, vin: &str) -> bool {
        self.matching_vins.contains(vin)
    }
}

/// Coverage of every workshop at one radius, in workshop load order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub radius: Radius,
    pub results: Vec<CoverageResult>,
}

impl CoverageReport {
    pub fn new(radius: Radius, results: Vec<CoverageResult>) -> Self {
        Self { radius, results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CoverageResult> {
        self.results.iter()
    }

    /// First workshop with this name
    pub fn get(&self, workshop_name: &str) -> Option<&CoverageResult> {
        self.results
            .iter()
            .find(|r| r.workshop.name == workshop_name)
    }

    /// Results by NRC VIN total descending, then count descending, then name.
    /// Remaining ties keep load order.
    pub fn ranked(&self) -> Vec<&CoverageResult> {
        let mut ranked: Vec<&CoverageResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| {
            b.nrc_vin_total
                .total_cmp(&a.nrc_vin_total)
                .then_with(|| b.count.cmp(&a.count))
                .then_with(|| a.workshop.name.cmp(&b.workshop.name))
        });
        ranked
    }

    pub fn max_nrc_total(&self) -> f64 {
        self.results
            .iter()
            .map(|r| r.nrc_vin_total)
            .fold(0.0, f64::max)
    }

    /// VINs inside at least one workshop's radius
    pub fn covered_vins(&self) -> BTreeSet<&str> {
        self.results
            .iter()
            .flat_map(|r| r.matching_vins.iter().map(String::as_str))
            .collect()
    }
}

/// One exported row: a vehicle inside a workshop's radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedRow<'a> {
    pub workshop: &'a Workshop,
    pub vehicle: &'a VehicleRecord,
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;

    fn workshop(name: &str) -> Workshop {
        Workshop {
            name: name.to_string(),
            position: Coordinate::new(19.0, 72.8).unwrap(),
            pincode: None,
        }
    }

    fn vehicle(vin: &str, nrc: f64) -> VehicleRecord {
        VehicleRecord {
            vin: vin.to_string(),
            position: Coordinate::new(19.0, 72.8).unwrap(),
            pincode: None,
            nrc_vin_count: nrc,
            row: 2,
        }
    }

    #[test]
    fn test_radius_bounds() {
        assert!(Radius::new(1.0).is_ok());
        assert!(Radius::new(20.0).is_ok());
        assert!(matches!(Radius::new(0.0), Err(Error::InvalidRadius(_))));
        assert!(Radius::new(20.5).is_err());
        assert!(Radius::new(f64::NAN).is_err());
        assert!(Radius::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_radius_clamped() {
        assert_eq!(Radius::clamped(0.0).km(), 1.0);
        assert_eq!(Radius::clamped(35.0).km(), 20.0);
        assert_eq!(Radius::clamped(7.0).km(), 7.0);
        assert_eq!(Radius::clamped(f64::NAN), Radius::default());
    }

    #[test]
    fn test_radius_contains_boundary() {
        let r = Radius::new(5.0).unwrap();
        assert!(r.contains(5.0));
        assert!(!r.contains(5.000001));
    }

    #[test]
    fn test_radius_display() {
        assert_eq!(Radius::new(5.0).unwrap().to_string(), "5 km");
        assert_eq!(Radius::new(2.5).unwrap().to_string(), "2.5 km");
    }

    #[test]
    fn test_from_matches_count_and_total() {
        let a = vehicle("A", 3.0);
        let b = vehicle("B", 2.5);
        let result = CoverageResult::from_matches(&workshop("W"), Radius::default(), [&a, &b]);
        assert_eq!(result.count, 2);
        assert_eq!(result.count, result.matching_vins.len());
        assert!((result.nrc_vin_total - 5.5).abs() < 1e-9);
        assert!(result.contains("A"));
        assert!(!result.contains("C"));
    }

    #[test]
    fn test_ranked_orders_by_total_then_name() {
        let a = vehicle("A", 3.0);
        let b = vehicle("B", 1.0);
        let report = CoverageReport::new(
            Radius::default(),
            vec![
                CoverageResult::from_matches(&workshop("Zeta"), Radius::default(), [&b]),
                CoverageResult::from_matches(&workshop("Alpha"), Radius::default(), [&b]),
                CoverageResult::from_matches(&workshop("Beta"), Radius::default(), [&a]),
            ],
        );
        let names: Vec<&str> = report
            .ranked()
            .iter()
            .map(|r| r.workshop.name.as_str())
            .collect();
        assert_eq!(names, vec!["Beta", "Alpha", "Zeta"]);
        assert_eq!(report.max_nrc_total(), 3.0);
        assert_eq!(report.covered_vins().len(), 2);
    }

    #[test]
    fn test_report_serializes_sorted_vins() {
        let a = vehicle("B2", 1.0);
        let b = vehicle("A1", 2.0);
        let report = CoverageReport::new(
            Radius::default(),
            vec![CoverageResult::from_matches(&workshop("W"), Radius::default(), [&a, &b])],
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["radius"], 5.0);
        assert_eq!(json["results"][0]["workshop"]["name"], "W");
        assert_eq!(json["results"][0]["matching_vins"], serde_json::json!(["A1", "B2"]));
        assert_eq!(json["results"][0]["count"], 2);
        assert_eq!(json["results"][0]["nrc_vin_total"], 3.0);
    }

    #[test]
    fn test_empty_report() {
        let report = CoverageReport::new(Radius::default(), Vec::new());
        assert!(report.is_empty());
        assert_eq!(report.max_nrc_total(), 0.0);
        assert!(report.ranked().is_empty());
    }
}
