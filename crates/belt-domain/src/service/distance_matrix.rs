//! Workshop x vehicle distances computed once per load
//!
//! Radius changes only re-filter the cached distances.

use super::distance::distance_km;
use crate::model::{CoverageReport, CoverageResult, Radius, VehicleRecord, Workshop};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceMatrix {
    /// `rows[w][v]` is the distance from workshop `w` to vehicle `v`
    rows: Vec<Vec<f64>>,
    vehicle_count: usize,
}

impl DistanceMatrix {
    pub fn build(workshops: &[Workshop], vehicles: &[VehicleRecord]) -> Self {
        let rows = workshops
            .iter()
            .map(|w| {
                vehicles
                    .iter()
                    .map(|v| distance_km(&w.position, &v.position))
                    .collect()
            })
            .collect();
        Self {
            rows,
            vehicle_count: vehicles.len(),
        }
    }

    pub fn workshop_count(&self) -> usize {
        self.rows.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    pub fn distance(&self, workshop: usize, vehicle: usize) -> Option<f64> {
        self.rows.get(workshop)?.get(vehicle).copied()
    }

    /// Coverage from cached distances.
    ///
    /// `workshops` and `vehicles` must be the slices the matrix was built from.
    pub fn coverage(
        &self,
        workshops: &[Workshop],
        vehicles: &[VehicleRecord],
        radius: Radius,
    ) -> CoverageReport {
        debug_assert_eq!(workshops.len(), self.rows.len());
        debug_assert_eq!(vehicles.len(), self.vehicle_count);

        let results = workshops
            .iter()
            .zip(&self.rows)
            .map(|(workshop, row)| {
                let matches = vehicles
                    .iter()
                    .zip(row)
                    .filter(|(_, d)| radius.contains(**d))
                    .map(|(v, _)| v);
                CoverageResult::from_matches(workshop, radius, matches)
            })
            .collect();
        CoverageReport::new(radius, results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;
    use crate::service::coverage::coverage;

    fn workshop(name: &str, lat: f64, lon: f64) -> Workshop {
        Workshop {
            name: name.to_string(),
            position: Coordinate::new(lat, lon).unwrap(),
            pincode: None,
        }
    }

    fn vehicle(vin: &str, lat: f64, lon: f64, nrc: f64) -> VehicleRecord {
        VehicleRecord {
            vin: vin.to_string(),
            position: Coordinate::new(lat, lon).unwrap(),
            pincode: Some("400001".to_string()),
            nrc_vin_count: nrc,
            row: 2,
        }
    }

    #[test]
    fn test_matches_direct_coverage_for_every_radius() {
        let workshops = vec![
            workshop("Andheri", 19.1136, 72.8697),
            workshop("Vashi", 19.0771, 72.9986),
            workshop("Pune", 18.5204, 73.8567),
        ];
        let vehicles: Vec<VehicleRecord> = (0..40)
            .map(|i| {
                let step = i as f64 * 0.01;
                vehicle(&format!("VIN{:03}", i), 18.95 + step, 72.80 + step, i as f64)
            })
            .collect();

        let matrix = DistanceMatrix::build(&workshops, &vehicles);
        assert_eq!(matrix.workshop_count(), 3);
        assert_eq!(matrix.vehicle_count(), 40);

        for km in 1..=20 {
            let radius = Radius::new(km as f64).unwrap();
            assert_eq!(
                matrix.coverage(&workshops, &vehicles, radius),
                coverage(&workshops, &vehicles, radius)
            );
        }
    }

    #[test]
    fn test_distance_lookup() {
        let workshops = vec![workshop("W", 19.0760, 72.8777)];
        let vehicles = vec![vehicle("SAME", 19.0760, 72.8777, 1.0)];
        let matrix = DistanceMatrix::build(&workshops, &vehicles);
        assert_eq!(matrix.distance(0, 0), Some(0.0));
        assert_eq!(matrix.distance(1, 0), None);
        assert_eq!(matrix.distance(0, 1), None);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = DistanceMatrix::build(&[], &[]);
        let report = matrix.coverage(&[], &[], Radius::default());
        assert!(report.is_empty());
    }
}
