//! Radius filter and per-workshop aggregation

use belt_types::Result;

use super::distance::distance_km;
use crate::model::{CoverageReport, CoverageResult, Radius, VehicleRecord, Workshop};

/// Coverage of every workshop: vehicles whose distance is `<= radius`.
///
/// Results follow the workshop slice order; VIN sets are ordered.
pub fn coverage(workshops: &[Workshop], vehicles: &[VehicleRecord], radius: Radius) -> CoverageReport {
    let results = workshops
        .iter()
        .map(|workshop| {
            let matches = vehicles
                .iter()
                .filter(|v| radius.contains(distance_km(&workshop.position, &v.position)));
            CoverageResult::from_matches(workshop, radius, matches)
        })
        .collect();
    CoverageReport::new(radius, results)
}

/// Same as [`coverage`] for a raw radius value; fails with `InvalidRadius`
/// outside `[1, 20]`.
pub fn coverage_with_radius_km(
    workshops: &[Workshop],
    vehicles: &[VehicleRecord],
    radius_km: f64,
) -> Result<CoverageReport> {
    let radius = Radius::new(radius_km)?;
    Ok(coverage(workshops, vehicles, radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;
    use belt_types::Error;

    fn workshop(name: &str, lat: f64, lon: f64) -> Workshop {
        Workshop {
            name: name.to_string(),
            position: Coordinate::new(lat, lon).unwrap(),
            pincode: None,
        }
    }

    fn vehicle(vin: &str, lat: f64, lon: f64) -> VehicleRecord {
        VehicleRecord {
            vin: vin.to_string(),
            position: Coordinate::new(lat, lon).unwrap(),
            pincode: None,
            nrc_vin_count: 1.0,
            row: 2,
        }
    }

    fn fixture() -> (Vec<Workshop>, Vec<VehicleRecord>) {
        let workshops = vec![
            workshop("Mumbai", 19.0760, 72.8777),
            workshop("Thane", 19.2183, 72.9781),
        ];
        let vehicles = vec![
            vehicle("V1", 19.0760, 72.8777),
            vehicle("V2", 18.5204, 73.8567),
            vehicle("V3", 19.1000, 72.9000),
            vehicle("V4", 19.2000, 72.9700),
            vehicle("V5", 19.0900, 72.8800),
        ];
        (workshops, vehicles)
    }

    #[test]
    fn test_membership_matches_distance() {
        let (workshops, vehicles) = fixture();
        for km in [1.0, 3.0, 5.0, 12.5, 20.0] {
            let report = coverage(&workshops, &vehicles, Radius::new(km).unwrap());
            for (w, result) in workshops.iter().zip(report.iter()) {
                for v in &vehicles {
                    let inside = distance_km(&w.position, &v.position) <= km;
                    assert_eq!(result.contains(&v.vin), inside, "{} {} at {}", w.name, v.vin, km);
                }
                assert_eq!(result.count, result.matching_vins.len());
            }
        }
    }

    #[test]
    fn test_same_point_included_and_pune_excluded() {
        let (workshops, vehicles) = fixture();
        let report = coverage(&workshops, &vehicles, Radius::new(1.0).unwrap());
        let mumbai = report.get("Mumbai").unwrap();
        assert!(mumbai.contains("V1"));

        let report = coverage(&workshops, &vehicles, Radius::new(20.0).unwrap());
        assert!(!report.get("Mumbai").unwrap().contains("V2"));
    }

    #[test]
    fn test_vehicle_may_belong_to_several_workshops() {
        let (workshops, vehicles) = fixture();
        let report = coverage(&workshops, &vehicles, Radius::new(20.0).unwrap());
        assert!(report.get("Mumbai").unwrap().contains("V4"));
        assert!(report.get("Thane").unwrap().contains("V4"));
    }

    #[test]
    fn test_tie_at_radius_is_included() {
        let w = workshop("W", 19.0760, 72.8777);
        let v = vehicle("EDGE", 19.1200, 72.9000);
        let d = distance_km(&w.position, &v.position);
        assert!((1.0..=20.0).contains(&d));

        let report = coverage(&[w], &[v], Radius::new(d).unwrap());
        assert!(report.results[0].contains("EDGE"));
    }

    #[test]
    fn test_monotonic_in_radius() {
        let (workshops, vehicles) = fixture();
        let mut previous = coverage(&workshops, &vehicles, Radius::new(1.0).unwrap());
        for km in 2..=20 {
            let current = coverage(&workshops, &vehicles, Radius::new(km as f64).unwrap());
            for (small, large) in previous.iter().zip(current.iter()) {
                assert!(small.matching_vins.is_subset(&large.matching_vins));
            }
            previous = current;
        }
    }

    #[test]
    fn test_idempotent() {
        let (workshops, vehicles) = fixture();
        let radius = Radius::new(7.0).unwrap();
        assert_eq!(
            coverage(&workshops, &vehicles, radius),
            coverage(&workshops, &vehicles, radius)
        );
    }

    #[test]
    fn test_empty_inputs() {
        let (workshops, _) = fixture();
        let report = coverage(&workshops, &[], Radius::default());
        assert_eq!(report.len(), 2);
        assert!(report.iter().all(|r| r.count == 0 && r.matching_vins.is_empty()));

        let report = coverage(&[], &fixture().1, Radius::default());
        assert!(report.is_empty());
    }

    #[test]
    fn test_no_vehicle_within_one_km() {
        let workshops = vec![workshop("Remote", 10.0, 10.0)];
        let (_, vehicles) = fixture();
        let report = coverage(&workshops, &vehicles, Radius::new(1.0).unwrap());
        assert_eq!(report.results[0].count, 0);
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let (workshops, vehicles) = fixture();
        assert!(matches!(
            coverage_with_radius_km(&workshops, &vehicles, 0.5),
            Err(Error::InvalidRadius(_))
        ));
        assert!(coverage_with_radius_km(&workshops, &vehicles, 21.0).is_err());
        assert!(coverage_with_radius_km(&workshops, &vehicles, 20.0).is_ok());
    }
}
