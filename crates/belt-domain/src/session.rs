//! Session-scoped coverage context
//!
//! Holds the loaded dataset, the current radius and the cached distance
//! matrix. Each interactive session owns one `CoverageSession`.

use belt_types::{Error, Result};
use tracing::debug;

use crate::model::{CoverageReport, MatchedRow, Radius, VehicleRecord, Workshop};
use crate::service::DistanceMatrix;

/// Workshops and vehicles loaded for one session
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    workshops: Vec<Workshop>,
    vehicles: Vec<VehicleRecord>,
}

impl Dataset {
    pub fn new(workshops: Vec<Workshop>, vehicles: Vec<VehicleRecord>) -> Self {
        Self {
            workshops,
            vehicles,
        }
    }

    pub fn workshops(&self) -> &[Workshop] {
        &self.workshops
    }

    pub fn vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    pub fn is_empty(&self) -> bool {
        self.workshops.is_empty() && self.vehicles.is_empty()
    }
}

pub struct CoverageSession {
    dataset: Dataset,
    matrix: DistanceMatrix,
    radius: Radius,
    report: CoverageReport,
}

impl CoverageSession {
    pub fn new(dataset: Dataset, radius: Radius) -> Self {
        let matrix = DistanceMatrix::build(dataset.workshops(), dataset.vehicles());
        let report = matrix.coverage(dataset.workshops(), dataset.vehicles(), radius);
        debug!(
            workshops = dataset.workshops().len(),
            vehicles = dataset.vehicles().len(),
            radius_km = radius.km(),
            "coverage session created"
        );
        Self {
            dataset,
            matrix,
            radius,
            report,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn radius(&self) -> Radius {
        self.radius
    }

    pub fn report(&self) -> &CoverageReport {
        &self.report
    }

    /// Change the radius and recompute coverage when it differs
    pub fn set_radius(&mut self, radius: Radius) -> &CoverageReport {
        if radius != self.radius {
            self.radius = radius;
            self.recompute();
        }
        &self.report
    }

    /// Validating variant of [`set_radius`](Self::set_radius) for raw input
    pub fn set_radius_km(&mut self, radius_km: f64) -> Result<&CoverageReport> {
        let radius = Radius::new(radius_km)?;
        Ok(self.set_radius(radius))
    }

    fn recompute(&mut self) {
        self.report = self.matrix.coverage(
            self.dataset.workshops(),
            self.dataset.vehicles(),
            self.radius,
        );
        debug!(
            radius_km = self.radius.km(),
            covered = self.report.covered_vins().len(),
            "coverage recomputed"
        );
    }

    /// Matching vehicle rows of the active report.
    ///
    /// `workshop` limits the rows to one workshop by name; `None` returns the
    /// rows of every workshop in load order. A vehicle covered by several
    /// workshops appears once per workshop.
    pub fn matched_rows(&self, workshop: Option<&str>) -> Result<Vec<MatchedRow<'_>>> {
        if let Some(name) = workshop {
            if self.report.get(name).is_none() {
                return Err(Error::UnknownWorkshop(name.to_string()));
            }
        }

        let mut rows = Vec::new();
        for (wi, result) in self.report.iter().enumerate() {
            if workshop.is_some_and(|name| name != result.workshop.name) {
                continue;
            }
            let ws = &self.dataset.workshops()[wi];
            for (vi, vehicle) in self.dataset.vehicles().iter().enumerate() {
                if !result.contains(&vehicle.vin) {
                    continue;
                }
                let distance_km = self.matrix.distance(wi, vi).unwrap_or_default();
                rows.push(MatchedRow {
                    workshop: ws,
                    vehicle,
                    distance_km,
                });
            }
        }
        Ok(rows)
    }
}
