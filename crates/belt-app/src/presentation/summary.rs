//! Ranked per-workshop summary

use belt_domain::model::CoverageReport;
use serde::Serialize;

/// One line of the workshop summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub rank: usize,
    pub workshop_name: String,
    pub workshop_pincode: Option<String>,
    pub workshop_lat: f64,
    pub workshop_lon: f64,
    pub radius_km: f64,
    pub vin_count: usize,
    pub nrc_vin_count_within_radius: f64,
}

/// Summary rows in ranked order (1-based rank)
pub fn summary_rows(report: &CoverageReport) -> Vec<SummaryRow> {
    report
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(i, result)| SummaryRow {
            rank: i + 1,
            workshop_name: result.workshop.name.clone(),
            workshop_pincode: result.workshop.pincode.clone(),
            workshop_lat: result.workshop.position.latitude(),
            workshop_lon: result.workshop.position.longitude(),
            radius_km: result.radius.km(),
            vin_count: result.count,
            nrc_vin_count_within_radius: result.nrc_vin_total,
        })
        .collect()
}

/// Headline numbers shown above the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryTotals {
    pub workshops: usize,
    /// Workshops with at least one vehicle inside the radius
    pub active_workshops: usize,
    /// Distinct VINs inside any workshop's radius
    pub covered_vins: usize,
}

impl SummaryTotals {
    pub fn from_report(report: &CoverageReport) -> Self {
        Self {
            workshops: report.len(),
            active_workshops: report.iter().filter(|r| r.count > 0).count(),
            covered_vins: report.covered_vins().len(),
        }
    }
}
