//! CSV export of coverage results

use std::io::Write;
use std::path::Path;

use belt_domain::model::{CoverageReport, MatchedRow};
use belt_types::{Error, Result};
use tracing::info;

pub const MATCHED_ROW_HEADERS: [&str; 7] = [
    "workshop_name",
    "vin",
    "pincode",
    "latitude",
    "longitude",
    "distance_km",
    "nrc_vin_count",
];

pub const SUMMARY_HEADERS: [&str; 7] = [
    "workshop_name",
    "workshop_pincode",
    "workshop_lat",
    "workshop_lon",
    "radius_km",
    "vin_count",
    "nrc_vin_count_within_radius",
];

pub const DEFAULT_SUMMARY_FILE_NAME: &str = "workshop_nrc_vin_summary.csv";
pub const DEFAULT_VEHICLES_FILE_NAME: &str = "workshop_vins_within_radius.csv";

/// Write matching vehicle rows. With no rows only the header is written.
pub fn write_matched_rows<W: Write>(writer: W, rows: &[MatchedRow<'_>]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(MATCHED_ROW_HEADERS).map_err(csv_error)?;

    for row in rows {
        let vehicle = row.vehicle;
        csv.write_record([
            row.workshop.name.clone(),
            vehicle.vin.clone(),
            vehicle.pincode.clone().unwrap_or_default(),
            vehicle.position.latitude().to_string(),
            vehicle.position.longitude().to_string(),
            format!("{:.3}", row.distance_km),
            format_count(vehicle.nrc_vin_count),
        ])
        .map_err(csv_error)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the per-workshop summary, ranked the same way as the summary table
pub fn write_summary<W: Write>(writer: W, report: &CoverageReport) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(SUMMARY_HEADERS).map_err(csv_error)?;

    let radius_km = report.radius.km().to_string();
    for result in report.ranked() {
        let ws = &result.workshop;
        csv.write_record([
            ws.name.clone(),
            ws.pincode.clone().unwrap_or_default(),
            ws.position.latitude().to_string(),
            ws.position.longitude().to_string(),
            radius_km.clone(),
            result.count.to_string(),
            format_count(result.nrc_vin_total),
        ])
        .map_err(csv_error)?;
    }

    csv.flush()?;
    Ok(())
}

pub fn export_matched_rows(path: &Path, rows: &[MatchedRow<'_>]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_matched_rows(file, rows)?;
    info!(path = %path.display(), rows = rows.len(), "exported vehicle rows");
    Ok(())
}

pub fn export_summary(path: &Path, report: &CoverageReport) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_summary(file, report)?;
    info!(path = %path.display(), workshops = report.len(), "exported workshop summary");
    Ok(())
}

/// Whole counts print without a fractional part
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn csv_error(err: csv::Error) -> Error {
    Error::CsvExport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use belt_domain::model::{Coordinate, Radius, VehicleRecord, Workshop};
    use belt_domain::service::coverage;

    fn workshop() -> Workshop {
        Workshop {
            name: "Andheri".to_string(),
            position: Coordinate::new(19.1136, 72.8697).unwrap(),
            pincode: Some("400053".to_string()),
        }
    }

    fn vehicle() -> VehicleRecord {
        VehicleRecord {
            vin: "MA1AA001".to_string(),
            position: Coordinate::new(19.1136, 72.8697).unwrap(),
            pincode: None,
            nrc_vin_count: 3.0,
            row: 2,
        }
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let mut out = Vec::new();
        write_matched_rows(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "workshop_name,vin,pincode,latitude,longitude,distance_km,nrc_vin_count\n"
        );
    }

    #[test]
    fn test_matched_row_line() {
        let ws = workshop();
        let v = vehicle();
        let rows = [MatchedRow {
            workshop: &ws,
            vehicle: &v,
            distance_km: 0.0,
        }];
        let mut out = Vec::new();
        write_matched_rows(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Andheri,MA1AA001,,19.1136,72.8697,0.000,3");
    }

    #[test]
    fn test_summary_columns() {
        let report = coverage(&[workshop()], &[vehicle()], Radius::new(5.0).unwrap());
        let mut out = Vec::new();
        write_summary(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], SUMMARY_HEADERS.join(","));
        assert_eq!(lines[1], "Andheri,400053,19.1136,72.8697,5,1,3");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(12.0), "12");
        assert_eq!(format_count(2.5), "2.50");
    }
}
