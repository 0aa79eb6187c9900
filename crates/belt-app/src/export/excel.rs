//! Excel export functionality

use std::path::Path;

use belt_domain::model::MatchedRow;
use belt_domain::CoverageSession;
use belt_infra::csv_export::{MATCHED_ROW_HEADERS, SUMMARY_HEADERS};
use belt_types::{Error, Result};
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::presentation::{summary_rows, SummaryTotals};

/// Export the session's coverage to an Excel workbook
pub fn export_to_excel(
    session: &CoverageSession,
    workshop: Option<&str>,
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, session).map_err(excel_error)?;

    let vehicles_sheet = workbook.add_worksheet();
    write_vehicles_sheet(vehicles_sheet, session, workshop)?;

    workbook.save(output_path).map_err(excel_error)?;
    info!(path = %output_path.display(), "exported workbook");
    Ok(())
}

fn excel_error(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    session: &CoverageSession,
) -> std::result::Result<(), XlsxError> {
    sheet.set_name("Summary")?;
    let header_format = Format::new().set_bold();

    let report = session.report();
    let totals = SummaryTotals::from_report(report);

    sheet.write_string_with_format(0, 0, "Workshop NRC VIN Belt Analysis", &header_format)?;
    sheet.write_string(2, 0, "Generated:")?;
    sheet.write_string(2, 1, Local::now().format("%Y-%m-%d %H:%M").to_string())?;
    sheet.write_string(3, 0, "Radius (km):")?;
    sheet.write_number(3, 1, report.radius.km())?;
    sheet.write_string(4, 0, "Workshops:")?;
    sheet.write_number(4, 1, totals.workshops as f64)?;
    sheet.write_string(5, 0, "VINs covered:")?;
    sheet.write_number(5, 1, totals.covered_vins as f64)?;

    let table_row = 7;
    for (col, header) in SUMMARY_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(table_row, col as u16, *header, &header_format)?;
    }

    for (i, row) in summary_rows(report).iter().enumerate() {
        let r = table_row + 1 + i as u32;
        sheet.write_string(r, 0, &row.workshop_name)?;
        if let Some(pin) = &row.workshop_pincode {
            sheet.write_string(r, 1, pin)?;
        }
        sheet.write_number(r, 2, row.workshop_lat)?;
        sheet.write_number(r, 3, row.workshop_lon)?;
        sheet.write_number(r, 4, row.radius_km)?;
        sheet.write_number(r, 5, row.vin_count as f64)?;
        sheet.write_number(r, 6, row.nrc_vin_count_within_radius)?;
    }

    sheet.set_column_width(0, 32)?;
    sheet.set_column_width(6, 28)?;
    Ok(())
}

fn write_vehicles_sheet(
    sheet: &mut Worksheet,
    session: &CoverageSession,
    workshop: Option<&str>,
) -> Result<()> {
    let rows = session.matched_rows(workshop)?;
    write_vehicle_rows(sheet, &rows).map_err(excel_error)
}

fn write_vehicle_rows(
    sheet: &mut Worksheet,
    rows: &[MatchedRow<'_>],
) -> std::result::Result<(), XlsxError> {
    sheet.set_name("Vehicles")?;
    let header_format = Format::new().set_bold();
    for (col, header) in MATCHED_ROW_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = 1 + i as u32;
        let vehicle = row.vehicle;
        sheet.write_string(r, 0, &row.workshop.name)?;
        sheet.write_string(r, 1, &vehicle.vin)?;
        if let Some(pin) = &vehicle.pincode {
            sheet.write_string(r, 2, pin)?;
        }
        sheet.write_number(r, 3, vehicle.position.latitude())?;
        sheet.write_number(r, 4, vehicle.position.longitude())?;
        sheet.write_number(r, 5, (row.distance_km * 1000.0).round() / 1000.0)?;
        sheet.write_number(r, 6, vehicle.nrc_vin_count)?;
    }

    sheet.set_column_width(0, 32)?;
    sheet.set_column_width(1, 20)?;
    Ok(())
}
