//! CSV loaders for workshop locations and vehicle projections
//!
//! Bad rows never abort a load: they are left out and recorded in the
//! returned [`LoadReport`]. Only a file without the required columns fails.

use std::collections::HashSet;
use std::path::Path;

use belt_domain::model::{Coordinate, LoadReport, RejectReason, VehicleRecord, Workshop};
use belt_types::Error;
use thiserror::Error;
use tracing::{debug, warn};

use crate::tabular::{
    decode_text, parse_coordinate, parse_count, ColumnResolver, LATITUDE_COLUMNS,
    LONGITUDE_COLUMNS, NRC_COUNT_COLUMNS, PINCODE_COLUMNS, VIN_COLUMNS, WORKSHOP_NAME_COLUMNS,
};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error(
        "Could not detect required columns in {file}: {}; columns found: {}",
        .missing.join(", "),
        .found.join(", ")
    )]
    MissingColumns {
        file: String,
        missing: Vec<String>,
        found: Vec<String>,
    },
}

impl From<LoaderError> for Error {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::IoError(e) => Error::Io(e),
            LoaderError::MissingColumns {
                file,
                missing,
                found,
            } => Error::MissingColumns {
                file,
                missing,
                found,
            },
            LoaderError::CsvError(e) => Error::CsvLoader(e.to_string()),
        }
    }
}

/// Load workshops from a CSV file
pub fn load_workshops<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<Workshop>, LoadReport), LoaderError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    parse_workshops(&bytes, &source_name(path))
}

/// Load vehicle records from a CSV file
pub fn load_vehicles<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<VehicleRecord>, LoadReport), LoaderError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    parse_vehicles(&bytes, &source_name(path))
}

/// Parse workshops from raw CSV bytes.
///
/// Required columns: name, latitude, longitude. Pincode is optional.
pub fn parse_workshops(
    bytes: &[u8],
    source: &str,
) -> Result<(Vec<Workshop>, LoadReport), LoaderError> {
    let text = decode_text(bytes);
    let mut reader = reader_for(&text);
    let mut columns = ColumnResolver::new(reader.headers()?.iter());

    let name_col = columns.resolve(WORKSHOP_NAME_COLUMNS);
    let lat_col = columns.resolve(LATITUDE_COLUMNS);
    let lon_col = columns.resolve(LONGITUDE_COLUMNS);
    let pin_col = columns.resolve(PINCODE_COLUMNS);

    let (name_col, lat_col, lon_col) = match (name_col, lat_col, lon_col) {
        (Some(n), Some(la), Some(lo)) => (n, la, lo),
        _ => {
            return Err(missing_columns(
                source,
                &columns,
                [
                    ("workshop name", name_col),
                    ("workshop lat", lat_col),
                    ("workshop lon", lon_col),
                ],
            ))
        }
    };

    let mut report = LoadReport::new(source);
    let mut workshops = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 2; // header is row 1

        let name = cell(&record, Some(name_col));
        if name.is_empty() {
            report.reject(row, RejectReason::MissingName);
            continue;
        }

        let position = match parse_position(&record, lat_col, lon_col) {
            Ok(p) => p,
            Err(reason) => {
                report.reject(row, reason);
                continue;
            }
        };

        workshops.push(Workshop {
            name: name.to_string(),
            position,
            pincode: optional_cell(&record, pin_col),
        });
    }

    report.loaded = workshops.len();
    log_report(&report);
    Ok((workshops, report))
}

/// Parse vehicle records from raw CSV bytes.
///
/// Required columns: latitude, longitude. Without a VIN column every row gets
/// a `ROW-<line>` id; without an NRC count column every row counts as 1.
pub fn parse_vehicles(
    bytes: &[u8],
    source: &str,
) -> Result<(Vec<VehicleRecord>, LoadReport), LoaderError> {
    let text = decode_text(bytes);
    let mut reader = reader_for(&text);
    let mut columns = ColumnResolver::new(reader.headers()?.iter());

    // "vin" is a substring of too many headers ("State/Province"), so no fuzzy pass
    let nrc_col = columns.resolve(NRC_COUNT_COLUMNS);
    let vin_col = columns.resolve_exact(VIN_COLUMNS);
    let lat_col = columns.resolve(LATITUDE_COLUMNS);
    let lon_col = columns.resolve(LONGITUDE_COLUMNS);
    let pin_col = columns.resolve(PINCODE_COLUMNS);

    let (lat_col, lon_col) = match (lat_col, lon_col) {
        (Some(la), Some(lo)) => (la, lo),
        _ => {
            return Err(missing_columns(
                source,
                &columns,
                [("vehicle lat", lat_col), ("vehicle lon", lon_col)],
            ))
        }
    };

    let mut report = LoadReport::new(source);
    let mut vehicles = Vec::new();
    let mut seen_vins = HashSet::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 2;

        let vin = match vin_col {
            Some(_) => {
                let vin = cell(&record, vin_col);
                if vin.is_empty() {
                    report.reject(row, RejectReason::MissingVin);
                    continue;
                }
                vin.to_string()
            }
            None => format!("ROW-{}", row),
        };

        let position = match parse_position(&record, lat_col, lon_col) {
            Ok(p) => p,
            Err(reason) => {
                report.reject(row, reason);
                continue;
            }
        };

        if !seen_vins.insert(vin.clone()) {
            report.reject(row, RejectReason::DuplicateVin(vin));
            continue;
        }

        let nrc_vin_count = match nrc_col {
            Some(_) => parse_count(cell(&record, nrc_col)),
            None => 1.0,
        };

        vehicles.push(VehicleRecord {
            vin,
            position,
            pincode: optional_cell(&record, pin_col),
            nrc_vin_count,
            row,
        });
    }

    report.loaded = vehicles.len();
    log_report(&report);
    Ok((vehicles, report))
}

fn reader_for(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn cell(record: &csv::StringRecord, col: Option<usize>) -> &str {
    col.and_then(|c| record.get(c)).unwrap_or("").trim()
}

fn optional_cell(record: &csv::StringRecord, col: Option<usize>) -> Option<String> {
    let value = cell(record, col);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_position(
    record: &csv::StringRecord,
    lat_col: usize,
    lon_col: usize,
) -> Result<Coordinate, RejectReason> {
    let lat_raw = cell(record, Some(lat_col));
    let lon_raw = cell(record, Some(lon_col));
    let invalid = || RejectReason::InvalidCoordinate {
        latitude: lat_raw.to_string(),
        longitude: lon_raw.to_string(),
    };

    let (lat, lon) = match (parse_coordinate(lat_raw), parse_coordinate(lon_raw)) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return Err(invalid()),
    };
    Coordinate::new(lat, lon).map_err(|_| invalid())
}

fn missing_columns<const N: usize>(
    source: &str,
    columns: &ColumnResolver,
    required: [(&str, Option<usize>); N],
) -> LoaderError {
    LoaderError::MissingColumns {
        file: source.to_string(),
        missing: required
            .iter()
            .filter(|(_, col)| col.is_none())
            .map(|(label, _)| label.to_string())
            .collect(),
        found: columns.headers().to_vec(),
    }
}

fn log_report(report: &LoadReport) {
    debug!(source = %report.source, loaded = report.loaded, "rows loaded");
    for rejected in &report.rejected {
        warn!(source = %report.source, row = rejected.row, "row excluded: {}", rejected.reason);
    }
    if report.rejected_count() > 0 {
        warn!(
            source = %report.source,
            rejected = report.rejected_count(),
            invalid_coordinates = report.invalid_coordinate_count(),
            "rows excluded from computation"
        );
    }
}
