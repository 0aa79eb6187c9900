//! Export of the active coverage to CSV or Excel

pub mod excel;

use std::path::Path;

use belt_domain::CoverageSession;
use belt_infra::csv_export::{export_matched_rows, export_summary};
use belt_types::Result;

pub use excel::export_to_excel;

/// What to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Matching vehicle rows
    Vehicles,
    /// Per-workshop summary
    Summary,
}

/// File format, chosen from the output extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// `.xlsx` writes a workbook; anything else is CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => ExportFormat::Xlsx,
            _ => ExportFormat::Csv,
        }
    }
}

/// Write the session's current coverage to `path`.
///
/// `workshop` limits vehicle rows to one workshop. An Excel workbook always
/// holds both the summary and the vehicle rows.
pub fn export_coverage(
    session: &CoverageSession,
    kind: ExportKind,
    workshop: Option<&str>,
    path: &Path,
) -> Result<()> {
    match (ExportFormat::from_path(path), kind) {
        (ExportFormat::Xlsx, _) => export_to_excel(session, workshop, path),
        (ExportFormat::Csv, ExportKind::Vehicles) => {
            let rows = session.matched_rows(workshop)?;
            export_matched_rows(path, &rows)
        }
        (ExportFormat::Csv, ExportKind::Summary) => export_summary(path, session.report()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("out.xlsx")), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_path(Path::new("OUT.XLSX")), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_path(Path::new("out.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Csv);
    }
}
