//! Output formatting module

use belt_app::app::LoadedSession;
use belt_app::presentation::{summary_rows, SummaryRow, SummaryTotals};
use belt_domain::model::LoadReport;
use belt_infra::csv_export::format_count;
use belt_types::{OutputFormat, Result};
use serde::Serialize;

#[derive(Serialize)]
struct SummaryOutput<'a> {
    radius_km: f64,
    totals: SummaryTotals,
    workshops: Vec<SummaryRow>,
    rejected: RejectedOutput<'a>,
}

#[derive(Serialize)]
struct RejectedOutput<'a> {
    workshops: &'a LoadReport,
    vehicles: &'a LoadReport,
}

pub fn output_summary(output_format: OutputFormat, loaded: &LoadedSession) -> Result<()> {
    let report = loaded.session.report();
    let rows = summary_rows(report);
    let totals = SummaryTotals::from_report(report);

    if output_format == OutputFormat::Json {
        let out = SummaryOutput {
            radius_km: report.radius.km(),
            totals,
            workshops: rows,
            rejected: RejectedOutput {
                workshops: &loaded.workshop_report,
                vehicles: &loaded.vehicle_report,
            },
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("\nWorkshop NRC VIN Summary");
    println!("========================");
    println!("Radius:          {}", report.radius);
    println!("Workshops:       {} ({} with vehicles in range)", totals.workshops, totals.active_workshops);
    println!("VINs covered:    {}", totals.covered_vins);
    println!();

    if rows.is_empty() {
        println!("No workshops loaded.");
        return Ok(());
    }

    println!(
        "{:>4}  {:<32} {:<8} {:>9} {:>9} {:>6} {:>10}",
        "#", "Workshop", "Pincode", "Lat", "Lon", "VINs", "NRC VINs"
    );
    println!("{}", "-".repeat(86));
    for row in &rows {
        println!(
            "{:>4}  {:<32} {:<8} {:>9.4} {:>9.4} {:>6} {:>10}",
            row.rank,
            truncate_str(&row.workshop_name, 32),
            row.workshop_pincode.as_deref().unwrap_or("-"),
            row.workshop_lat,
            row.workshop_lon,
            row.vin_count,
            format_count(row.nrc_vin_count_within_radius),
        );
    }

    Ok(())
}

pub fn output_rejected(loaded: &LoadedSession) {
    for report in [&loaded.workshop_report, &loaded.vehicle_report] {
        if report.rejected.is_empty() {
            continue;
        }
        println!("\nExcluded rows in {}:", report.source);
        for rejected in &report.rejected {
            println!("  row {:>5}: {}", rejected.row, rejected.reason);
        }
    }
}

fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Vashi", 10), "Vashi");
        assert_eq!(truncate_str("Andheri West Service", 8), "Andheri…");
    }
}
