//! Ranked workshop summary table

use belt_app::presentation::{SummaryRow, SummaryTotals};
use belt_domain::model::CoverageReport;
use belt_infra::csv_export::format_count;
use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

pub struct SummaryPanel {
    filter: String,
}

impl SummaryPanel {
    pub fn new() -> Self {
        Self {
            filter: String::new(),
        }
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        report: &CoverageReport,
        rows: &[SummaryRow],
        selected_workshop: &mut Option<String>,
    ) {
        let totals = SummaryTotals::from_report(report);

        ui.horizontal(|ui| {
            ui.heading(format!("Radius {}", report.radius));
            ui.add_space(20.0);
            ui.label(format!(
                "{} workshops, {} with vehicles in range, {} distinct VINs covered",
                totals.workshops, totals.active_workshops, totals.covered_vins
            ));
        });
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("Filter:");
            ui.text_edit_singleline(&mut self.filter);
            if ui.small_button("Clear").clicked() {
                self.filter.clear();
            }
        });
        ui.add_space(6.0);

        if rows.is_empty() {
            ui.label(RichText::new("No workshops loaded.").color(Color32::GRAY));
            return;
        }

        let needle = self.filter.to_lowercase();
        let visible: Vec<&SummaryRow> = rows
            .iter()
            .filter(|r| needle.is_empty() || r.workshop_name.to_lowercase().contains(&needle))
            .collect();

        TableBuilder::new(ui)
            .striped(true)
            .sense(egui::Sense::click())
            .column(Column::exact(40.0))
            .column(Column::remainder().at_least(160.0).clip(true))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(110.0))
            .header(22.0, |mut header| {
                for title in ["#", "Workshop", "Pincode", "Lat", "Lon", "VINs", "NRC VIN count"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(20.0, visible.len(), |mut row| {
                    let r = visible[row.index()];
                    row.set_selected(selected_workshop.as_deref() == Some(r.workshop_name.as_str()));

                    row.col(|ui| {
                        ui.label(r.rank.to_string());
                    });
                    row.col(|ui| {
                        ui.label(r.workshop_name.as_str());
                    });
                    row.col(|ui| {
                        ui.label(r.workshop_pincode.as_deref().unwrap_or("-"));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.4}", r.workshop_lat));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.4}", r.workshop_lon));
                    });
                    row.col(|ui| {
                        ui.label(r.vin_count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(format_count(r.nrc_vin_count_within_radius)).strong());
                    });

                    if row.response().clicked() {
                        // Clicking the selected row again shows all workshops
                        if selected_workshop.as_deref() == Some(r.workshop_name.as_str()) {
                            *selected_workshop = None;
                        } else {
                            *selected_workshop = Some(r.workshop_name.clone());
                        }
                    }
                });
            });
    }
}
