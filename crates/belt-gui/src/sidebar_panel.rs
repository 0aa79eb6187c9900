//! Sidebar: data files, radius control, workshop selection and export

use std::path::{Path, PathBuf};

use belt_app::app::LoadedSession;
use belt_app::config::Config;
use belt_app::export::{export_coverage, ExportKind};
use belt_domain::model::coverage::{MAX_RADIUS_KM, MIN_RADIUS_KM};
use belt_infra::csv_export::{DEFAULT_SUMMARY_FILE_NAME, DEFAULT_VEHICLES_FILE_NAME};
use eframe::egui::{self, Color32, RichText, Ui};
use tracing::{error, info};

/// What the sidebar asks the app to do after this frame
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    Load { workshops: PathBuf, vehicles: PathBuf },
    Reload,
    RadiusChanged,
}

pub struct SidebarPanel {
    workshops_path: Option<PathBuf>,
    vehicles_path: Option<PathBuf>,
    radius_km: u32,
    show_vehicle_points: bool,
    /// (message, is_error)
    status_message: Option<(String, bool)>,
}

impl SidebarPanel {
    pub fn new(config: &Config) -> Self {
        Self {
            workshops_path: None,
            vehicles_path: None,
            radius_km: config.default_radius().km() as u32,
            show_vehicle_points: config.show_vehicle_points,
            status_message: None,
        }
    }

    pub fn set_paths(&mut self, workshops: Option<PathBuf>, vehicles: Option<PathBuf>) {
        self.workshops_path = workshops;
        self.vehicles_path = vehicles;
    }

    pub fn set_status(&mut self, message: String, is_error: bool) {
        self.status_message = Some((message, is_error));
    }

    pub fn radius_km(&self) -> u32 {
        self.radius_km
    }

    pub fn show_vehicle_points(&self) -> bool {
        self.show_vehicle_points
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        loaded: Option<&LoadedSession>,
        config: &Config,
        selected_workshop: &mut Option<String>,
    ) -> Option<SidebarAction> {
        let mut action = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Data");
            ui.add_space(6.0);

            file_row(ui, "Workshops", &mut self.workshops_path);
            file_row(ui, "Vehicles", &mut self.vehicles_path);

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let ready = self.workshops_path.is_some() && self.vehicles_path.is_some();
                if ui.add_enabled(ready, egui::Button::new("Load")).clicked() {
                    if let (Some(w), Some(v)) = (&self.workshops_path, &self.vehicles_path) {
                        action = Some(SidebarAction::Load {
                            workshops: w.clone(),
                            vehicles: v.clone(),
                        });
                    }
                }
                if ui
                    .add_enabled(loaded.is_some(), egui::Button::new("Reload"))
                    .on_hover_text("Re-read both files from disk")
                    .clicked()
                {
                    action = Some(SidebarAction::Reload);
                }
            });

            if let Some(loaded) = loaded {
                render_rejected(ui, loaded);
            }

            ui.add_space(10.0);
            ui.separator();
            ui.heading("Filter");
            ui.add_space(6.0);

            let slider = egui::Slider::new(
                &mut self.radius_km,
                MIN_RADIUS_KM as u32..=MAX_RADIUS_KM as u32,
            )
            .text("Radius (km)");
            if ui.add(slider).changed() {
                action = Some(SidebarAction::RadiusChanged);
            }

            ui.checkbox(&mut self.show_vehicle_points, "Show vehicle points on map");

            if let Some(loaded) = loaded {
                ui.add_space(6.0);
                egui::ComboBox::from_label("Workshop")
                    .selected_text(selected_workshop.as_deref().unwrap_or("All workshops"))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(selected_workshop, None, "All workshops");
                        for ws in loaded.session.dataset().workshops() {
                            ui.selectable_value(
                                selected_workshop,
                                Some(ws.name.clone()),
                                ws.name.as_str(),
                            );
                        }
                    });

                ui.add_space(10.0);
                ui.separator();
                ui.heading("Export");
                ui.add_space(6.0);
                self.render_export(ui, loaded, config, selected_workshop.as_deref());
            }

            if let Some((ref msg, is_error)) = self.status_message {
                ui.add_space(10.0);
                let color = if is_error { Color32::RED } else { Color32::GREEN };
                ui.label(RichText::new(msg).color(color));
            }
        });

        action
    }

    fn render_export(
        &mut self,
        ui: &mut Ui,
        loaded: &LoadedSession,
        config: &Config,
        workshop: Option<&str>,
    ) {
        let vehicles_label = match workshop {
            Some(name) => format!("Vehicles for {}...", name),
            None => "Vehicles for all workshops...".to_string(),
        };

        if ui.button(vehicles_label).clicked() {
            if let Some(path) = save_dialog(&config.export_dir(), DEFAULT_VEHICLES_FILE_NAME) {
                self.run_export(loaded, ExportKind::Vehicles, workshop, &path);
            }
        }
        if ui.button("Workshop summary...").clicked() {
            if let Some(path) = save_dialog(&config.export_dir(), DEFAULT_SUMMARY_FILE_NAME) {
                self.run_export(loaded, ExportKind::Summary, None, &path);
            }
        }
    }

    fn run_export(
        &mut self,
        loaded: &LoadedSession,
        kind: ExportKind,
        workshop: Option<&str>,
        path: &Path,
    ) {
        match export_coverage(&loaded.session, kind, workshop, path) {
            Ok(()) => {
                info!(path = %path.display(), "export finished");
                self.set_status(format!("Saved {}", path.display()), false);
            }
            Err(e) => {
                error!("export failed: {}", e);
                self.set_status(format!("Export failed: {}", e), true);
            }
        }
    }
}

fn file_row(ui: &mut Ui, label: &str, path: &mut Option<PathBuf>) {
    ui.horizontal(|ui| {
        if ui.button(format!("{}...", label)).clicked() {
            if let Some(picked) = rfd::FileDialog::new()
                .add_filter("CSV", &["csv"])
                .set_title(format!("Select {} file", label.to_lowercase()))
                .pick_file()
            {
                *path = Some(picked);
            }
        }
        match path {
            Some(p) => {
                let name = p
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.display().to_string());
                ui.label(RichText::new(name).monospace().color(Color32::LIGHT_BLUE))
                    .on_hover_text(p.display().to_string());
            }
            None => {
                ui.label(RichText::new("not selected").color(Color32::GRAY));
            }
        }
    });
}

fn render_rejected(ui: &mut Ui, loaded: &LoadedSession) {
    let total = loaded.rejected_total();
    if total == 0 {
        return;
    }

    ui.add_space(6.0);
    ui.label(
        RichText::new(format!(
            "{} rows excluded ({} with invalid coordinates)",
            total,
            loaded.invalid_coordinate_total()
        ))
        .color(Color32::YELLOW),
    );

    egui::CollapsingHeader::new("Excluded rows")
        .default_open(false)
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .max_height(150.0)
                .show(ui, |ui| {
                    for report in [&loaded.workshop_report, &loaded.vehicle_report] {
                        for rejected in &report.rejected {
                            ui.label(
                                RichText::new(format!(
                                    "{} row {}: {}",
                                    report.source, rejected.row, rejected.reason
                                ))
                                .small(),
                            );
                        }
                    }
                });
        });
}

fn save_dialog(dir: &Path, file_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx"])
        .set_directory(dir)
        .set_file_name(file_name)
        .save_file()
}
