//! Main application structure with tab navigation

use std::path::PathBuf;

use belt_app::app::resolve_data_paths;
use belt_app::config::Config;
use belt_app::presentation::summary_rows;
use belt_domain::model::Radius;
use eframe::egui;
use tracing::error;

use crate::data_state::DataState;
use crate::map_panel::MapPanel;
use crate::sidebar_panel::{SidebarAction, SidebarPanel};
use crate::summary_panel::SummaryPanel;

/// Application tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Summary,
    Map,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Summary => "🔎 Workshop NRC VIN Summary",
            Tab::Map => "🗺 Workshop Belt Map",
        }
    }
}

/// Main application state
pub struct BeltApp {
    current_tab: Tab,
    sidebar: SidebarPanel,
    summary_panel: SummaryPanel,
    map_panel: MapPanel,
    config: Config,
    data: DataState,
    /// Workshop highlighted in the table/map and used for exports
    selected_workshop: Option<String>,
}

impl BeltApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        workshops: Option<PathBuf>,
        vehicles: Option<PathBuf>,
    ) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.interaction.tooltip_delay = 0.2;
        style.animation_time = 0.1;
        cc.egui_ctx.set_style(style);

        let config = Config::load().unwrap_or_else(|e| {
            error!("failed to load config, using defaults: {}", e);
            Config::default()
        });

        let mut app = Self {
            current_tab: Tab::default(),
            sidebar: SidebarPanel::new(&config),
            summary_panel: SummaryPanel::new(),
            map_panel: MapPanel::new(),
            config,
            data: DataState::default(),
            selected_workshop: None,
        };

        // Command-line paths win over configured ones
        if let Ok(paths) = resolve_data_paths(&app.config, workshops.as_deref(), vehicles.as_deref()) {
            app.sidebar.set_paths(Some(paths.workshops.clone()), Some(paths.vehicles.clone()));
            app.load(paths.workshops, paths.vehicles);
        } else {
            app.sidebar.set_paths(workshops, vehicles);
        }

        app
    }

    fn radius(&self) -> Radius {
        Radius::clamped(self.sidebar.radius_km() as f64)
    }

    fn load(&mut self, workshops: PathBuf, vehicles: PathBuf) {
        let radius = self.radius();
        match self.data.load(&workshops, &vehicles, radius) {
            Ok(()) => self.loaded_ok(),
            Err(e) => {
                // Keep the sidebar naming the files that are actually shown
                if let Some((w, v)) = self.data.paths() {
                    self.sidebar.set_paths(Some(w), Some(v));
                }
                self.fail(e);
            }
        }
    }

    fn reload(&mut self) {
        let radius = self.radius();
        match self.data.reload(radius) {
            Ok(()) => self.loaded_ok(),
            Err(e) => {
                self.selected_workshop = None;
                self.fail(e);
            }
        }
    }

    fn loaded_ok(&mut self) {
        if let Some(loaded) = self.data.loaded() {
            self.sidebar.set_status(
                format!(
                    "Loaded {} workshops and {} vehicle rows",
                    loaded.session.dataset().workshops().len(),
                    loaded.session.dataset().vehicles().len()
                ),
                false,
            );
        }
        self.selected_workshop = None;
    }

    fn fail(&mut self, e: belt_types::Error) {
        error!("{}", e);
        self.sidebar.set_status(e.to_string(), true);
    }

    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tab in [Tab::Summary, Tab::Map] {
                let selected = self.current_tab == tab;
                if ui.selectable_label(selected, tab.label()).clicked() {
                    self.current_tab = tab;
                }
                ui.add_space(8.0);
            }
        });
    }
}

impl eframe::App for BeltApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let action = egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                self.sidebar.ui(
                    ui,
                    self.data.loaded(),
                    &self.config,
                    &mut self.selected_workshop,
                )
            })
            .inner;

        match action {
            Some(SidebarAction::Load {
                workshops,
                vehicles,
            }) => self.load(workshops, vehicles),
            Some(SidebarAction::Reload) => self.reload(),
            Some(SidebarAction::RadiusChanged) => {
                let radius = self.radius();
                if let Some(loaded) = self.data.loaded_mut() {
                    loaded.session.set_radius(radius);
                }
            }
            None => {}
        }

        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_tab_bar(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(loaded) = self.data.loaded() else {
                ui.vertical_centered(|ui| {
                    ui.add_space(60.0);
                    ui.label(
                        egui::RichText::new(
                            "Select the workshops and vehicle projection CSV files in the sidebar.",
                        )
                        .color(egui::Color32::GRAY),
                    );
                });
                return;
            };

            match self.current_tab {
                Tab::Summary => {
                    let rows = summary_rows(loaded.session.report());
                    self.summary_panel.ui(
                        ui,
                        loaded.session.report(),
                        &rows,
                        &mut self.selected_workshop,
                    );
                }
                Tab::Map => {
                    self.map_panel.ui(
                        ui,
                        &loaded.session,
                        self.data.generation(),
                        self.sidebar.show_vehicle_points(),
                        &mut self.selected_workshop,
                    );
                }
            }
        });
    }
}
