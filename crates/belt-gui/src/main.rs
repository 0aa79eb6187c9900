//! GUI entry point for the workshop coverage dashboard

mod app;
mod data_state;
mod map_panel;
mod sidebar_panel;
mod summary_panel;

use std::path::PathBuf;

use app::BeltApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("belt_app=info,belt_infra=info,belt_domain=info,workshop_belt_gui=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Optional: workshops file, then vehicles file
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let workshops = args.next();
    let vehicles = args.next();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Workshop NRC VIN Belt Analysis",
        options,
        Box::new(move |cc| Ok(Box::new(BeltApp::new(cc, workshops, vehicles)))),
    )
}
