//! Command handlers

use std::path::PathBuf;

use belt_app::app::{open_session, resolve_data_paths, LoadedSession};
use belt_app::config::Config;
use belt_app::export::{export_coverage, ExportFormat, ExportKind};
use belt_domain::model::Radius;
use belt_infra::csv_export::{DEFAULT_SUMMARY_FILE_NAME, DEFAULT_VEHICLES_FILE_NAME};
use belt_types::{OutputFormat, Result};
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::output::{output_rejected, output_summary};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Summary {
            radius,
            show_rejected,
        } => {
            let loaded = load(&cli, &config, *radius)?;
            output_summary(output_format, &loaded)?;
            if *show_rejected && output_format == OutputFormat::Table {
                output_rejected(&loaded);
            }
            Ok(())
        }

        Commands::Export {
            radius,
            workshop,
            summary,
            output,
        } => {
            let loaded = load(&cli, &config, *radius)?;
            cmd_export(&config, &loaded, workshop.as_deref(), *summary, output.clone())
        }

        Commands::Config {
            show,
            set_workshops,
            set_vehicles,
            set_radius,
            set_output,
            set_show_points,
            set_export_dir,
        } => cmd_config(
            config,
            *show,
            set_workshops.clone(),
            set_vehicles.clone(),
            *set_radius,
            *set_output,
            *set_show_points,
            set_export_dir.clone(),
        ),
    }
}

/// Radius from the command line (validated) or from config (clamped)
fn pick_radius(config: &Config, radius: Option<f64>) -> Result<Radius> {
    match radius {
        Some(km) => Radius::new(km),
        None => Ok(config.default_radius()),
    }
}

fn load(cli: &Cli, config: &Config, radius: Option<f64>) -> Result<LoadedSession> {
    let radius = pick_radius(config, radius)?;
    let paths = resolve_data_paths(config, cli.workshops.as_deref(), cli.vehicles.as_deref())?;
    debug!(?paths, radius_km = radius.km(), "loading data");

    let loaded = open_session(&paths, radius)?;
    if loaded.rejected_total() > 0 {
        eprintln!(
            "Excluded {} row(s) with invalid data ({} with bad coordinates)",
            loaded.rejected_total(),
            loaded.invalid_coordinate_total()
        );
    }
    Ok(loaded)
}

fn cmd_export(
    config: &Config,
    loaded: &LoadedSession,
    workshop: Option<&str>,
    summary: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let kind = if summary {
        ExportKind::Summary
    } else {
        ExportKind::Vehicles
    };
    if summary && workshop.is_some() {
        warn!("--workshop is ignored for summary exports");
    }

    let output = output.unwrap_or_else(|| {
        let name = match kind {
            ExportKind::Summary => DEFAULT_SUMMARY_FILE_NAME,
            ExportKind::Vehicles => DEFAULT_VEHICLES_FILE_NAME,
        };
        config.export_dir().join(name)
    });

    export_coverage(&loaded.session, kind, workshop, &output)?;

    let what = match (ExportFormat::from_path(&output), kind) {
        (ExportFormat::Xlsx, _) => "Workbook",
        (_, ExportKind::Summary) => "Summary",
        (_, ExportKind::Vehicles) => "Vehicle rows",
    };
    println!(
        "{} exported to: {} (radius {})",
        what,
        output.display(),
        loaded.session.radius()
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    mut config: Config,
    show: bool,
    set_workshops: Option<PathBuf>,
    set_vehicles: Option<PathBuf>,
    set_radius: Option<u32>,
    set_output: Option<OutputFormat>,
    set_show_points: Option<bool>,
    set_export_dir: Option<PathBuf>,
) -> Result<()> {
    let mut modified = false;

    if let Some(path) = set_workshops {
        config.workshops_path = Some(path);
        modified = true;
    }
    if let Some(path) = set_vehicles {
        config.vehicles_path = Some(path);
        modified = true;
    }
    if let Some(km) = set_radius {
        config.set_default_radius_km(km)?;
        modified = true;
    }
    if let Some(format) = set_output {
        config.output_format = format;
        modified = true;
    }
    if let Some(show_points) = set_show_points {
        config.show_vehicle_points = show_points;
        modified = true;
    }
    if let Some(dir) = set_export_dir {
        config.export_dir = Some(dir);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved.");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
