//! CLI definition using clap

use std::path::PathBuf;

use belt_types::OutputFormat;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "workshop-belt")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Count NRC vehicles within a radius of each workshop")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workshop locations CSV. Uses config value if not specified.
    #[arg(long, global = true)]
    pub workshops: Option<PathBuf>,

    /// Vehicle projections CSV. Uses config value if not specified.
    #[arg(long, global = true)]
    pub vehicles: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the ranked per-workshop summary
    Summary {
        /// Radius in km (1-20). Uses config value if not specified.
        #[arg(long, short = 'r')]
        radius: Option<f64>,

        /// List every excluded row with its reason
        #[arg(long)]
        show_rejected: bool,
    },

    /// Export vehicles within the radius (or the summary) to CSV/XLSX
    Export {
        /// Radius in km (1-20). Uses config value if not specified.
        #[arg(long, short = 'r')]
        radius: Option<f64>,

        /// Only rows for this workshop
        #[arg(long, short = 'w')]
        workshop: Option<String>,

        /// Export the per-workshop summary instead of vehicle rows
        #[arg(long)]
        summary: bool,

        /// Output file (.csv or .xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default workshops file
        #[arg(long)]
        set_workshops: Option<PathBuf>,

        /// Set default vehicles file
        #[arg(long)]
        set_vehicles: Option<PathBuf>,

        /// Set default radius in km (1-20)
        #[arg(long)]
        set_radius: Option<u32>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Show vehicle points on the map by default
        #[arg(long)]
        set_show_points: Option<bool>,

        /// Set default export directory
        #[arg(long)]
        set_export_dir: Option<PathBuf>,
    },
}
