//! Command-line interface for the diffusion text utilities.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::measures::LabelPolicy;
use crate::ToolsConfig;

#[derive(Parser)]
#[command(name = "dwi-tools")]
#[command(about = "Text utilities for diffusion-imaging workflows", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress run summaries
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy whitespace-separated columns from one file into another
    CopyColumns {
        /// Input file to select the columns from
        file_in: PathBuf,
        /// Output file to write the columns into
        file_out: PathBuf,
        /// Zero-based indices of the columns to copy, in output order
        #[arg(required = true, num_args = 1..)]
        indices: Vec<usize>,
    },

    /// Restructure per-subject diffusion measure files into a CSV table
    DiffTable {
        /// Working directory, generally the folder with diffusion maps
        #[arg(long)]
        workdir: PathBuf,
        /// Output directory for the CSV table
        #[arg(long)]
        outdir: PathBuf,
        /// Subject ID (filename prefix of the measure files)
        #[arg(long)]
        subjid: String,
        /// Always label rows with all 7 measures instead of inferring 4 or 7
        #[arg(long)]
        fixed_labels: bool,
    },

    /// Print indices of first-row values lying within [MIN, MAX]
    BvalRange {
        /// bval input file
        bval: PathBuf,
        /// Minimum value to be selected
        #[arg(allow_negative_numbers = true)]
        min: f64,
        /// Maximum value to be selected
        #[arg(allow_negative_numbers = true)]
        max: f64,
    },

    /// Write the default configuration as YAML
    InitConfig {
        /// Output YAML file
        path: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.chars().count() > 39 {
            format!("{}...", value.chars().take(36).collect::<String>())
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<39} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    debug!("dwi-tools {}", crate::VERSION);

    // Load config
    let config = match &cli.config {
        Some(path) => match ToolsConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                ToolsConfig::default()
            }
        },
        None => ToolsConfig::default(),
    };

    // Dispatch to subcommands
    match cli.command {
        Commands::CopyColumns {
            file_in,
            file_out,
            indices,
        } => {
            cmd_copy_columns(&file_in, &file_out, &indices, cli.quiet, &config);
        }
        Commands::DiffTable {
            workdir,
            outdir,
            subjid,
            fixed_labels,
        } => {
            cmd_diff_table(&workdir, &outdir, &subjid, fixed_labels, cli.quiet, &config);
        }
        Commands::BvalRange { bval, min, max } => {
            cmd_bval_range(&bval, min, max, &config);
        }
        Commands::InitConfig { path } => {
            cmd_init_config(&path, &config);
        }
    }
}

fn cmd_copy_columns(
    file_in: &Path,
    file_out: &Path,
    indices: &[usize],
    quiet: bool,
    config: &ToolsConfig,
) {
    use crate::processors::columns;

    let start = Instant::now();

    match columns::copy_columns(file_in, file_out, indices, &config.columns) {
        Ok(lines) => {
            if !quiet {
                print_summary(
                    "Copy Columns Complete",
                    &[
                        ("Input file", file_in.display().to_string()),
                        ("Output file", file_out.display().to_string()),
                        ("Columns", format!("{:?}", indices)),
                        ("Lines written", lines.to_string()),
                        ("Duration", format!("{:.2?}", start.elapsed())),
                    ],
                );
            }
        }
        Err(e) => {
            error!("Copy columns failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_diff_table(
    workdir: &Path,
    outdir: &Path,
    subjid: &str,
    fixed_labels: bool,
    quiet: bool,
    config: &ToolsConfig,
) {
    use crate::processors::diff_table;

    let start = Instant::now();

    let mut table_config = config.table.clone();
    if fixed_labels {
        table_config.label_policy = LabelPolicy::Fixed;
    }

    info!("Building diffusion table for subject {}", subjid);
    info!("Working directory: {}", workdir.display());
    info!("Output directory: {}", outdir.display());

    let spinner = create_spinner("Collecting diffusion measure files...");

    match diff_table::convert_subject(workdir, outdir, subjid, &table_config) {
        Ok((csv_path, table)) => {
            spinner.finish_and_clear();

            if !quiet {
                print_summary(
                    "Diffusion Table Complete",
                    &[
                        ("Subject", subjid.to_string()),
                        ("Output CSV", csv_path.display().to_string()),
                        ("Metrics", table.column_names().join(", ")),
                        ("Measures", table.num_rows().to_string()),
                        ("Duration", format!("{:.2?}", start.elapsed())),
                    ],
                );
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Diffusion table failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_bval_range(bval: &Path, min: f64, max: f64, config: &ToolsConfig) {
    use crate::processors::bval_range;

    match bval_range::find_indices_in_range(bval, min, max) {
        Ok(indices) => {
            info!("{} indices within [{}, {}]", indices.len(), min, max);
            println!("{}", bval_range::format_indices(&indices, &config.range.separator));
        }
        Err(e) => {
            error!("bval range selection failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_init_config(path: &Path, config: &ToolsConfig) {
    match config.to_yaml(path) {
        Ok(()) => info!("Wrote config to: {}", path.display()),
        Err(e) => {
            error!("Failed to write config to {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
