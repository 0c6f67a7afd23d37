//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CliOverrides;

/// Normalize uniform-color image borders to an exact width
#[derive(Debug, Parser)]
#[command(name = "uniform-border", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize the borders of every image under a directory
    Normalize(NormalizeArgs),
    /// Report the border analysis of a single image without writing
    Inspect(InspectArgs),
    /// Show version and configuration file locations
    Info,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Directory to process (scanned recursively)
    pub input: PathBuf,

    /// Border width in pixels to produce on every side [default: 5]
    #[arg(short, long)]
    pub padding: Option<u32>,

    /// Write results under this directory instead of replacing files in place
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Run log path [default: uniform-border.log]
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Report planned actions without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Write results even if the config file enables dry-run
    #[arg(long, conflicts_with = "dry_run")]
    pub no_dry_run: bool,

    /// JPEG encoding quality (1-100) [default: 75]
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: Option<u8>,

    /// Config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl NormalizeArgs {
    /// Values explicitly set on the command line
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            padding: self.padding,
            output_dir: self.output_dir.clone(),
            dry_run: if self.dry_run {
                Some(true)
            } else if self.no_dry_run {
                Some(false)
            } else {
                None
            },
            log_file: self.log_file.clone(),
            jpeg_quality: self.jpeg_quality,
        }
    }
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Image file to analyze
    pub file: PathBuf,

    /// Border width in pixels used for the plan [default: 5]
    #[arg(short, long)]
    pub padding: Option<u32>,

    /// Config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl InspectArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            padding: self.padding,
            dry_run: Some(true),
            ..CliOverrides::new()
        }
    }
}
