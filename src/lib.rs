//! uniform-border - Normalize uniform-color image borders
//!
//! Detects a single-color border by sampling an image's four corners,
//! finds the content rectangle inside it, and re-renders the image with a
//! border of exactly the requested width on every side. Images whose
//! corners disagree get a white border added around them instead.
//!
//! # Modules
//!
//! - [`border`] - detection, content bounds scanning and normalization
//! - [`batch`] - recursive discovery and per-file processing
//! - [`report`] - structured per-file events and the run log renderer
//! - [`config`] - TOML configuration and CLI overrides
//! - [`logging`] - console and log file setup
//! - [`cli`] - command-line definitions

pub mod batch;
pub mod border;
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

pub use batch::{
    collect_images, is_supported_image, validate_root, write_image, BatchOptions, BatchProcessor,
    BatchSummary, FileAction, DEFAULT_JPEG_QUALITY, IMAGE_EXTENSIONS,
};
pub use border::{
    padded_size, pixel_at, BorderAnalysis, BorderColorDetector, BorderDetection, BorderError,
    BorderNormalizer, BorderWidths, ColorMode, ContentBounds, ContentBoundsScanner, ContentRect,
    NormalizationPlan, NormalizeOptions, NormalizeOptionsBuilder, PixelColor, DEFAULT_PADDING,
    MAX_OUTPUT_PIXELS,
};
pub use cli::{Cli, Commands, InspectArgs, NormalizeArgs};
pub use config::{CliOverrides, Config, ConfigError};
pub use report::{describe_analysis, LogReporter, NullReporter, Reporter};

/// Process exit codes
pub mod exit_codes {
    /// Run completed without per-file failures
    pub const SUCCESS: i32 = 0;
    /// Run completed but at least one file failed, or a command failed
    pub const GENERAL_ERROR: i32 = 1;
    /// Input path is missing or not usable
    pub const INPUT_NOT_FOUND: i32 = 3;
}
