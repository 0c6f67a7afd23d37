//! Configuration file support
//!
//! Settings come from a TOML file and are overridden by command-line flags.
//!
//! # Search order
//!
//! 1. `--config <path>`
//! 2. `./uniform-border.toml`
//! 3. `<config dir>/uniform-border/config.toml`
//!
//! # Example
//!
//! ```toml
//! padding = 8
//! output_dir = "normalized"
//! dry_run = true
//! log_file = "runs/border.log"
//! jpeg_quality = 90
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::batch::{BatchOptions, DEFAULT_JPEG_QUALITY};
use crate::border::DEFAULT_PADDING;

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "uniform-border.toml";

/// Application directory under the user config dir
pub const APP_CONFIG_DIR: &str = "uniform-border";

/// Default run log path
pub const DEFAULT_LOG_FILE: &str = "uniform-border.log";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Resolved settings for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Border width to produce on every side
    pub padding: u32,
    /// Output root; absent means in place
    pub output_dir: Option<PathBuf>,
    /// Report plans without writing
    pub dry_run: bool,
    /// Run log destination
    pub log_file: PathBuf,
    /// JPEG encoding quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            output_dir: None,
            dry_run: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Candidate config file locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(APP_CONFIG_DIR).join("config.toml"));
        }
        paths
    }

    /// Load the first config file found, or defaults when there is none
    pub fn load() -> Result<Self, ConfigError> {
        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load a specific config file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML text; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Apply command-line overrides (CLI takes precedence)
    #[must_use]
    pub fn merge_with_cli(&self, overrides: &CliOverrides) -> Self {
        let mut merged = self.clone();
        if let Some(padding) = overrides.padding {
            merged.padding = padding;
        }
        if let Some(output_dir) = &overrides.output_dir {
            merged.output_dir = Some(output_dir.clone());
        }
        if let Some(dry_run) = overrides.dry_run {
            merged.dry_run = dry_run;
        }
        if let Some(log_file) = &overrides.log_file {
            merged.log_file = log_file.clone();
        }
        if let Some(quality) = overrides.jpeg_quality {
            merged.jpeg_quality = quality;
        }
        merged.jpeg_quality = merged.jpeg_quality.clamp(1, 100);
        merged
    }

    /// Options for the batch processor
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            padding: self.padding,
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
            jpeg_quality: self.jpeg_quality,
        }
    }
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub padding: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub dry_run: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub jpeg_quality: Option<u8>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}
