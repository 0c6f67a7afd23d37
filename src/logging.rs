//! Run log setup
//!
//! Installs a `tracing` subscriber that prints bare messages to stdout and,
//! for batch runs, mirrors them into a log file truncated at start.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Log to stdout and to `log_file`
pub fn init(log_file: &Path) -> io::Result<()> {
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(log_file)?;

    let console = fmt::layer()
        .with_writer(io::stdout)
        .without_time()
        .with_target(false)
        .with_level(false);
    let mirror = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_level(false);

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(console)
        .with(mirror)
        .try_init()
        .map_err(io::Error::other)
}

/// Log to stdout only
pub fn init_console() -> io::Result<()> {
    let console = fmt::layer()
        .with_writer(io::stdout)
        .without_time()
        .with_target(false)
        .with_level(false);

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(console)
        .try_init()
        .map_err(io::Error::other)
}
