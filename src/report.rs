//! Run reporting
//!
//! The batch layer emits structured per-file events through [`Reporter`];
//! [`LogReporter`] renders them as the human-readable run log.

use std::path::Path;

use crate::batch::{BatchSummary, FileAction};
use crate::border::{BorderAnalysis, BorderDetection, BorderError};

/// Width of the separator lines in the run log
pub const RULE_WIDTH: usize = 80;

/// Separator line
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Receiver of batch processing events
///
/// Every method has an empty default so implementors only override what
/// they need.
pub trait Reporter {
    /// A directory scan is starting
    fn on_scan_start(&self, _root: &Path) {}

    /// Image discovery finished
    fn on_files_found(&self, _root: &Path, _count: usize) {}

    /// Processing of one file is starting
    fn on_file_start(&self, _path: &Path) {}

    /// A file was decoded and planned
    fn on_file_analyzed(&self, _path: &Path, _analysis: &BorderAnalysis) {}

    /// A file finished with the given action
    fn on_file_action(&self, _path: &Path, _action: &FileAction) {}

    /// A file failed; the batch continues
    fn on_file_error(&self, _path: &Path, _error: &BorderError) {}

    /// All files were visited
    fn on_summary(&self, _summary: &BatchSummary) {}
}

/// Reporter that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Reporter that writes the run log through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn on_scan_start(&self, root: &Path) {
        tracing::info!("\n{}", rule());
        tracing::info!("Scanning directory: {}", root.display());
        tracing::info!("{}", rule());
    }

    fn on_files_found(&self, root: &Path, count: usize) {
        if count == 0 {
            tracing::info!("No image files found in {}", root.display());
        } else {
            tracing::info!("Found {} image(s)", count);
        }
    }

    fn on_file_start(&self, path: &Path) {
        tracing::info!("Processing: {}", path.display());
    }

    fn on_file_analyzed(&self, _path: &Path, analysis: &BorderAnalysis) {
        for line in describe_analysis(analysis) {
            tracing::info!("{}", line);
        }
    }

    fn on_file_action(&self, _path: &Path, action: &FileAction) {
        tracing::info!("  Action: {}", action);
    }

    fn on_file_error(&self, path: &Path, error: &BorderError) {
        tracing::error!("  Error processing {}: {}", path.display(), error);
    }

    fn on_summary(&self, summary: &BatchSummary) {
        tracing::info!("\n{}", rule());
        tracing::info!("Summary:");
        tracing::info!("  Total:    {}", summary.total);
        tracing::info!("  Written:  {}", summary.written);
        tracing::info!("  Dry-run:  {}", summary.planned);
        tracing::info!("  Skipped:  {}", summary.skipped);
        tracing::info!("  Failed:   {}", summary.failed);
    }
}

/// Measurement lines for one analyzed image
pub fn describe_analysis(analysis: &BorderAnalysis) -> Vec<String> {
    let (width, height) = analysis.original_size;
    let new_size = match analysis.output_size() {
        Ok((new_width, new_height)) => format!("{}x{}", new_width, new_height),
        Err(_) => "too large".to_string(),
    };

    let color = match analysis.detection {
        BorderDetection::Uniform(color) => color.to_string(),
        BorderDetection::NonUniform => "no uniform border".to_string(),
    };
    let widths = match analysis.bounds {
        Some(bounds) => bounds.borders.to_string(),
        None => "none detected".to_string(),
    };

    vec![
        format!("  Original size: {}x{}", width, height),
        format!("  Border color: {}", color),
        format!("  Border widths - {}", widths),
        format!("  New size: {}", new_size),
    ]
}
