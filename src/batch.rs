//! Batch processing over a directory tree
//!
//! Discovers images recursively, processes them one at a time in sorted
//! path order, and writes each result atomically.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::border::{
    BorderError, BorderNormalizer, NormalizationPlan, NormalizeOptions, Result, DEFAULT_PADDING,
};
use crate::report::Reporter;

// ============================================================
// Constants
// ============================================================

/// Extensions picked up by the directory scan (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Default JPEG encoding quality
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

// ============================================================
// Discovery
// ============================================================

/// Check whether a path has one of [`IMAGE_EXTENSIONS`]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Pre-flight check on the input root
pub fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(BorderError::InputNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(BorderError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Collect image files under `root`, recursively, sorted by path.
///
/// Symlinked directories are not followed. Subdirectories and entries that
/// cannot be read are skipped with a warning.
pub fn collect_images(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if dir.as_path() != root => {
                tracing::warn!("  Skipping unreadable directory {}: {}", dir.display(), e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let Some((path, is_dir)) = read_entry(&dir, entry) else {
                continue;
            };
            if is_dir {
                pending.push(path);
            } else if path.is_file() && is_supported_image(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Path of a directory entry and whether it is a real (non-symlink) directory
fn read_entry(dir: &Path, entry: io::Result<fs::DirEntry>) -> Option<(PathBuf, bool)> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("  Skipping unreadable entry in {}: {}", dir.display(), e);
            return None;
        }
    };
    let path = entry.path();
    match entry.file_type() {
        Ok(file_type) => Some((path, file_type.is_dir())),
        Err(e) => {
            tracing::warn!("  Skipping unreadable entry {}: {}", path.display(), e);
            None
        }
    }
}

/// Decode an image, trusting its content over its extension
fn open_image(path: &Path) -> std::result::Result<DynamicImage, ImageError> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

// ============================================================
// Options & Results
// ============================================================

/// Batch processing options
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptions {
    /// Target border width in pixels
    pub padding: u32,
    /// Output root; `None` replaces files in place
    pub output_dir: Option<PathBuf>,
    /// Report plans without writing
    pub dry_run: bool,
    /// JPEG encoding quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            output_dir: None,
            dry_run: false,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq)]
pub enum FileAction {
    /// Already has no border and no padding was requested
    Skip,
    /// Dry-run: the plan was computed but nothing was written
    DryRun {
        plan: NormalizationPlan,
        padding: u32,
    },
    /// Corners disagreed; a new border was added around the original
    BorderAdded { output: PathBuf, padding: u32 },
    /// The existing border was cropped and re-padded
    BordersApplied { output: PathBuf, padding: u32 },
}

impl FileAction {
    /// Short label for the action
    pub fn label(&self) -> &'static str {
        match self {
            FileAction::Skip => "SKIP",
            FileAction::DryRun { .. } => "DRY-RUN",
            FileAction::BorderAdded { .. } => "UNIFORM BORDER ADDED",
            FileAction::BordersApplied { .. } => "UNIFORM BORDERS APPLIED",
        }
    }

    /// Path written, if any
    pub fn output(&self) -> Option<&Path> {
        match self {
            FileAction::BorderAdded { output, .. } | FileAction::BordersApplied { output, .. } => {
                Some(output)
            }
            _ => None,
        }
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.label();
        match self {
            FileAction::Skip => write!(f, "{} - No excess border detected", label),
            FileAction::DryRun { plan, padding } => match plan {
                NormalizationPlan::Skip => write!(f, "{} - Would leave unchanged", label),
                NormalizationPlan::AddUniformBorder(color) => write!(
                    f,
                    "{} - Would add {}px border of {}",
                    label, padding, color
                ),
                NormalizationPlan::CropAndPad(bounds, _) => write!(
                    f,
                    "{} - Would crop to ({}, {}, {}, {}) and pad {}px",
                    label,
                    bounds.rect.x,
                    bounds.rect.y,
                    bounds.rect.right(),
                    bounds.rect.bottom(),
                    padding
                ),
            },
            FileAction::BorderAdded { output, padding }
            | FileAction::BordersApplied { output, padding } => write!(
                f,
                "{} - Saved to {} with {}px border",
                label,
                output.display(),
                padding
            ),
        }
    }
}

/// Batch counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub written: usize,
    pub skipped: usize,
    pub planned: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// Count a finished file
    pub fn record(&mut self, action: &FileAction) {
        self.total += 1;
        match action {
            FileAction::Skip => self.skipped += 1,
            FileAction::DryRun { .. } => self.planned += 1,
            FileAction::BorderAdded { .. } | FileAction::BordersApplied { .. } => {
                self.written += 1
            }
        }
    }

    /// Count a failed file
    pub fn record_failure(&mut self) {
        self.total += 1;
        self.failed += 1;
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

// ============================================================
// Processor
// ============================================================

/// Sequential batch processor
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    options: BatchOptions,
    normalizer: BorderNormalizer,
}

impl BatchProcessor {
    pub fn new(options: BatchOptions) -> Self {
        let normalizer = BorderNormalizer::new(
            NormalizeOptions::builder()
                .padding(options.padding)
                .build(),
        );
        Self {
            options,
            normalizer,
        }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Destination for `path`: the file itself, or its mirror under the output directory
    pub fn output_path(&self, root: &Path, path: &Path) -> PathBuf {
        let Some(output_dir) = &self.options.output_dir else {
            return path.to_path_buf();
        };

        let relative = path
            .strip_prefix(root)
            .ok()
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(|| path.file_name().map(PathBuf::from))
            .unwrap_or_else(|| path.to_path_buf());
        output_dir.join(relative)
    }

    /// Process one image found under `root`.
    ///
    /// Nothing is written unless the whole transformation succeeded.
    pub fn process_file(
        &self,
        root: &Path,
        path: &Path,
        reporter: &dyn Reporter,
    ) -> Result<FileAction> {
        reporter.on_file_start(path);

        let image = open_image(path).map_err(|source| BorderError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let analysis = self.normalizer.analyze(&image);
        reporter.on_file_analyzed(path, &analysis);

        let padding = self.options.padding;
        if !analysis.plan.is_skip() {
            analysis.output_size()?;
        }

        let action = if analysis.plan.is_skip() {
            FileAction::Skip
        } else if self.options.dry_run {
            FileAction::DryRun {
                plan: analysis.plan,
                padding,
            }
        } else {
            let Some(output) = self.normalizer.apply(&image, &analysis.plan)? else {
                return Ok(FileAction::Skip);
            };
            let target = self.output_path(root, path);
            write_image(&output, &target, self.options.jpeg_quality)?;

            match analysis.plan {
                NormalizationPlan::AddUniformBorder(_) => FileAction::BorderAdded {
                    output: target,
                    padding,
                },
                _ => FileAction::BordersApplied {
                    output: target,
                    padding,
                },
            }
        };

        reporter.on_file_action(path, &action);
        Ok(action)
    }

    /// Process every image under `root`.
    ///
    /// Per-file failures are reported and counted; only an unusable root
    /// fails the whole call.
    pub fn process_directory(&self, root: &Path, reporter: &dyn Reporter) -> Result<BatchSummary> {
        validate_root(root)?;
        reporter.on_scan_start(root);

        let files = collect_images(root)?;
        reporter.on_files_found(root, files.len());

        let mut summary = BatchSummary::default();
        for path in &files {
            match self.process_file(root, path, reporter) {
                Ok(action) => summary.record(&action),
                Err(e) => {
                    reporter.on_file_error(path, &e);
                    summary.record_failure();
                }
            }
        }

        reporter.on_summary(&summary);
        Ok(summary)
    }
}

// ============================================================
// Output
// ============================================================

/// Encode `image` next to `target` and rename it into place.
///
/// The format follows the target's extension. An existing target keeps its
/// permissions; a new one gets the permissions of a plain file create.
pub fn write_image(image: &DynamicImage, target: &Path, jpeg_quality: u8) -> Result<()> {
    let encode_error = |source| BorderError::Encode {
        path: target.to_path_buf(),
        source,
    };

    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let format = ImageFormat::from_path(target).map_err(encode_error)?;
    let existing = fs::metadata(target).ok().map(|metadata| metadata.permissions());
    let mut tmp = temp_file_in(parent, existing.is_none())?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut writer, jpeg_quality.clamp(1, 100));
                image.write_with_encoder(encoder).map_err(encode_error)?;
            }
            other => image.write_to(&mut writer, other).map_err(encode_error)?,
        }
        writer.flush()?;
    }

    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

/// Temp file beside the target; a new target gets plain-create permissions
fn temp_file_in(parent: &Path, new_target: bool) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".uniform-border-");
    if let Some(permissions) = new_target.then(create_permissions).flatten() {
        builder.permissions(permissions);
    }
    builder.tempfile_in(parent)
}

/// Mode 0666, narrowed by the process umask at creation like `File::create`
#[cfg(unix)]
fn create_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn create_permissions() -> Option<fs::Permissions> {
    None
}
