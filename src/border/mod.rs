//! Border Detection & Normalization module
//!
//! Detects a uniform-color border from an image's four corners, finds the
//! tight content rectangle inside it, and re-renders the image with a border
//! of an exact width on every side.
//!
//! # Features
//!
//! - Corner-sampling border color detection (exact pixel equality)
//! - Per-edge content bounds scanning
//! - Skip / add-border / crop-and-pad planning
//! - 8-bit and 16-bit L, LA, RGB and RGBA buffers
//!
//! # Example
//!
//! ```rust,no_run
//! use uniform_border::{BorderNormalizer, NormalizeOptions};
//!
//! let image = image::open("scan.png").unwrap();
//! let normalizer = BorderNormalizer::new(NormalizeOptions::builder().padding(5).build());
//!
//! let analysis = normalizer.analyze(&image);
//! println!("Borders: {:?}", analysis.bounds.map(|b| b.borders));
//!
//! if let Some(output) = normalizer.apply(&image, &analysis.plan).unwrap() {
//!     output.save("scan-normalized.png").unwrap();
//! }
//! ```

/// Evaluate `$body` with `$buf` bound to the typed buffer of a supported image,
/// or `$fallback` for any other layout.
macro_rules! with_buffer {
    ($image:expr, $buf:ident => $body:expr, else $fallback:expr) => {
        match $image {
            image::DynamicImage::ImageLuma8($buf) => $body,
            image::DynamicImage::ImageLumaA8($buf) => $body,
            image::DynamicImage::ImageRgb8($buf) => $body,
            image::DynamicImage::ImageRgba8($buf) => $body,
            image::DynamicImage::ImageLuma16($buf) => $body,
            image::DynamicImage::ImageLumaA16($buf) => $body,
            image::DynamicImage::ImageRgb16($buf) => $body,
            image::DynamicImage::ImageRgba16($buf) => $body,
            _ => $fallback,
        }
    };
}

/// Like [`with_buffer!`], but wraps the produced buffer back into the same
/// `DynamicImage` variant. Yields `None` for unsupported layouts.
macro_rules! map_buffer {
    ($image:expr, $buf:ident => $body:expr) => {
        match $image {
            image::DynamicImage::ImageLuma8($buf) => Some(image::DynamicImage::ImageLuma8($body)),
            image::DynamicImage::ImageLumaA8($buf) => Some(image::DynamicImage::ImageLumaA8($body)),
            image::DynamicImage::ImageRgb8($buf) => Some(image::DynamicImage::ImageRgb8($body)),
            image::DynamicImage::ImageRgba8($buf) => Some(image::DynamicImage::ImageRgba8($body)),
            image::DynamicImage::ImageLuma16($buf) => Some(image::DynamicImage::ImageLuma16($body)),
            image::DynamicImage::ImageLumaA16($buf) => {
                Some(image::DynamicImage::ImageLumaA16($body))
            }
            image::DynamicImage::ImageRgb16($buf) => Some(image::DynamicImage::ImageRgb16($body)),
            image::DynamicImage::ImageRgba16($buf) => Some(image::DynamicImage::ImageRgba16($body)),
            _ => None,
        }
    };
}

// Submodules
mod detect;
mod normalize;
mod scan;
mod types;

// Re-export public API
pub use detect::{pixel_at, BorderColorDetector};
pub use normalize::{BorderNormalizer, NormalizeOptions, NormalizeOptionsBuilder, DEFAULT_PADDING};
pub use scan::ContentBoundsScanner;
pub use types::{
    BorderAnalysis, BorderDetection, BorderError, BorderWidths, ColorMode, ContentBounds,
    ContentRect, NormalizationPlan, PixelColor, Result, MAX_CHANNELS, MAX_OUTPUT_PIXELS,
};
pub use types::padded_size;
