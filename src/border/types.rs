//! Border module core types
//!
//! Contains the pixel, geometry and plan types shared by detection,
//! scanning and normalization.

use image::DynamicImage;
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Maximum number of channels a pixel can carry (RGBA)
pub const MAX_CHANNELS: usize = 4;

/// Largest canvas, in pixels, a plan may render (16384 x 16384)
pub const MAX_OUTPUT_PIXELS: u64 = 1 << 28;

// ============================================================
// Error Types
// ============================================================

/// Border normalization error types
#[derive(Debug, Error)]
pub enum BorderError {
    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "Output of {width}x{height} pixels exceeds the {limit} pixel limit",
        limit = MAX_OUTPUT_PIXELS
    )]
    OutputTooLarge { width: u64, height: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BorderError>;

/// Size of a `width` x `height` region with `padding` added on every side.
///
/// Fails when the result does not fit a `u32` dimension or exceeds
/// [`MAX_OUTPUT_PIXELS`].
pub fn padded_size(width: u32, height: u32, padding: u32) -> Result<(u32, u32)> {
    let pad = 2 * u64::from(padding);
    let (width, height) = (u64::from(width) + pad, u64::from(height) + pad);
    let too_large = || BorderError::OutputTooLarge { width, height };

    let pixels = width.checked_mul(height).ok_or_else(too_large)?;
    if pixels > MAX_OUTPUT_PIXELS {
        return Err(too_large());
    }
    let width = u32::try_from(width).map_err(|_| too_large())?;
    let height = u32::try_from(height).map_err(|_| too_large())?;
    Ok((width, height))
}

// ============================================================
// Pixel Color
// ============================================================

/// Exact value of one pixel: 1 to 4 integer channels.
///
/// Unused channel slots are always zero so derived equality is exact
/// channel-by-channel equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelColor {
    channels: [u16; MAX_CHANNELS],
    len: u8,
}

impl PixelColor {
    /// Build a color from channel values. Channels beyond four are ignored;
    /// an empty slice yields the zero color.
    pub fn new(channels: &[u16]) -> Self {
        if channels.is_empty() {
            return Self::zero();
        }
        let len = channels.len().min(MAX_CHANNELS);
        let mut values = [0u16; MAX_CHANNELS];
        values[..len].copy_from_slice(&channels[..len]);
        Self {
            channels: values,
            len: len as u8,
        }
    }

    /// Single-channel zero, used when a pixel cannot be read
    pub fn zero() -> Self {
        Self {
            channels: [0; MAX_CHANNELS],
            len: 1,
        }
    }

    /// Build a color from any subpixel type that widens into `u16`
    pub fn from_subpixels<S: Copy + Into<u16>>(channels: &[S]) -> Self {
        let mut values = [0u16; MAX_CHANNELS];
        let len = channels.len().min(MAX_CHANNELS);
        for (dst, src) in values.iter_mut().zip(channels) {
            *dst = (*src).into();
        }
        if len == 0 {
            return Self::zero();
        }
        Self {
            channels: values,
            len: len as u8,
        }
    }

    /// Channel values
    pub fn channels(&self) -> &[u16] {
        &self.channels[..self.len as usize]
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.len as usize
    }

    /// Exact comparison against a raw pixel
    #[inline]
    pub fn matches<S: Copy + Into<u16>>(&self, pixel: &[S]) -> bool {
        pixel.len() == self.len as usize
            && pixel
                .iter()
                .zip(self.channels())
                .all(|(p, c)| (*p).into() == *c)
    }
}

impl fmt::Display for PixelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.channels().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        if self.len == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

// ============================================================
// Color Mode
// ============================================================

/// Pixel layouts the normalizer works on directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    L8,
    La8,
    Rgb8,
    Rgba8,
    L16,
    La16,
    Rgb16,
    Rgba16,
}

impl ColorMode {
    /// Mode of a decoded image, or `None` when it has to be converted first
    pub fn of(image: &DynamicImage) -> Option<Self> {
        match image {
            DynamicImage::ImageLuma8(_) => Some(Self::L8),
            DynamicImage::ImageLumaA8(_) => Some(Self::La8),
            DynamicImage::ImageRgb8(_) => Some(Self::Rgb8),
            DynamicImage::ImageRgba8(_) => Some(Self::Rgba8),
            DynamicImage::ImageLuma16(_) => Some(Self::L16),
            DynamicImage::ImageLumaA16(_) => Some(Self::La16),
            DynamicImage::ImageRgb16(_) => Some(Self::Rgb16),
            DynamicImage::ImageRgba16(_) => Some(Self::Rgba16),
            _ => None,
        }
    }

    /// Borrow the image if its mode is supported, otherwise convert it to 8-bit RGB
    pub fn ensure_supported(image: &DynamicImage) -> Cow<'_, DynamicImage> {
        match Self::of(image) {
            Some(_) => Cow::Borrowed(image),
            None => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        }
    }

    pub fn channel_count(&self) -> usize {
        match self {
            Self::L8 | Self::L16 => 1,
            Self::La8 | Self::La16 => 2,
            Self::Rgb8 | Self::Rgb16 => 3,
            Self::Rgba8 | Self::Rgba16 => 4,
        }
    }

    /// Largest channel value
    pub fn max_value(&self) -> u16 {
        match self {
            Self::L8 | Self::La8 | Self::Rgb8 | Self::Rgba8 => u8::MAX as u16,
            _ => u16::MAX,
        }
    }

    /// Opaque white in this mode
    pub fn white(&self) -> PixelColor {
        PixelColor::new(&vec![self.max_value(); self.channel_count()])
    }
}

// ============================================================
// Detection & Geometry
// ============================================================

/// Outcome of the four-corner check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderDetection {
    /// All four corners share this exact color
    Uniform(PixelColor),
    /// At least one corner differs
    NonUniform,
}

impl BorderDetection {
    pub fn color(&self) -> Option<PixelColor> {
        match self {
            Self::Uniform(color) => Some(*color),
            Self::NonUniform => None,
        }
    }
}

/// Content rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ContentRect {
    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Detected border width on each edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderWidths {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl BorderWidths {
    pub fn uniform(width: u32) -> Self {
        Self {
            left: width,
            right: width,
            top: width,
            bottom: width,
        }
    }

    /// Widest of the four edges
    pub fn max(&self) -> u32 {
        self.left.max(self.right).max(self.top).max(self.bottom)
    }
}

impl fmt::Display for BorderWidths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L:{} R:{} T:{} B:{}",
            self.left, self.right, self.top, self.bottom
        )
    }
}

/// Tight content rectangle plus per-edge border widths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBounds {
    pub rect: ContentRect,
    pub borders: BorderWidths,
    /// False when every pixel equals the border color; `rect` then covers the full image
    pub content_found: bool,
}

impl ContentBounds {
    /// Bounds covering the whole image with zero-width borders
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            rect: ContentRect {
                x: 0,
                y: 0,
                width,
                height,
            },
            borders: BorderWidths::default(),
            content_found: false,
        }
    }

    pub fn max_border(&self) -> u32 {
        self.borders.max()
    }
}

// ============================================================
// Plan
// ============================================================

/// Transformation decided for one image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationPlan {
    /// Nothing to do
    Skip,
    /// Corners disagree: surround the untouched image with this color
    AddUniformBorder(PixelColor),
    /// Crop to the content rectangle and pad with the detected border color
    CropAndPad(ContentBounds, PixelColor),
}

impl NormalizationPlan {
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

/// Everything measured while planning one image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderAnalysis {
    pub original_size: (u32, u32),
    pub detection: BorderDetection,
    /// Present only for uniform detections
    pub bounds: Option<ContentBounds>,
    pub padding: u32,
    pub plan: NormalizationPlan,
}

impl BorderAnalysis {
    /// Dimensions the plan produces
    pub fn output_size(&self) -> Result<(u32, u32)> {
        match self.plan {
            NormalizationPlan::Skip => Ok(self.original_size),
            NormalizationPlan::AddUniformBorder(_) => {
                padded_size(self.original_size.0, self.original_size.1, self.padding)
            }
            NormalizationPlan::CropAndPad(bounds, _) => {
                padded_size(bounds.rect.width, bounds.rect.height, self.padding)
            }
        }
    }
}
