//! Border normalization
//!
//! Decides, per image, whether to skip it, add a border around it, or crop
//! its existing border and pad it back to the requested width, then renders
//! the result into a new buffer.

use image::{imageops, DynamicImage, GenericImageView, ImageBuffer, Pixel, Primitive};

use super::detect::BorderColorDetector;
use super::scan::ContentBoundsScanner;
use super::types::{
    padded_size, BorderAnalysis, BorderDetection, ColorMode, ContentRect, NormalizationPlan,
    PixelColor, Result,
};

// ============================================================
// Constants
// ============================================================

/// Default border width in pixels
pub const DEFAULT_PADDING: u32 = 5;

// ============================================================
// Options
// ============================================================

/// Normalization options
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Border width to produce on every side
    pub padding: u32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
        }
    }
}

impl NormalizeOptions {
    /// Create a new options builder
    pub fn builder() -> NormalizeOptionsBuilder {
        NormalizeOptionsBuilder::default()
    }
}

/// Builder for NormalizeOptions
#[derive(Debug, Default)]
pub struct NormalizeOptionsBuilder {
    options: NormalizeOptions,
}

impl NormalizeOptionsBuilder {
    /// Set target border width in pixels
    #[must_use]
    pub fn padding(mut self, padding: u32) -> Self {
        self.options.padding = padding;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> NormalizeOptions {
        self.options
    }
}

// ============================================================
// Normalizer
// ============================================================

/// Border normalizer
///
/// Holds no per-image state; the same instance can plan and apply any
/// number of images.
#[derive(Debug, Clone, Default)]
pub struct BorderNormalizer {
    options: NormalizeOptions,
}

impl BorderNormalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Measure an image and decide its plan.
    ///
    /// Images in layouts other than 8/16-bit L, LA, RGB or RGBA are
    /// analyzed as 8-bit RGB.
    pub fn analyze(&self, image: &DynamicImage) -> BorderAnalysis {
        let supported = ColorMode::ensure_supported(image);
        let image = supported.as_ref();
        let padding = self.options.padding;
        let detection = BorderColorDetector::detect(image);

        let (bounds, plan) = match detection {
            BorderDetection::NonUniform => {
                (None, NormalizationPlan::AddUniformBorder(default_fill(image)))
            }
            BorderDetection::Uniform(color) => {
                let bounds = ContentBoundsScanner::scan(image, &color);
                let plan = if bounds.max_border() == 0 && padding == 0 {
                    NormalizationPlan::Skip
                } else {
                    NormalizationPlan::CropAndPad(bounds, color)
                };
                (Some(bounds), plan)
            }
        };

        BorderAnalysis {
            original_size: image.dimensions(),
            detection,
            bounds,
            padding,
            plan,
        }
    }

    /// Decide the plan for an image
    pub fn plan(&self, image: &DynamicImage) -> NormalizationPlan {
        self.analyze(image).plan
    }

    /// Render a plan into a new image.
    ///
    /// Returns `None` for [`NormalizationPlan::Skip`]. The input is only read.
    ///
    /// A plan records the border to crop and the fill color, not the target
    /// width: the padding applied is this normalizer's, so plans must be
    /// applied by the normalizer that produced them for
    /// [`BorderAnalysis::output_size`] to describe the result.
    pub fn apply(
        &self,
        image: &DynamicImage,
        plan: &NormalizationPlan,
    ) -> Result<Option<DynamicImage>> {
        let supported = ColorMode::ensure_supported(image);
        let image = supported.as_ref();
        let padding = self.options.padding;

        let (rect, fill) = match *plan {
            NormalizationPlan::Skip => return Ok(None),
            NormalizationPlan::AddUniformBorder(color) => {
                let (width, height) = image.dimensions();
                (
                    ContentRect {
                        x: 0,
                        y: 0,
                        width,
                        height,
                    },
                    color,
                )
            }
            NormalizationPlan::CropAndPad(bounds, color) => (bounds.rect, color),
        };

        let size = padded_size(rect.width, rect.height, padding)?;
        Ok(map_buffer!(image, buf => crop_and_pad(buf, &rect, size, padding, &fill)))
    }
}

/// White in the image's own channel layout
fn default_fill(image: &DynamicImage) -> PixelColor {
    ColorMode::of(image).unwrap_or(ColorMode::Rgb8).white()
}

fn fill_pixel<P>(color: &PixelColor) -> P
where
    P: Pixel,
    P::Subpixel: TryFrom<u16>,
{
    let max = <P::Subpixel as Primitive>::DEFAULT_MAX_VALUE;
    let mut channels = [max; 4];
    for (dst, src) in channels.iter_mut().zip(color.channels()) {
        *dst = <P::Subpixel as TryFrom<u16>>::try_from(*src).unwrap_or(max);
    }
    *P::from_slice(&channels[..P::CHANNEL_COUNT as usize])
}

fn crop_and_pad<P>(
    buf: &ImageBuffer<P, Vec<P::Subpixel>>,
    rect: &ContentRect,
    (width, height): (u32, u32),
    padding: u32,
    fill: &PixelColor,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: TryFrom<u16>,
{
    let mut canvas = ImageBuffer::from_pixel(width, height, fill_pixel::<P>(fill));

    let content = imageops::crop_imm(buf, rect.x, rect.y, rect.width, rect.height).to_image();
    imageops::replace(&mut canvas, &content, i64::from(padding), i64::from(padding));
    canvas
}
