//! Corner-based border color detection

use image::{DynamicImage, GenericImageView, Pixel};

use super::types::{BorderDetection, PixelColor};

/// Read one pixel as a [`PixelColor`].
///
/// Out-of-range coordinates and unsupported pixel layouts read as the
/// zero color `(0,)`.
pub fn pixel_at(image: &DynamicImage, x: u32, y: u32) -> PixelColor {
    with_buffer!(
        image,
        buf => buf
            .get_pixel_checked(x, y)
            .map(|p| PixelColor::from_subpixels(p.channels()))
            .unwrap_or_else(PixelColor::zero),
        else PixelColor::zero()
    )
}

/// Border color detector
///
/// Compares only the four corner pixels. An image whose corners agree is
/// treated as having a uniform border of that color; edges between the
/// corners are not inspected here.
pub struct BorderColorDetector;

impl BorderColorDetector {
    /// Corner colors in order: top-left, top-right, bottom-left, bottom-right
    pub fn corners(image: &DynamicImage) -> [PixelColor; 4] {
        let (width, height) = image.dimensions();
        let last_x = width.saturating_sub(1);
        let last_y = height.saturating_sub(1);

        [(0, 0), (last_x, 0), (0, last_y), (last_x, last_y)].map(|(x, y)| pixel_at(image, x, y))
    }

    /// Detect a uniform border color
    pub fn detect(image: &DynamicImage) -> BorderDetection {
        let [first, rest @ ..] = Self::corners(image);
        if rest.iter().all(|c| *c == first) {
            BorderDetection::Uniform(first)
        } else {
            BorderDetection::NonUniform
        }
    }
}
