//! Content bounds scanning
//!
//! Finds the tight rectangle around every pixel that differs from a known
//! border color by scanning inward from each of the four edges.
//!
//! # Algorithm
//!
//! 1. Left: first column (from `x = 0`) containing any differing pixel
//! 2. Right: last such column (scanning down from `width - 1`)
//! 3. Top / Bottom: the same over rows
//!
//! Every column or row is checked in full before moving on; a single
//! border-colored row proves nothing about the rest of the image.

use image::{DynamicImage, ImageBuffer, Pixel};

use super::types::{BorderWidths, ColorMode, ContentBounds, ContentRect, PixelColor};

/// Content bounds scanner
pub struct ContentBoundsScanner;

impl ContentBoundsScanner {
    /// Scan an image for content that differs from `border_color`.
    ///
    /// Only meaningful after [`super::BorderColorDetector`] reported a uniform
    /// border. When no pixel differs, the bounds cover the full image with
    /// zero-width borders and `content_found` is false.
    pub fn scan(image: &DynamicImage, border_color: &PixelColor) -> ContentBounds {
        let supported = ColorMode::ensure_supported(image);
        let image = supported.as_ref();
        with_buffer!(
            image,
            buf => scan_buffer(buf, border_color),
            else ContentBounds::full(image.width(), image.height())
        )
    }
}

fn scan_buffer<P>(buf: &ImageBuffer<P, Vec<P::Subpixel>>, color: &PixelColor) -> ContentBounds
where
    P: Pixel,
    P::Subpixel: Into<u16>,
{
    let (width, height) = buf.dimensions();

    let differs = |x: u32, y: u32| !color.matches(buf.get_pixel(x, y).channels());
    let column_has_content = |x: u32| (0..height).any(|y| differs(x, y));
    let row_has_content = |y: u32| (0..width).any(|x| differs(x, y));

    // No differing pixel anywhere: the other three scans cannot find one either
    let Some(left) = (0..width).find(|&x| column_has_content(x)) else {
        return ContentBounds::full(width, height);
    };
    let right = (0..width)
        .rev()
        .find(|&x| column_has_content(x))
        .unwrap_or(width - 1);
    let top = (0..height).find(|&y| row_has_content(y)).unwrap_or(0);
    let bottom = (0..height)
        .rev()
        .find(|&y| row_has_content(y))
        .unwrap_or(height - 1);

    ContentBounds {
        rect: ContentRect {
            x: left,
            y: top,
            width: right + 1 - left,
            height: bottom + 1 - top,
        },
        borders: BorderWidths {
            left,
            right: width - 1 - right,
            top,
            bottom: height - 1 - bottom,
        },
        content_found: true,
    }
}
