//! Luma grayscale conversion.

use image::Rgba;
use tracing::debug;

use crate::plane::PixelBuffer;

/// Pixels with alpha below this are treated as paper (white).
const MIN_OPAQUE_ALPHA: u8 = 10;

/// Convert every pixel to `floor(0.30 R + 0.59 G + 0.11 B)`, replicated to
/// all color channels with alpha preserved. Near-transparent pixels become
/// opaque white.
pub fn to_grayscale(image: &PixelBuffer) -> PixelBuffer {
    let (width, height) = image.dimensions();
    debug!(width, height, "Converting page to grayscale");

    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        *pixel = gray_pixel(*pixel);
    }
    output
}

/// Weighted luma of one pixel, in integer hundredths so that the weights are
/// exact.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((30 * u32::from(r) + 59 * u32::from(g) + 11 * u32::from(b)) / 100) as u8
}

fn gray_pixel(Rgba([r, g, b, a]): Rgba<u8>) -> Rgba<u8> {
    if a < MIN_OPAQUE_ALPHA {
        return Rgba([255, 255, 255, 255]);
    }
    let v = luma(r, g, b);
    Rgba([v, v, v, a])
}
