//! Floyd-Steinberg error-diffusion dithering.
//!
//! The working plane is updated in place while scanning, so every decision
//! sees the error already pushed onto it by earlier pixels. The scan is
//! strictly row-major (no serpentine) and must stay sequential.

use tracing::debug;

use crate::plane::{BinaryPlane, GrayscalePlane};

/// Dither `plane` into ink decisions.
///
/// Pixels darker than `threshold` are ink. The quantization error is
/// distributed to unvisited neighbors:
/// - Right:        7/16
/// - Bottom-left:  3/16
/// - Bottom:       5/16
/// - Bottom-right: 1/16
///
/// Each neighbor is clamped to `0..=255` right after it is adjusted. On
/// return `plane` holds the diffused (not the quantized) values.
pub fn floyd_steinberg_dither(plane: &mut GrayscalePlane, threshold: u8) -> BinaryPlane {
    let (width, height) = plane.dimensions();
    debug!(width, height, threshold, "Applying Floyd-Steinberg dithering");

    let w = width as usize;
    let h = height as usize;
    let samples = plane.samples_mut();
    let mut ink = vec![false; samples.len()];

    for y in 0..h {
        for x in 0..w {
            let index = y * w + x;
            let old_pixel = i32::from(samples[index]);
            let is_ink = old_pixel < i32::from(threshold);
            ink[index] = is_ink;
            let error = old_pixel - if is_ink { 0 } else { 255 };

            if x + 1 < w {
                diffuse_error(samples, index + 1, error, 7);
            }
            if x > 0 && y + 1 < h {
                diffuse_error(samples, index + w - 1, error, 3);
            }
            if y + 1 < h {
                diffuse_error(samples, index + w, error, 5);
            }
            if x + 1 < w && y + 1 < h {
                diffuse_error(samples, index + w + 1, error, 1);
            }
        }
    }

    debug!("Floyd-Steinberg dithering complete");
    BinaryPlane::from_parts(width, height, ink)
}

/// Add `error * factor / 16` (truncated toward zero) to one sample.
fn diffuse_error(samples: &mut [u8], index: usize, error: i32, factor: i32) {
    let adjusted = i32::from(samples[index]) + error * factor / 16;
    samples[index] = adjusted.clamp(0, 255) as u8;
}
