//! Resampling to the print-head width.
//!
//! Aspect-ratio-preserving resize with Lanczos3 filtering, followed by an
//! optional vertical center crop.

use image::imageops::{self, FilterType};
use tracing::debug;

use crate::plane::PixelBuffer;
use crate::{RasterError, Result};

/// Crop heights at or below this are treated as "no crop requested".
const MIN_CROP_HEIGHT: u32 = 10;

/// Resize `image` to `target_width` keeping its aspect ratio, then
/// center-crop vertically to `target_height`.
///
/// The crop only applies when `MIN_CROP_HEIGHT < target_height < scaled_height`;
/// otherwise the full resampled image is returned. Pass `0` to never crop.
pub fn resize_and_crop(
    image: &PixelBuffer,
    target_width: u32,
    target_height: u32,
) -> Result<PixelBuffer> {
    let (orig_w, orig_h) = image.dimensions();
    if target_width == 0 {
        return Err(RasterError::InvalidDimension {
            width: target_width,
            height: orig_h,
        });
    }
    if orig_w == 0 || orig_h == 0 {
        return Err(RasterError::InvalidDimension {
            width: orig_w,
            height: orig_h,
        });
    }

    let scaled = resize_to_width(image, target_width);
    let scaled_height = scaled.height();

    if target_height > MIN_CROP_HEIGHT && target_height < scaled_height {
        let y_offset = (scaled_height - target_height) / 2;
        debug!(
            scaled_height,
            target_height, y_offset, "Center-cropping resampled page"
        );
        let cropped = imageops::crop_imm(&scaled, 0, y_offset, target_width, target_height);
        return Ok(cropped.to_image());
    }

    Ok(scaled)
}

/// Height after scaling `(width, height)` to `target_width`, rounded to the
/// nearest row and never below one row.
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let ratio = f64::from(target_width) / f64::from(width);
    let new_height = (f64::from(height) * ratio).round() as u32;
    new_height.max(1)
}

fn resize_to_width(image: &PixelBuffer, width: u32) -> PixelBuffer {
    let (orig_w, orig_h) = image.dimensions();

    if orig_w == width {
        debug!(width, "Page already at target width, skipping resize");
        return image.clone();
    }

    let new_height = scaled_height(orig_w, orig_h, width);
    debug!(
        orig_w,
        orig_h,
        new_width = width,
        new_height,
        "Resizing page to target width"
    );

    imageops::resize(image, width, new_height, FilterType::Lanczos3)
}
