//! Raster pipeline for thermal line printers.
//!
//! Turns page images into 1-bit, MSB-first packed buffers sized for a
//! fixed print-head width: resample, luma grayscale, Floyd-Steinberg
//! dithering (or a flat threshold), then bit packing.

pub mod dither;
pub mod encoder;
pub mod grayscale;
pub mod options;
pub mod pack;
pub mod plane;
pub mod resize;
pub mod source;

// Re-exports for convenience
pub use dither::floyd_steinberg_dither;
pub use encoder::{PageEncoder, encode_page};
pub use grayscale::to_grayscale;
pub use options::{DeviceClass, EncodeOptions};
pub use pack::{PackedBuffer, pack_binary, pack_grayscale_threshold};
pub use plane::{BinaryPlane, GrayscalePlane, PixelBuffer};
pub use resize::resize_and_crop;
pub use source::{PageDirectory, PageSource, PictureSource, PixelPages, pages};

/// Print width in dots of the common narrow-head (58mm) printers.
pub const NARROW_HEAD_WIDTH: u32 = 384;

/// Print width in dots of the wide-head printers.
pub const WIDE_HEAD_WIDTH: u32 = 1664;

/// Threshold used by the non-dithered path: darker than this prints.
pub const DEFAULT_THRESHOLD: u8 = 100;

/// Threshold used when dithering.
pub const DEFAULT_DITHER_THRESHOLD: u8 = 128;

/// Errors that can occur while encoding pages.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Page {index} out of range (source has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for raster operations.
pub type Result<T> = std::result::Result<T, RasterError>;
