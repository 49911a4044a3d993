//! 1-bit packing in print-head scan order.
//!
//! Pixels are taken row-major and packed 8 per byte, MSB first (the first
//! pixel lands in bit 7). A final partial byte is zero-padded in its low
//! bits. No header or row framing is added.

use image::{GrayImage, Luma};
use tracing::debug;

use crate::plane::{BinaryPlane, GrayscalePlane, pixel_count};

/// Raw packed page bits plus the geometry they were packed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PackedBuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Expand back into one decision per pixel. Padding bits are dropped.
    pub fn unpack(&self) -> BinaryPlane {
        let count = pixel_count(self.width, self.height);
        let bits = (0..count)
            .map(|i| self.bytes[i / 8] & (0x80 >> (i % 8)) != 0)
            .collect();
        BinaryPlane::from_parts(self.width, self.height, bits)
    }

    /// Render as black ink on white paper, for inspecting output without a
    /// printer.
    pub fn to_preview(&self) -> GrayImage {
        let plane = self.unpack();
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if plane.get(x, y) { 0 } else { 255 }])
        })
    }
}

/// Number of bytes needed to pack `pixels` bits.
pub fn packed_len(pixels: usize) -> usize {
    pixels.div_ceil(8)
}

/// Pack a grayscale plane with a flat threshold: samples darker than `sw`
/// become ink bits.
pub fn pack_grayscale_threshold(plane: &GrayscalePlane, sw: u8) -> PackedBuffer {
    let (width, height) = plane.dimensions();
    debug!(width, height, sw, "Packing grayscale plane with threshold");
    let bytes = byte_encode_msb(plane.samples().iter().map(|&v| v < sw));
    PackedBuffer {
        width,
        height,
        bytes,
    }
}

/// Pack ink decisions as-is.
pub fn pack_binary(bits: &BinaryPlane) -> PackedBuffer {
    let (width, height) = (bits.width(), bits.height());
    debug!(width, height, "Packing binary plane");
    let bytes = byte_encode_msb(bits.bits().iter().copied());
    PackedBuffer {
        width,
        height,
        bytes,
    }
}

/// Pack bits 8 per byte, MSB first, zero-padding the last byte.
fn byte_encode_msb<I>(bits: I) -> Vec<u8>
where
    I: ExactSizeIterator<Item = bool>,
{
    let mut out = Vec::with_capacity(packed_len(bits.len()));
    let mut byte_val: u8 = 0;
    let mut count = 0;

    for bit in bits {
        byte_val = (byte_val << 1) | u8::from(bit);
        count += 1;
        if count == 8 {
            out.push(byte_val);
            byte_val = 0;
            count = 0;
        }
    }

    if count > 0 {
        out.push(byte_val << (8 - count));
    }
    out
}
