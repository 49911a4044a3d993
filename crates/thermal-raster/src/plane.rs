//! In-memory pixel planes passed between pipeline stages.
//!
//! Every stage owns its output: planes are built fresh from their input and
//! never borrow into an upstream buffer.

use image::RgbaImage;

/// RGBA8 page image, row-major with a top-left origin.
pub type PixelBuffer = RgbaImage;

/// Single-channel 8-bit samples (0 = black, 255 = white).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscalePlane {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl GrayscalePlane {
    /// Build a plane from raw samples. Returns `None` if the sample count
    /// does not match `width * height`.
    pub fn from_samples(width: u32, height: u32, samples: Vec<u8>) -> Option<Self> {
        (samples.len() == pixel_count(width, height)).then_some(Self {
            width,
            height,
            samples,
        })
    }

    /// A plane filled with one value.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            samples: vec![value; pixel_count(width, height)],
        }
    }

    /// Extract a plane from an image whose color channels are already equal.
    ///
    /// Only the red channel is read.
    pub fn from_gray_pixels(image: &PixelBuffer) -> Self {
        let (width, height) = image.dimensions();
        let samples = image.pixels().map(|p| p.0[0]).collect();
        Self {
            width,
            height,
            samples,
        }
    }

    /// Convert a color image to luma and extract the plane.
    pub fn from_rgba(image: &PixelBuffer) -> Self {
        Self::from_gray_pixels(&crate::grayscale::to_grayscale(image))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Sample at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.samples[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        let idx = self.index(x, y);
        self.samples[idx] = value;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        plane_index(self.width, self.height, x, y)
    }
}

/// One ink decision per pixel (`true` = fire this dot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPlane {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BinaryPlane {
    /// Returns `None` if the bit count does not match `width * height`.
    pub fn from_bits(width: u32, height: u32, bits: Vec<bool>) -> Option<Self> {
        (bits.len() == pixel_count(width, height)).then_some(Self {
            width,
            height,
            bits,
        })
    }

    pub(crate) fn from_parts(width: u32, height: u32, bits: Vec<bool>) -> Self {
        debug_assert_eq!(bits.len(), pixel_count(width, height));
        Self {
            width,
            height,
            bits,
        }
    }

    /// Threshold a grayscale plane: samples darker than `threshold` are ink.
    pub fn from_threshold(plane: &GrayscalePlane, threshold: u8) -> Self {
        Self {
            width: plane.width(),
            height: plane.height(),
            bits: plane.samples().iter().map(|&v| v < threshold).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Ink decision at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[plane_index(self.width, self.height, x, y)]
    }

    /// Number of dots that will be printed.
    pub fn ink_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn plane_index(width: u32, height: u32, x: u32, y: u32) -> usize {
    assert!(
        x < width && y < height,
        "({x}, {y}) outside {width}x{height} plane"
    );
    y as usize * width as usize + x as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn from_samples_rejects_wrong_length() {
        assert!(GrayscalePlane::from_samples(3, 2, vec![0; 5]).is_none());
        assert!(GrayscalePlane::from_samples(3, 2, vec![0; 6]).is_some());
    }

    #[test]
    fn from_gray_pixels_reads_red_channel() {
        let mut img = PixelBuffer::from_pixel(2, 1, Rgba([10, 10, 10, 255]));
        img.put_pixel(1, 0, Rgba([200, 0, 0, 255]));
        let plane = GrayscalePlane::from_gray_pixels(&img);
        assert_eq!(plane.samples(), &[10, 200]);
    }

    #[test]
    fn from_rgba_applies_luma() {
        let img = PixelBuffer::from_pixel(1, 1, Rgba([255, 0, 0, 255]));
        let plane = GrayscalePlane::from_rgba(&img);
        assert_eq!(plane.get(0, 0), 76);
    }

    #[test]
    fn threshold_marks_darker_pixels_as_ink() {
        let plane = GrayscalePlane::from_samples(4, 1, vec![0, 99, 100, 255]).unwrap();
        let bits = BinaryPlane::from_threshold(&plane, 100);
        assert_eq!(bits.bits(), &[true, true, false, false]);
        assert_eq!(bits.ink_count(), 2);
    }

    #[test]
    fn set_and_get_are_row_major() {
        let mut plane = GrayscalePlane::filled(3, 2, 255);
        plane.set(2, 1, 7);
        assert_eq!(plane.samples()[5], 7);
        assert_eq!(plane.get(2, 1), 7);
    }

    #[test]
    #[should_panic(expected = "outside 3x2 plane")]
    fn get_out_of_bounds_panics() {
        GrayscalePlane::filled(3, 2, 0).get(3, 0);
    }

    #[test]
    fn binary_get_is_row_major() {
        let bits = BinaryPlane::from_bits(2, 2, vec![false, false, true, false]).unwrap();
        assert!(bits.get(0, 1));
        assert!(!bits.get(1, 1));
    }

    #[test]
    #[should_panic(expected = "outside 2x2 plane")]
    fn binary_get_past_row_end_panics() {
        // (2, 0) would otherwise alias (0, 1)
        let bits = BinaryPlane::from_bits(2, 2, vec![false, false, true, false]).unwrap();
        bits.get(2, 0);
    }
}
