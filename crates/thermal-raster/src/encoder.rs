//! Per-page pipeline: resample, grayscale, binarize, pack.

use tracing::{debug, info};

use crate::dither::floyd_steinberg_dither;
use crate::grayscale::to_grayscale;
use crate::options::EncodeOptions;
use crate::pack::{PackedBuffer, pack_binary, pack_grayscale_threshold};
use crate::plane::{GrayscalePlane, PixelBuffer};
use crate::resize::resize_and_crop;
use crate::Result;
use crate::source::{PageSource, pages};

/// Encode one page at `target_width` with the default thresholds
/// (128 when dithering, 100 otherwise) and no crop.
pub fn encode_page(
    image: &PixelBuffer,
    target_width: u32,
    use_dithering: bool,
) -> Result<PackedBuffer> {
    let options = EncodeOptions::new()
        .with_target_width(target_width)
        .with_dither(use_dithering);
    PageEncoder::new(options).encode(image)
}

/// Encodes pages with a fixed set of options. Holds no per-page state.
#[derive(Debug, Clone, Default)]
pub struct PageEncoder {
    options: EncodeOptions,
}

impl PageEncoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Run the full pipeline on one page. Nothing is returned unless every
    /// stage succeeds.
    pub fn encode(&self, image: &PixelBuffer) -> Result<PackedBuffer> {
        let opts = &self.options;
        let resized = resize_and_crop(image, opts.target_width, opts.target_height)?;
        let mut plane = GrayscalePlane::from_gray_pixels(&to_grayscale(&resized));

        let packed = if opts.dither {
            let bits = floyd_steinberg_dither(&mut plane, opts.dither_threshold);
            pack_binary(&bits)
        } else {
            pack_grayscale_threshold(&plane, opts.threshold)
        };

        debug!(
            width = packed.width(),
            height = packed.height(),
            bytes = packed.len(),
            dither = opts.dither,
            "Page encoded"
        );
        Ok(packed)
    }

    /// Lazily encode pages in order, one result per page. Each page is fully
    /// packed before the next one is touched.
    pub fn encode_pages<'a, I>(
        &'a self,
        pages: I,
    ) -> impl Iterator<Item = Result<PackedBuffer>> + 'a
    where
        I: IntoIterator<Item = PixelBuffer>,
        I::IntoIter: 'a,
    {
        pages.into_iter().map(move |page| self.encode(&page))
    }

    /// Lazily load and encode every page of `source`. A page that fails to
    /// load yields its load error in place of a buffer.
    pub fn encode_source<'a>(
        &'a self,
        source: &'a dyn PageSource,
    ) -> impl Iterator<Item = Result<PackedBuffer>> + 'a {
        info!(
            source = source.name(),
            pages = source.page_count(),
            width = self.options.target_width,
            "Encoding page source"
        );
        pages(source).map(move |page| page.and_then(|p| self.encode(&p)))
    }
}
