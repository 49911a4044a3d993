//! Page sources: where page images come from.
//!
//! Document rasterization happens outside this crate; a rasterized document
//! arrives as a directory of page images. A single picture file is a
//! one-page document.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::debug;

use crate::plane::PixelBuffer;
use crate::{RasterError, Result};

/// An ordered, finite sequence of page images.
pub trait PageSource: Send + Sync {
    /// Human-readable name used in logs and output file names.
    fn name(&self) -> &str;

    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Load page `index` (zero-based) as RGBA.
    fn load_page(&self, index: usize) -> Result<PixelBuffer>;
}

/// Iterate over every page of `source` in order, loading each on demand.
pub fn pages(source: &dyn PageSource) -> impl Iterator<Item = Result<PixelBuffer>> + '_ {
    (0..source.page_count()).map(move |index| source.load_page(index))
}

fn out_of_range(index: usize, count: usize) -> RasterError {
    RasterError::PageOutOfRange { index, count }
}

fn decode_picture(path: &Path) -> Result<PixelBuffer> {
    debug!(path = %path.display(), "Decoding page image");
    Ok(image::open(path)?.to_rgba8())
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A single picture file printed as one page.
#[derive(Debug, Clone)]
pub struct PictureSource {
    path: PathBuf,
    name: String,
}

impl PictureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for PictureSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_count(&self) -> usize {
        1
    }

    fn load_page(&self, index: usize) -> Result<PixelBuffer> {
        if index != 0 {
            return Err(out_of_range(index, 1));
        }
        decode_picture(&self.path)
    }
}

/// A directory of rasterized pages, ordered by file name.
///
/// Names compare with digit runs taken as numbers, so `page-2.png` sorts
/// before `page-10.png`. Only files whose format this build can decode
/// count as pages.
#[derive(Debug, Clone)]
pub struct PageDirectory {
    name: String,
    pages: Vec<PathBuf>,
}

impl PageDirectory {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut pages = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_decodable(&path) {
                pages.push(path);
            }
        }
        pages.sort_by_cached_key(|path| (natural_key(path), path.clone()));

        debug!(dir = %dir.display(), pages = pages.len(), "Scanned page directory");
        Ok(Self {
            name: display_name(dir),
            pages,
        })
    }

    pub fn page_paths(&self) -> &[PathBuf] {
        &self.pages
    }
}

impl PageSource for PageDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(&self, index: usize) -> Result<PixelBuffer> {
        let path = self
            .pages
            .get(index)
            .ok_or_else(|| out_of_range(index, self.pages.len()))?;
        decode_picture(path)
    }
}

fn is_decodable(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NameSegment {
    /// Digit run with leading zeros stripped; shorter runs are smaller.
    Number { len: usize, digits: String },
    Text(String),
}

/// Sort key for a file name: alternating text and numeric segments.
fn natural_key(path: &Path) -> Vec<NameSegment> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut segments = Vec::new();
    let mut chars = name.chars().peekable();
    while let Some(&first) = chars.peek() {
        let is_digit = first.is_ascii_digit();
        let mut run = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() != is_digit {
                break;
            }
            run.push(c);
            chars.next();
        }
        segments.push(if is_digit {
            let digits = run.trim_start_matches('0').to_string();
            NameSegment::Number {
                len: digits.len(),
                digits,
            }
        } else {
            NameSegment::Text(run)
        });
    }
    segments
}

/// Pages already held in memory.
#[derive(Debug, Clone)]
pub struct PixelPages {
    name: String,
    pages: Vec<PixelBuffer>,
}

impl PixelPages {
    pub fn new(name: impl Into<String>, pages: Vec<PixelBuffer>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }
}

impl PageSource for PixelPages {
    fn name(&self) -> &str {
        &self.name
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(&self, index: usize) -> Result<PixelBuffer> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| out_of_range(index, self.pages.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "thermal-raster-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn solid(width: u32, height: u32, value: u8) -> PixelBuffer {
        PixelBuffer::from_pixel(width, height, Rgba([value, value, value, 255]))
    }

    #[test]
    fn pixel_pages_yield_in_order() {
        let source = PixelPages::new("mem", vec![solid(1, 1, 10), solid(2, 2, 20)]);
        let loaded: Vec<_> = pages(&source).collect::<Result<_>>().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].get_pixel(0, 0).0[0], 10);
        assert_eq!(loaded[1].dimensions(), (2, 2));
    }

    #[test]
    fn empty_source_yields_nothing() {
        let source = PixelPages::new("empty", Vec::new());
        assert_eq!(pages(&source).count(), 0);
    }

    #[test]
    fn out_of_range_page_is_an_error() {
        let source = PixelPages::new("mem", vec![solid(1, 1, 0)]);
        let err = source.load_page(1).unwrap_err();
        assert!(matches!(err, RasterError::PageOutOfRange { index: 1, count: 1 }));
    }

    #[test]
    fn picture_source_decodes_single_page() {
        let dir = scratch_dir("picture");
        let path = dir.join("photo.png");
        solid(3, 2, 42).save(&path).unwrap();

        let source = PictureSource::new(&path);
        assert_eq!(source.name(), "photo");
        assert_eq!(source.page_count(), 1);
        let page = source.load_page(0).unwrap();
        assert_eq!(page.dimensions(), (3, 2));
        assert_eq!(page.get_pixel(1, 1).0, [42, 42, 42, 255]);
        assert!(source.load_page(1).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_picture_is_an_error() {
        let source = PictureSource::new("/nonexistent/thermal-raster/missing.png");
        assert!(source.load_page(0).is_err());
    }

    #[test]
    fn page_directory_sorts_and_filters() {
        let dir = scratch_dir("pages");
        solid(1, 1, 2).save(dir.join("page-2.png")).unwrap();
        solid(1, 1, 1).save(dir.join("page-1.png")).unwrap();
        std::fs::write(dir.join("notes.txt"), "not a page").unwrap();

        let source = PageDirectory::open(&dir).unwrap();
        assert_eq!(source.page_count(), 2);
        let values: Vec<u8> = pages(&source)
            .map(|p| p.unwrap().get_pixel(0, 0).0[0])
            .collect();
        assert_eq!(values, vec![1, 2]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn page_directory_orders_numbers_by_value() {
        let dir = scratch_dir("natural");
        for n in 1..=11u8 {
            solid(1, 1, n).save(dir.join(format!("page-{n}.png"))).unwrap();
        }

        let source = PageDirectory::open(&dir).unwrap();
        let values: Vec<u8> = pages(&source)
            .map(|p| p.unwrap().get_pixel(0, 0).0[0])
            .collect();
        assert_eq!(values, (1..=11).collect::<Vec<u8>>());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn natural_key_handles_padding_and_text() {
        let mut names = vec!["b-1.png", "a-010.png", "a-9.png", "a-02.png", "a.png"];
        names.sort_by_cached_key(|n| natural_key(Path::new(n)));
        assert_eq!(names, ["a-02.png", "a-9.png", "a-010.png", "a.png", "b-1.png"]);
    }

    #[test]
    fn page_directory_reads_ppm_and_skips_undecodable_formats() {
        let dir = scratch_dir("ppm");
        let mut ppm = b"P6\n1 1\n255\n".to_vec();
        ppm.extend_from_slice(&[30, 60, 90]);
        std::fs::write(dir.join("page-1.ppm"), ppm).unwrap();
        std::fs::write(dir.join("page-2.qoi"), b"no decoder in this build").unwrap();

        let source = PageDirectory::open(&dir).unwrap();
        assert_eq!(source.page_count(), 1);
        assert_eq!(source.load_page(0).unwrap().get_pixel(0, 0).0, [30, 60, 90, 255]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let err = PageDirectory::open("/nonexistent/thermal-raster/pages").unwrap_err();
        assert!(matches!(err, RasterError::Io(_)));
    }
}
