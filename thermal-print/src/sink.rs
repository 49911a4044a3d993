//! Output sink for packed pages.
//!
//! Stands in for the printer transport: every page is written as raw packed
//! bytes, exactly what would be handed to the device.

use std::path::{Path, PathBuf};

use anyhow::Context;
use thermal_raster::PackedBuffer;

/// Writes `<stem>-page-NNNN.bin` files (and optional PNG previews).
#[derive(Debug)]
pub struct FileSink {
    dir: PathBuf,
    stem: String,
    debug_output: bool,
    bytes_written: usize,
    files: Vec<PathBuf>,
}

impl FileSink {
    /// Create the sink, making `dir` if needed.
    pub fn new(dir: &Path, stem: &str, debug_output: bool) -> Result<Self, anyhow::Error> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            stem: stem.to_string(),
            debug_output,
            bytes_written: 0,
            files: Vec::new(),
        })
    }

    /// Write page `index` (zero-based). Returns the path of the packed file.
    pub fn write_page(
        &mut self,
        index: usize,
        packed: &PackedBuffer,
    ) -> Result<PathBuf, anyhow::Error> {
        let base = format!("{}-page-{:04}", self.stem, index + 1);
        let path = self.dir.join(format!("{base}.bin"));
        std::fs::write(&path, packed.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?;

        if self.debug_output {
            let preview = self.dir.join(format!("{base}.png"));
            packed
                .to_preview()
                .save(&preview)
                .with_context(|| format!("writing preview {}", preview.display()))?;
        }

        tracing::info!(
            page = index + 1,
            width = packed.width(),
            height = packed.height(),
            bytes = packed.len(),
            path = %path.display(),
            "Page written"
        );
        self.bytes_written += packed.len();
        self.files.push(path.clone());
        Ok(path)
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use thermal_raster::{PixelBuffer, encode_page};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "thermal-print-sink-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_raw_bytes_with_numbered_names() {
        let dir = scratch_dir("raw");
        let mut sink = FileSink::new(&dir, "doc", false).unwrap();
        let img = PixelBuffer::from_pixel(8, 2, Rgba([0, 0, 0, 255]));
        let packed = encode_page(&img, 8, false).unwrap();

        let path = sink.write_page(0, &packed).unwrap();
        assert_eq!(path, dir.join("doc-page-0001.bin"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xff, 0xff]);
        assert!(!dir.join("doc-page-0001.png").exists());
        assert_eq!(sink.bytes_written(), 2);
        assert_eq!(sink.files().len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn debug_output_adds_preview() {
        let dir = scratch_dir("preview");
        let mut sink = FileSink::new(&dir, "doc", true).unwrap();
        let img = PixelBuffer::from_pixel(4, 3, Rgba([255, 255, 255, 255]));
        let packed = encode_page(&img, 4, true).unwrap();

        sink.write_page(11, &packed).unwrap();
        let preview = image::open(dir.join("doc-page-0012.png")).unwrap().to_luma8();
        assert_eq!(preview.dimensions(), (4, 3));
        assert!(preview.pixels().all(|p| p.0[0] == 255));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
