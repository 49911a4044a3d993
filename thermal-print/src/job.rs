//! Print job orchestration.
//!
//! A job walks its inputs in order; each input is a page source whose pages
//! are encoded and handed to the sink in document order. Encoding always runs
//! on the blocking pool. With look-ahead enabled it is allowed to get at most
//! `lookahead` pages ahead of the sink; without it, each page is written
//! before the next one is loaded.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use thermal_raster::{PackedBuffer, PageDirectory, PageEncoder, PageSource, PictureSource};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::sink::FileSink;

/// Outcome of a finished job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSummary {
    pub sources: usize,
    pub pages: usize,
    pub bytes: usize,
    pub files: Vec<PathBuf>,
}

/// Open a page source for `path`: a directory of page images or a single
/// picture file.
pub fn open_source(path: &Path) -> Result<Box<dyn PageSource>, anyhow::Error> {
    if path.is_dir() {
        let dir = PageDirectory::open(path)
            .with_context(|| format!("reading page directory {}", path.display()))?;
        Ok(Box::new(dir))
    } else if path.is_file() {
        Ok(Box::new(PictureSource::new(path)))
    } else {
        anyhow::bail!("input not found: {}", path.display());
    }
}

/// Run a print job over `inputs`, writing packed pages to the configured
/// output directory.
///
/// The first page that fails to load or encode aborts the job. Pages written
/// before it are kept.
pub async fn run_job(
    config: &AppConfig,
    inputs: &[PathBuf],
) -> Result<JobSummary, anyhow::Error> {
    let encoder = PageEncoder::new(config.encode_options());
    let mut summary = JobSummary::default();

    tracing::info!(
        inputs = inputs.len(),
        width = config.target_width,
        dither = config.dither,
        lookahead = config.lookahead,
        "Starting print job"
    );

    for input in inputs {
        let source: Arc<dyn PageSource> = open_source(input)?.into();
        let mut sink = FileSink::new(&config.output_dir, source.name(), config.debug_output)?;

        let pages = if config.lookahead == 0 {
            encode_in_lockstep(&encoder, source, &mut sink).await?
        } else {
            encode_with_lookahead(encoder.clone(), source, &mut sink, config.lookahead).await?
        };

        summary.sources += 1;
        summary.pages += pages;
        summary.bytes += sink.bytes_written();
        summary.files.extend_from_slice(sink.files());
    }

    tracing::info!(
        sources = summary.sources,
        pages = summary.pages,
        bytes = summary.bytes,
        "Print job finished"
    );
    Ok(summary)
}

async fn encode_in_lockstep(
    encoder: &PageEncoder,
    source: Arc<dyn PageSource>,
    sink: &mut FileSink,
) -> Result<usize, anyhow::Error> {
    let count = source.page_count();
    tracing::info!(source = source.name(), pages = count, "Encoding page source");

    for index in 0..count {
        let encoder = encoder.clone();
        let worker_source = Arc::clone(&source);
        let page = tokio::task::spawn_blocking(move || {
            worker_source
                .load_page(index)
                .and_then(|image| encoder.encode(&image))
        })
        .await
        .context("page encoder task failed")?;

        let packed = page_result(page, index, source.as_ref())?;
        sink.write_page(index, &packed)?;
    }
    Ok(count)
}

async fn encode_with_lookahead(
    encoder: PageEncoder,
    source: Arc<dyn PageSource>,
    sink: &mut FileSink,
    lookahead: usize,
) -> Result<usize, anyhow::Error> {
    let name = source.name().to_string();
    let count = source.page_count();
    let (tx, mut rx) = mpsc::channel::<thermal_raster::Result<PackedBuffer>>(lookahead.max(1));

    let producer = tokio::task::spawn_blocking(move || {
        for page in encoder.encode_source(source.as_ref()) {
            let failed = page.is_err();
            if tx.blocking_send(page).is_err() {
                tracing::debug!("Sink closed, discarding remaining pages");
                return;
            }
            if failed {
                return;
            }
        }
    });

    let mut written = 0;
    while let Some(page) = rx.recv().await {
        let packed = page.with_context(|| format!("page {} of {count} in {name}", written + 1))?;
        sink.write_page(written, &packed)?;
        written += 1;
    }

    producer.await.context("page encoder task failed")?;
    Ok(written)
}

fn page_result(
    page: thermal_raster::Result<PackedBuffer>,
    index: usize,
    source: &dyn PageSource,
) -> Result<PackedBuffer, anyhow::Error> {
    page.with_context(|| {
        format!(
            "page {} of {} in {}",
            index + 1,
            source.page_count(),
            source.name()
        )
    })
}
