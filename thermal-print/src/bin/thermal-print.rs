//! Encode page images into packed 1-bit buffers for a thermal printer.
//!
//! Each argument is a picture file (one page) or a directory of rasterized
//! page images. Settings come from `.env` and the environment.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use thermal_print_lib::run_job;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let inputs: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if inputs.is_empty() {
        anyhow::bail!("usage: thermal-print <picture-or-page-dir>...");
    }

    let config = thermal_print_lib::init_config()?;
    let summary = run_job(&config, &inputs).await?;

    tracing::info!(
        pages = summary.pages,
        bytes = summary.bytes,
        output_dir = %config.output_dir.display(),
        "Done"
    );
    Ok(())
}
