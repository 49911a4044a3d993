pub mod config;
pub mod job;
pub mod sink;

pub use config::AppConfig;
pub use job::{JobSummary, run_job};

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load `.env`, then build the runtime config from the environment.
pub fn init_config() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();
    let config = AppConfig::load()?;
    tracing::info!(
        device_class = %config.device_class,
        width = config.target_width,
        dither = config.dither,
        output_dir = %config.output_dir.display(),
        "Settings loaded"
    );
    Ok(config)
}
