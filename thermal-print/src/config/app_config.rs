//! Runtime application configuration loaded from the environment.

use std::path::PathBuf;

use thermal_raster::{DEFAULT_DITHER_THRESHOLD, DEFAULT_THRESHOLD, DeviceClass, EncodeOptions};

use super::validation::validate_setting;

/// Keys read by [`AppConfig::load`].
pub const SETTING_KEYS: &[&str] = &[
    "DEVICE_CLASS",
    "TARGET_WIDTH",
    "TARGET_HEIGHT",
    "DITHER",
    "THRESHOLD",
    "DITHER_THRESHOLD",
    "OUTPUT_DIR",
    "DEBUG_OUTPUT",
    "LOOKAHEAD",
];

/// Runtime configuration for a print job.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub device_class: DeviceClass,
    /// Output width in dots. Defaults to the device class width.
    pub target_width: u32,
    pub target_height: u32,
    pub dither: bool,
    pub threshold: u8,
    pub dither_threshold: u8,
    pub output_dir: PathBuf,
    /// Also write a PNG preview next to every packed page.
    pub debug_output: bool,
    /// Pages encoded ahead of the sink; `0` encodes and writes in lockstep.
    pub lookahead: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            device_class: DeviceClass::Narrow,
            target_width: DeviceClass::Narrow.dot_width(),
            target_height: 0,
            dither: true,
            threshold: DEFAULT_THRESHOLD,
            dither_threshold: DEFAULT_DITHER_THRESHOLD,
            output_dir: PathBuf::from("out"),
            debug_output: false,
            lookahead: 1,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `get`, which returns the raw value of a key.
    ///
    /// Every value is validated first; unset or empty keys keep their default.
    pub fn from_lookup<F>(get: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> String { get(key).unwrap_or_default().trim().to_string() };

        for &key in SETTING_KEYS {
            if let Err(e) = validate_setting(key, &g(key)) {
                anyhow::bail!("invalid {key}: {e}");
            }
        }

        let defaults = Self::default();
        let device_class = parse_or(&g("DEVICE_CLASS"), defaults.device_class);
        let target_width = parse_or(&g("TARGET_WIDTH"), device_class.dot_width());
        let output_dir = match g("OUTPUT_DIR") {
            dir if dir.is_empty() => defaults.output_dir,
            dir => PathBuf::from(dir),
        };

        Ok(Self {
            device_class,
            target_width,
            target_height: parse_or(&g("TARGET_HEIGHT"), defaults.target_height),
            dither: parse_or(&g("DITHER"), defaults.dither),
            threshold: parse_or(&g("THRESHOLD"), defaults.threshold),
            dither_threshold: parse_or(&g("DITHER_THRESHOLD"), defaults.dither_threshold),
            output_dir,
            debug_output: parse_or(&g("DEBUG_OUTPUT"), defaults.debug_output),
            lookahead: parse_or(&g("LOOKAHEAD"), defaults.lookahead),
        })
    }

    /// Encoder options for this configuration.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::new()
            .with_target_width(self.target_width)
            .with_target_height(self.target_height)
            .with_dither(self.dither)
            .with_threshold(self.threshold)
            .with_dither_threshold(self.dither_threshold)
    }
}

fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
