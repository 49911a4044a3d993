//! Configuration management: defaults, validation, loading from `.env` + environment.

pub mod app_config;
pub mod validation;

pub use app_config::AppConfig;
