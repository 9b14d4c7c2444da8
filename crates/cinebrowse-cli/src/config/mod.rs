//! Application configuration module.
//!
//! Reads the TOML config file holding TMDB request settings and the
//! browser's startup selections. Secrets never live here.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, resolve_config_path};
