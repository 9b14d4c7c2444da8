//! `AppConfig` struct, TOML loading and config file location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cinebrowse_api::tmdb::{DEFAULT_IMAGE_BASE_URL, MovieCategory, SearchType, TvCategory};
use cinebrowse_tui::{AppSettings, ResponsePolicy};
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB request settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Browser startup selections.
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// TMDB request configuration. Credentials come from the environment only.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Response language (e.g. "en-US"); omitted from requests when unset.
    #[serde(default)]
    pub language: Option<String>,
    /// API base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Poster image prefix override.
    #[serde(default)]
    pub image_base_url: Option<String>,
}

/// Browser startup configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Initially selected movie category.
    #[serde(default)]
    pub movie_category: MovieCategory,
    /// Initially selected TV category.
    #[serde(default)]
    pub tv_category: TvCategory,
    /// Initially selected search type.
    #[serde(default)]
    pub search_type: SearchType,
    /// How late responses are treated.
    #[serde(default)]
    pub response_policy: ResponsePolicy,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parsed API base URL override, if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if `tmdb.base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.tmdb
            .base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid tmdb.base_url: {raw}")))
            .transpose()
    }

    /// Poster image prefix, falling back to the TMDB default.
    #[must_use]
    pub fn image_base_url(&self) -> &str {
        self.tmdb
            .image_base_url
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_BASE_URL)
    }

    /// Browser settings derived from this config.
    #[must_use]
    pub fn to_settings(&self) -> AppSettings {
        AppSettings {
            movie_category: self.browser.movie_category,
            tv_category: self.browser.tv_category,
            search_type: self.browser.search_type,
            response_policy: self.browser.response_policy,
            image_base_url: String::from(self.image_base_url()),
        }
    }
}

/// Resolves the config file path.
///
/// - `{dir}/config.toml` when `dir` is given.
/// - `$XDG_CONFIG_HOME/cinebrowse/config.toml` when that variable is set and non-empty.
/// - `~/.config/cinebrowse/config.toml` otherwise.
///
/// # Errors
///
/// Returns an error if no directory is given and neither `XDG_CONFIG_HOME`
/// nor `HOME` is set.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir.map(PathBuf::as_path),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }
    let base = match xdg_config_home.filter(|p| !p.as_os_str().is_empty()) {
        Some(xdg) => xdg,
        None => home
            .context("HOME environment variable is not set")?
            .join(".config"),
    };
    Ok(base.join("cinebrowse").join("config.toml"))
}
