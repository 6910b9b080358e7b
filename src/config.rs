use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::tmdb::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Figment(Box::new(err))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB API key. Also read from `TMDB_API_KEY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    /// Quiet period before a typed query is searched.
    pub debounce_ms: u64,
    pub trending_limit: usize,
    /// 0 disables the timeout.
    pub request_timeout_secs: u64,
    pub record_searches: bool,
    /// Used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            debounce_ms: 500,
            trending_limit: 5,
            request_timeout_secs: 30,
            record_searches: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the config file, then `MOVIE_FINDER_*` and `TMDB_API_KEY`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(config_path()))
    }

    pub fn figment(path: Option<PathBuf>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            // A missing file contributes nothing.
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("MOVIE_FINDER_").ignore(&["config"]))
            .merge(
                Env::raw()
                    .only(&["TMDB_API_KEY"])
                    .map(|_| "api_key".into()),
            )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key().trim().is_empty()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// `MOVIE_FINDER_CONFIG`, or `<config dir>/movie_finder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os("MOVIE_FINDER_CONFIG")
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| dir.join("movie_finder").join("config.toml")))
}
