//! Configuration file parser for ~/.config/headliner/config.toml.
//!
//! The config file is optional — a missing or empty file yields
//! `Config::default()`, which carries the stock feed catalog and the public
//! conversion endpoint. Unknown keys are accepted (and logged) so older
//! binaries tolerate newer config files.

use crate::convert::DEFAULT_ENDPOINT;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

/// One `[[feeds]]` table: a named feed source.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FeedConfigEntry {
    pub name: String,
    pub url: String,
}

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be given.
/// The custom `Debug` impl masks `api_key` so the key never lands in logs
/// or error output.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed-to-JSON conversion endpoint. Must be HTTPS (localhost exempt).
    pub endpoint: String,

    /// Bearer token for the conversion service, for self-hosted converters
    /// that require one. The `HEADLINER_API_KEY` env var takes precedence.
    pub api_key: Option<String>,

    /// Transport-level request timeout in seconds. 0 disables the timeout,
    /// matching the stock behavior where a pending request simply resolves
    /// whenever the transport does.
    pub request_timeout_secs: u64,

    /// The feed catalog. Order here is catalog order.
    pub feeds: Vec<FeedConfigEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            request_timeout_secs: 0,
            feeds: stock_feeds(),
        }
    }
}

/// The stock catalog used when no config file defines one.
fn stock_feeds() -> Vec<FeedConfigEntry> {
    [
        ("Udacity Blog", "http://blog.udacity.com/feed"),
        ("CSS Tricks", "http://feeds.feedburner.com/CssTricks"),
        ("HTML5 Rocks", "http://feeds.feedburner.com/html5rocks"),
        (
            "Linear Digressions",
            "http://feeds.feedburner.com/udacity-linear-digressions",
        ),
    ]
    .into_iter()
    .map(|(name, url)| FeedConfigEntry {
        name: name.to_string(),
        url: url.to_string(),
    })
    .collect()
}

/// Mask api_key in Debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("feeds", &self.feeds)
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line info
    /// - Unknown keys → accepted, logged as a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Size check before reading: a corrupted or hostile file should not
        // be slurped into memory wholesale.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Scan for unknown top-level keys to catch typos
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["endpoint", "api_key", "request_timeout_secs", "feeds"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            endpoint = %config.endpoint,
            feeds = config.feeds.len(),
            "Loaded configuration"
        );
        Ok(config)
    }
}
