//! Configuration loading for compass.
//!
//! Settings come from an optional TOML file merged over built-in
//! defaults. The API key is deliberately NOT part of the config file:
//! it is read from the environment by the provider backend, and its
//! absence only surfaces as a failed provider call.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use compass_core::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Configuration as stored in TOML files (optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawCompassConfig {
    #[serde(default)]
    pub provider: RawProviderConfig,
}

/// Provider config as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawProviderConfig {
    /// Gemini model name
    pub model: Option<String>,

    /// API base URL override
    pub base_url: Option<String>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone)]
pub struct CompassConfig {
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Gemini model name
    pub model: String,

    /// API base URL
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
        }
    }
}

impl CompassConfig {
    /// Merge a raw (partial) config over the defaults
    fn from_raw(raw: RawCompassConfig) -> Self {
        let defaults = ProviderConfig::default();
        Self {
            provider: ProviderConfig {
                model: raw.provider.model.unwrap_or(defaults.model),
                base_url: raw.provider.base_url.unwrap_or(defaults.base_url),
            },
        }
    }
}

/// Default config file location: `~/.config/compass/config.toml`
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("compass").join("config.toml"))
}

/// Load configuration from the default location
///
/// A missing file yields the defaults; a present but unparsable file is
/// an error rather than a silent fallback.
pub fn load() -> Result<CompassConfig> {
    match config_path() {
        Some(path) if path.exists() => load_from(&path),
        _ => Ok(CompassConfig::default()),
    }
}

/// Load configuration from an explicit path
pub fn load_from(path: &std::path::Path) -> Result<CompassConfig> {
    debug!(path = %path.display(), "Loading config");
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let raw: RawCompassConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(CompassConfig::from_raw(raw))
}
