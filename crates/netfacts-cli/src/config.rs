//! Configuration loading

use anyhow::Result;
use netfacts_core::ReplyKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "capture")]
    pub captures: Vec<CaptureConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

fn default_true() -> bool {
    true
}

/// A captured reply file belonging to one router
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Router the reply was taken from
    pub router: String,
    /// Which command produced the reply
    pub kind: ReplyKind,
    /// Path to the reply, relative to the config file
    pub path: PathBuf,
}

impl Config {
    /// Resolve a capture path against the directory holding the config file
    pub fn capture_path(&self, config_path: &Path, capture: &CaptureConfig) -> PathBuf {
        if capture.path.is_absolute() {
            return capture.path.clone();
        }
        config_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&capture.path)
    }
}

/// Load configuration from file, `None` when the file does not exist
///
/// Nothing is logged here: the subscriber is installed only once the
/// configured log level is known.
pub fn load_config(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(Some(config))
}

/// Report where the configuration came from
pub fn log_source(path: &Path, loaded: Option<&Config>) {
    match loaded {
        Some(config) => info!(
            path = %path.display(),
            captures = config.captures.len(),
            "Loaded configuration"
        ),
        None => info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        ),
    }
}
