use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Widest thumbnail the preview pane will auto-select, in pixels.
    pub max_thumbnail_width: u32,
    /// Quiet period after the last keystroke before a fetch starts.
    pub debounce_ms: u64,
    /// Upper bound on a single extractor invocation.
    pub fetch_timeout_secs: u64,
    /// Extractor binary to invoke.
    pub extractor_bin: String,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_thumbnail_width: 500,
            debounce_ms: 300,
            fetch_timeout_secs: 30,
            extractor_bin: "yt-dlp".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn get_logging_format(&self) -> &str {
        &self.logging.format
    }
}
