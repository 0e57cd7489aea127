//! Configuration for spam-classifier

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ClassifierError, Result};
use crate::spam::ClassifierConfig;

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Classifier tuning
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Training corpora
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Logging setup
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Locations of the labeled training corpora
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Directory or mbox file of known spam
    pub spam: Option<PathBuf>,
    /// Directory or mbox file of known ham
    pub ham: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One of "pretty", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ClassifierError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => Ok(()),
            other => Err(ClassifierError::Config(format!(
                "Unknown log format '{}'",
                other
            ))),
        }
    }
}
