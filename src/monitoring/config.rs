//! Logging configuration
//!
//! Loads from environment variables:
//! - RUST_LOG: Tracing filter (debug, info, warn, error or directives)
//! - PRICEPREDICT_LOG_FORMAT: Console output format (json or text)
//! - PRICEPREDICT_LOG_DIR: Enables daily-rotated JSON log files in this directory

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Filter used when RUST_LOG is not set
    pub log_level: String,

    /// Console format
    pub log_format: LogFormat,

    /// Directory for log files; file logging is off when unset
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    pub fn as_str(&self) -> &str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Text => "text",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            // CLI output is the product; keep logs quiet unless asked
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
            log_dir: None,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(log_level) = std::env::var("RUST_LOG") {
            config.log_level = log_level;
        }

        if let Ok(log_format) = std::env::var("PRICEPREDICT_LOG_FORMAT") {
            if let Ok(format) = log_format.parse() {
                config.log_format = format;
            }
        }

        if let Ok(log_dir) = std::env::var("PRICEPREDICT_LOG_DIR") {
            if !log_dir.trim().is_empty() {
                config.log_dir = Some(PathBuf::from(log_dir));
            }
        }

        config
    }

    /// Create the log directory if file logging is enabled
    pub fn ensure_log_dir(&self) -> std::io::Result<()> {
        if let Some(dir) = &self.log_dir {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }
}
