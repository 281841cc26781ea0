//! Configuration management
//!
//! This module handles loading and parsing configuration for the Draftdesk client.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Session token storage configuration
    #[serde(default)]
    pub session: SessionConfig,
    /// Upload configuration
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

/// Session token storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the persisted bearer token
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
        }
    }
}

fn default_token_path() -> PathBuf {
    PathBuf::from("data/session.json")
}

/// Upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Advertised maximum document size in bytes (default: 10MB).
    /// Shown to the user only; uploads are not checked against it.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

impl UploadConfig {
    /// Human readable size hint, e.g. "10MB", "1.5MB" or "512KB"
    pub fn size_hint(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = 1024 * KB;
        let size = self.max_file_size;
        if size >= MB {
            if size % MB == 0 {
                format!("{}MB", size / MB)
            } else {
                format!("{:.1}MB", size as f64 / MB as f64)
            }
        } else if size >= KB {
            format!("{}KB", size.div_ceil(KB))
        } else {
            format!("{}B", size)
        }
    }
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - DRAFTDESK_API_BASE_URL
    /// - DRAFTDESK_SESSION_TOKEN_PATH
    /// - DRAFTDESK_UPLOAD_MAX_FILE_SIZE
    ///
    /// Validation runs after the overrides, so an environment variable can
    /// replace an invalid file value.
    pub fn load_with_env(path: &Path) -> anyhow::Result<Self> {
        let mut config = Self::read(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Read and parse the file without validating it
    fn read(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })?;

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("DRAFTDESK_API_BASE_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(path) = std::env::var("DRAFTDESK_SESSION_TOKEN_PATH") {
            self.session.token_path = PathBuf::from(path);
        }

        if let Ok(size) = std::env::var("DRAFTDESK_UPLOAD_MAX_FILE_SIZE") {
            if let Ok(size) = size.parse::<u64>() {
                self.upload.max_file_size = size;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        Ok(())
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
