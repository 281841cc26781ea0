//! Session token storage
//!
//! The bearer token is the only piece of client state that outlives a
//! single command. It is kept under one key (`token`) in a small key/value
//! store:
//! - `FileTokenStore` - JSON file on disk, the default for the CLI
//! - `MemoryTokenStore` - process-local, used by tests and embedders
//!
//! Presence of the token is the sole meaning of "authenticated"; the store
//! never inspects or expires it.

pub mod memory;

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::config::SessionConfig;

pub use memory::MemoryTokenStore;

/// Key the bearer token is stored under
pub const TOKEN_KEY: &str = "token";

/// Session storage errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Session file '{path}' is corrupt: {message}")]
    Format { path: String, message: String },
}

/// Storage for the bearer token
///
/// Implementations must be safe to share between services; every request
/// reads the token afresh.
pub trait TokenStore: Send + Sync {
    /// Current token, if any
    fn get(&self) -> Option<String>;

    /// Replace the stored token
    fn set(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token
    fn clear(&self) -> Result<(), SessionError>;
}

/// Shared handle to a token store
pub type DynTokenStore = Arc<dyn TokenStore>;

/// Create the file-backed store described by the configuration
pub fn create_token_store(config: &SessionConfig) -> DynTokenStore {
    Arc::new(FileTokenStore::new(&config.token_path))
}

/// Token store backed by a JSON object on disk
///
/// The file looks like `{"token": "..."}`. Other keys are preserved on
/// write so the file can be shared with future client state.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, SessionError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(SessionError::Format {
                path: self.path.display().to_string(),
                message: "expected a JSON object".to_string(),
            }),
            Err(e) => Err(SessionError::Format {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let json = serde_json::to_string_pretty(map).map_err(|e| SessionError::Format {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match self.read_map() {
            Ok(map) => map
                .get(TOKEN_KEY)
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
                .map(str::to_string),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session: {}", e);
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        // A corrupt file is replaced rather than blocking login.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_map(&map)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(SessionError::Format { .. }) => Map::new(),
            Err(e) => return Err(e),
        };
        if map.remove(TOKEN_KEY).is_none() && self.path.exists() {
            return Ok(());
        }
        if map.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path).map_err(|e| self.io_error(e))?;
            }
            return Ok(());
        }
        self.write_map(&map)
    }
}
