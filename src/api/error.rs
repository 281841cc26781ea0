//! API client error types

use thiserror::Error;

use crate::session::SessionError;

/// Errors returned by the API client and the services built on it
///
/// Non-2xx responses are not classified further: a 401 is reported the
/// same way as a 500, with the status and the raw body left untouched.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status
    #[error("Request failed with status {status}: {}", detail_or_body(.body))]
    Status { status: u16, body: String },

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("Unexpected response from {path}: {message}")]
    Decode { path: String, message: String },

    /// The document type is not accepted for upload
    #[error("Unsupported file type '{mime_type}' for '{file_name}': please upload a PDF or Word document")]
    UnsupportedFileType { file_name: String, mime_type: String },

    /// Reading a local document failed
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// The token store could not be updated
    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status of a rejected request
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human readable `detail` reported by the backend, if any
    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::Status { body, .. } => extract_detail(body),
            _ => None,
        }
    }
}

/// Pull `detail` out of an error body like `{"detail": "Post not found"}`.
/// Validation errors carry a list there and are rendered as JSON.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn detail_or_body(body: &str) -> String {
    extract_detail(body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            "<empty body>".to_string()
        } else {
            body.to_string()
        }
    })
}
