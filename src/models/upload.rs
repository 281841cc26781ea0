//! File extraction and image generation payloads

use serde::{Deserialize, Serialize};

/// Structured content extracted from an uploaded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUploadResult {
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub keywords: Vec<String>,
}

/// Body of `POST /images/generate/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub content: String,
    pub title: String,
}

impl ImageGenerationRequest {
    pub fn new(content: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: title.into(),
        }
    }
}

/// Response of `POST /images/generate/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationResponse {
    pub image_url: String,
}
