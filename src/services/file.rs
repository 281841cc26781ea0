//! File service
//!
//! Uploads a PDF or Word document, optionally with free-text processing
//! instructions, and returns the structured content the backend extracted.
//! Only documents of an accepted type are ever sent; anything else is
//! rejected locally before a request is made.

use reqwest::multipart::{Form, Part};
use std::path::Path;

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::models::FileUploadResult;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Fallback MIME type for unknown extensions
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// Accepted document MIME types and their file extensions
pub const ACCEPTED_DOCUMENT_TYPES: &[(&str, &str)] = &[
    (MIME_PDF, "pdf"),
    (MIME_DOC, "doc"),
    (MIME_DOCX, "docx"),
];

/// Check if a MIME type may be uploaded
pub fn is_accepted_type(mime_type: &str) -> bool {
    ACCEPTED_DOCUMENT_TYPES.iter().any(|(mime, _)| *mime == mime_type)
}

/// MIME type for a file extension (case-insensitive, without the dot)
pub fn mime_for_extension(extension: &str) -> &'static str {
    let extension = extension.to_ascii_lowercase();
    ACCEPTED_DOCUMENT_TYPES
        .iter()
        .find(|(_, ext)| *ext == extension)
        .map(|(mime, _)| *mime)
        .unwrap_or(MIME_OCTET_STREAM)
}

/// A document selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a document from disk, deriving its MIME type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| ApiError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(mime_for_extension)
            .unwrap_or(MIME_OCTET_STREAM);

        Ok(Self::new(file_name, mime_type, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_accepted(&self) -> bool {
        is_accepted_type(&self.mime_type)
    }

    /// Reject documents that are not PDF or Word files
    pub fn validate(&self) -> ApiResult<()> {
        if self.is_accepted() {
            Ok(())
        } else {
            Err(ApiError::UnsupportedFileType {
                file_name: self.file_name.clone(),
                mime_type: self.mime_type.clone(),
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileService {
    client: ApiClient,
}

impl FileService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Upload a document for extraction
    ///
    /// An empty prompt is treated as no prompt, letting the backend use its
    /// default instructions. Any other prompt is sent verbatim.
    pub async fn upload_file(
        &self,
        document: &Document,
        custom_prompt: Option<&str>,
    ) -> ApiResult<FileUploadResult> {
        document.validate()?;

        let part = Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str(&document.mime_type)?;
        let mut form = Form::new().part("file", part);
        if let Some(prompt) = custom_prompt.filter(|p| !p.is_empty()) {
            form = form.text("custom_prompt", prompt.to_string());
        }

        tracing::info!(
            "Uploading {} ({} bytes, {})",
            document.file_name,
            document.len(),
            document.mime_type
        );
        self.client.post_multipart("/files/upload/", form).await
    }
}
