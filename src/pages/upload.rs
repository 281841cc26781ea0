//! Upload page
//!
//! Turns a document into a draft post: the document is sent for extraction
//! and the extracted fields become a new draft, which is then opened in the
//! preview.

use super::{failure, Notice, Route};
use crate::models::{BlogPost, BlogPostCreate, PostStatus};
use crate::services::{Document, Services};

/// Shown when the selected document is not a PDF or Word file
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Please upload a PDF or Word document";

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub post: BlogPost,
    pub notice: Notice,
    pub navigate_to: Route,
}

/// Upload a document and create a draft from what the backend extracted
///
/// `custom_prompt` is sent only when it is not empty. The type check happens
/// before anything is sent.
pub async fn submit(
    services: &Services,
    document: &Document,
    custom_prompt: &str,
) -> Result<UploadOutcome, Notice> {
    if !document.is_accepted() {
        tracing::warn!(
            "Rejected {} with unsupported type {}",
            document.file_name,
            document.mime_type
        );
        return Err(Notice::error(UNSUPPORTED_TYPE_MESSAGE));
    }

    let prompt = Some(custom_prompt).filter(|p| !p.is_empty());
    let extracted = services
        .files
        .upload_file(document, prompt)
        .await
        .map_err(|e| failure("Error processing file", e))?;

    let draft = BlogPostCreate::new(
        extracted.title,
        extracted.content,
        extracted.summary,
        extracted.keywords,
    )
    .with_status(PostStatus::Draft);
    let post = services
        .blog
        .create(&draft)
        .await
        .map_err(|e| failure("Error processing file", e))?;

    Ok(UploadOutcome {
        navigate_to: Route::preview(post.id),
        notice: Notice::success("File processed successfully!"),
        post,
    })
}
