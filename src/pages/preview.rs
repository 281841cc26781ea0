//! Blog preview page
//!
//! Shows one post and offers the two actions that act on it: generating a
//! cover image and publishing to WordPress.

use super::{failure, Notice, Route};
use crate::models::{BlogPost, BlogPostUpdate, ImageGenerationRequest};
use crate::services::Services;

/// What the preview page shows
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewView {
    /// Opened without a post id
    NoSelection,
    /// The id was not a number or the post could not be fetched
    NotFound,
    Post(BlogPost),
}

impl PreviewView {
    /// Message for the views that have no post
    pub fn message(&self) -> Option<&'static str> {
        match self {
            PreviewView::NoSelection => Some("No blog post selected"),
            PreviewView::NotFound => Some("Blog post not found"),
            PreviewView::Post(_) => None,
        }
    }

    pub fn post(&self) -> Option<&BlogPost> {
        match self {
            PreviewView::Post(post) => Some(post),
            _ => None,
        }
    }
}

/// Load the post for a raw id taken from the path
pub async fn load(services: &Services, id: Option<&str>) -> PreviewView {
    let Some(raw) = id else {
        return PreviewView::NoSelection;
    };
    let id = match raw.trim().parse::<i64>() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Invalid blog post id '{}': {}", raw, e);
            return PreviewView::NotFound;
        }
    };
    match services.blog.get(id).await {
        Ok(post) => PreviewView::Post(post),
        Err(e) => {
            tracing::error!("Failed to load blog post {}: {}", id, e);
            PreviewView::NotFound
        }
    }
}

/// Generate a cover image and store it on the post
///
/// The update carries every current field of `post` plus the new image URL,
/// so whatever the caller holds is what gets saved.
pub async fn generate_image(services: &Services, post: &BlogPost) -> Result<(BlogPost, Notice), Notice> {
    let request = ImageGenerationRequest::new(post.content.clone(), post.title.clone());
    let image_url = services
        .images
        .generate_image(&request)
        .await
        .map_err(|e| failure("Failed to generate image", e))?;

    let update = BlogPostUpdate::from_post(post).with_image_url(image_url);
    let updated = services
        .blog
        .update(post.id, &update)
        .await
        .map_err(|e| failure("Failed to generate image", e))?;

    Ok((updated, Notice::success("Image generated successfully!")))
}

/// Publish the post and head back to the dashboard
pub async fn publish(services: &Services, post: &BlogPost) -> Result<(BlogPost, Notice, Route), Notice> {
    let published = services
        .blog
        .publish(post.id)
        .await
        .map_err(|e| failure("Error publishing post", e))?;

    Ok((
        published,
        Notice::success("Post published successfully!"),
        Route::Dashboard,
    ))
}
