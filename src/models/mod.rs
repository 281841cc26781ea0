//! Data models
//!
//! Wire types exchanged with the draft assistant backend:
//! - Users and auth tokens
//! - Blog posts and their create/update payloads
//! - WordPress integration settings
//! - File extraction and image generation payloads

mod blog_post;
mod settings;
mod upload;
mod user;

pub use blog_post::{BlogPost, BlogPostCreate, BlogPostUpdate, PostStatus};
pub use settings::{ConnectionTestResult, WordPressSettings, POST_STATUSES, POST_TYPES};
pub use upload::{FileUploadResult, ImageGenerationRequest, ImageGenerationResponse};
pub use user::{AuthToken, RegisterRequest, User, UserUpdate};

/// Deserialize a JSON `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
