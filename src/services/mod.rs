//! Services layer - typed access to the backend
//!
//! Each service wraps one group of endpoints and returns decoded models.
//! Services hold no state of their own besides the shared `ApiClient`;
//! results are handed back to the caller as-is, without local merging or
//! caching.

pub mod auth;
pub mod blog;
pub mod file;
pub mod image;
pub mod settings;

pub use auth::AuthService;
pub use blog::BlogService;
pub use file::{Document, FileService, ACCEPTED_DOCUMENT_TYPES};
pub use image::ImageService;
pub use settings::SettingsService;

use crate::api::ApiClient;

/// All services over one client
#[derive(Debug, Clone)]
pub struct Services {
    pub auth: AuthService,
    pub blog: BlogService,
    pub files: FileService,
    pub images: ImageService,
    pub settings: SettingsService,
}

impl Services {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            blog: BlogService::new(client.clone()),
            files: FileService::new(client.clone()),
            images: ImageService::new(client.clone()),
            settings: SettingsService::new(client),
        }
    }
}
