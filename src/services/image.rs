//! Image service

use crate::api::{ApiClient, ApiResult};
use crate::models::{ImageGenerationRequest, ImageGenerationResponse};

#[derive(Debug, Clone)]
pub struct ImageService {
    client: ApiClient,
}

impl ImageService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Generate a cover image for a post and return its URL
    ///
    /// One request, one response. Concurrent calls are independent and
    /// each returns its own URL.
    pub async fn generate_image(&self, request: &ImageGenerationRequest) -> ApiResult<String> {
        let response: ImageGenerationResponse =
            self.client.post("/images/generate/", request).await?;
        tracing::debug!("Generated image {}", response.image_url);
        Ok(response.image_url)
    }
}
