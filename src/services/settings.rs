//! Settings service
//!
//! WordPress integration settings for the current account. Settings are
//! always saved wholesale.

use crate::api::{ApiClient, ApiResult};
use crate::models::{ConnectionTestResult, WordPressSettings};

#[derive(Debug, Clone)]
pub struct SettingsService {
    client: ApiClient,
}

impl SettingsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_settings(&self) -> ApiResult<WordPressSettings> {
        self.client.get("/settings/wordpress").await
    }

    /// Save the settings and return the stored copy
    pub async fn update_settings(&self, settings: &WordPressSettings) -> ApiResult<WordPressSettings> {
        let saved: WordPressSettings = self.client.put("/settings/wordpress", settings).await?;
        tracing::info!("Saved WordPress settings for {}", saved.site_url);
        Ok(saved)
    }

    /// Check whether the backend can reach WordPress with these settings
    pub async fn test_connection(&self, settings: &WordPressSettings) -> ApiResult<bool> {
        Ok(self.test_connection_detailed(settings).await?.success)
    }

    /// Same as `test_connection`, keeping the backend's message
    pub async fn test_connection_detailed(
        &self,
        settings: &WordPressSettings,
    ) -> ApiResult<ConnectionTestResult> {
        self.client.post("/settings/wordpress/test", settings).await
    }
}
