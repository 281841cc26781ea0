//! Settings page
//!
//! WordPress connection form: load, save and test.

use super::{failure, Notice};
use crate::models::WordPressSettings;
use crate::services::Services;

/// Current settings, or the defaults when they cannot be fetched
pub async fn load(services: &Services) -> WordPressSettings {
    services.settings.get_settings().await.unwrap_or_else(|e| {
        tracing::error!("Error fetching settings: {}", e);
        WordPressSettings::default()
    })
}

pub async fn save(services: &Services, settings: &WordPressSettings) -> Result<(WordPressSettings, Notice), Notice> {
    let saved = services
        .settings
        .update_settings(settings)
        .await
        .map_err(|e| failure("Error saving settings", e))?;
    Ok((saved, Notice::success("Settings saved successfully!")))
}

/// Test the connection; any error counts as a failed connection
pub async fn test_connection(services: &Services, settings: &WordPressSettings) -> Notice {
    match services.settings.test_connection_detailed(settings).await {
        Ok(result) if result.success => Notice::success("WordPress connection successful!"),
        Ok(result) => {
            if let Some(message) = result.message {
                tracing::warn!("WordPress connection test failed: {}", message);
            }
            Notice::error("Failed to connect to WordPress")
        }
        Err(e) => failure("Failed to connect to WordPress", e),
    }
}
