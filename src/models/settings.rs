//! WordPress integration settings

use serde::{Deserialize, Serialize};

/// Post types offered by the settings form
pub const POST_TYPES: &[&str] = &["post", "page", "custom"];

/// Default post statuses offered by the settings form (WordPress vocabulary)
pub const POST_STATUSES: &[&str] = &["draft", "publish", "private"];

/// WordPress connection settings, one set per account
///
/// Saved wholesale; field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPressSettings {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub site_url: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub application_password: String,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    #[serde(default = "default_post_status")]
    pub post_status: String,
}

impl Default for WordPressSettings {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            username: String::new(),
            application_password: String::new(),
            post_type: default_post_type(),
            post_status: default_post_status(),
        }
    }
}

fn default_post_type() -> String {
    "post".to_string()
}

fn default_post_status() -> String {
    "draft".to_string()
}

impl WordPressSettings {
    /// Application password with everything but the last four characters hidden
    pub fn masked_password(&self) -> String {
        let chars: Vec<char> = self.application_password.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }

    /// Set a single field by its form name
    ///
    /// Accepts both the wire name (`siteUrl`) and the snake_case name.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), String> {
        let value = value.into();
        match name {
            "siteUrl" | "site_url" => self.site_url = value,
            "username" => self.username = value,
            "applicationPassword" | "application_password" => self.application_password = value,
            "postType" | "post_type" => self.post_type = value,
            "postStatus" | "post_status" => self.post_status = value,
            other => return Err(format!("unknown settings field '{}'", other)),
        }
        Ok(())
    }
}

/// Response of `POST /settings/wordpress/test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
