//! Blog post model
//!
//! This module provides:
//! - `BlogPost` as returned by the `/blog` endpoints
//! - `PostStatus` with its three publication states
//! - Create and partial-update payloads

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Blog post draft or published article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Unique identifier
    pub id: i64,
    /// Post title
    pub title: String,
    /// HTML content
    pub content: String,
    /// Short summary, empty when the backend has none
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub summary: String,
    /// Ordered keywords, empty when the backend has none
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub keywords: Vec<String>,
    /// Generated cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Publication status
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: PostStatus,
    /// Post id on the connected WordPress site, set once published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wordpress_post_id: Option<i64>,
    /// Owner account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Creation timestamp
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    pub fn is_draft(&self) -> bool {
        self.status == PostStatus::Draft
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Blog post publication status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Not yet published externally
    #[default]
    Draft,
    /// Pushed to WordPress
    Published,
    /// Hidden
    Private,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Private => "private",
        }
    }

    /// Parse a status name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(PostStatus::Draft),
            "published" => Some(PostStatus::Published),
            "private" => Some(PostStatus::Private),
            _ => None,
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("invalid status '{}', expected draft, published or private", s)
        })
    }
}

/// Payload for `POST /blog/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPostCreate {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl BlogPostCreate {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        summary: impl Into<String>,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            summary: summary.into(),
            keywords,
            image_url: None,
            status: None,
        }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Partial update for `PUT /blog/{id}`
///
/// Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPostUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl BlogPostUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update carrying every editable field of an existing post
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: Some(post.title.clone()),
            content: Some(post.content.clone()),
            summary: Some(post.summary.clone()),
            keywords: Some(post.keywords.clone()),
            image_url: post.image_url.clone(),
            status: Some(post.status),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check if any field is set
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.content.is_some()
            || self.summary.is_some()
            || self.keywords.is_some()
            || self.image_url.is_some()
            || self.status.is_some()
    }
}

/// Accepts RFC 3339 timestamps as well as naive ISO timestamps, which are
/// taken to be UTC. Null, missing and unparseable values become `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
