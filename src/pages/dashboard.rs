//! Dashboard page
//!
//! Post statistics and the most recent posts of the current account.

use std::cmp::Ordering;

use super::{failure, Notice};
use crate::models::{BlogPost, PostStatus};
use crate::services::BlogService;

/// Number of posts shown under "Recent Posts"
pub const RECENT_LIMIT: usize = 5;

/// Counters shown at the top of the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub drafts: usize,
    pub published: usize,
    /// Every post comes from an uploaded document, so this equals `total`
    pub ai_generated: usize,
}

impl DashboardStats {
    pub fn from_posts(posts: &[BlogPost]) -> Self {
        let count = |status: PostStatus| posts.iter().filter(|p| p.status == status).count();
        Self {
            total: posts.len(),
            drafts: count(PostStatus::Draft),
            published: count(PostStatus::Published),
            ai_generated: posts.len(),
        }
    }

    /// (label, value) pairs in display order
    pub fn cards(&self) -> [(&'static str, usize); 4] {
        [
            ("Total Posts", self.total),
            ("Draft Posts", self.drafts),
            ("Published Posts", self.published),
            ("AI Generated", self.ai_generated),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub stats: DashboardStats,
    /// All posts, newest first
    pub posts: Vec<BlogPost>,
}

impl Dashboard {
    pub fn from_posts(mut posts: Vec<BlogPost>) -> Self {
        sort_newest_first(&mut posts);
        Self {
            stats: DashboardStats::from_posts(&posts),
            posts,
        }
    }

    pub fn recent(&self) -> &[BlogPost] {
        &self.posts[..self.posts.len().min(RECENT_LIMIT)]
    }
}

/// Sort by creation time, newest first; posts without a timestamp go last
pub fn sort_newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

pub async fn load(blog: &BlogService) -> Result<Dashboard, Notice> {
    let posts = blog
        .list()
        .await
        .map_err(|e| failure("Failed to load posts", e))?;
    Ok(Dashboard::from_posts(posts))
}
