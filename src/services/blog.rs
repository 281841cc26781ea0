//! Blog service
//!
//! CRUD and publishing for the current account's posts. Every call returns
//! the backend's copy of the post; callers replace what they hold with it.

use crate::api::{ApiClient, ApiResult};
use crate::models::{BlogPost, BlogPostCreate, BlogPostUpdate};

#[derive(Debug, Clone)]
pub struct BlogService {
    client: ApiClient,
}

impl BlogService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List all posts of the current account, in backend order
    pub async fn list(&self) -> ApiResult<Vec<BlogPost>> {
        self.client.get("/blog/").await
    }

    pub async fn get(&self, id: i64) -> ApiResult<BlogPost> {
        self.client.get(&format!("/blog/{}", id)).await
    }

    pub async fn create(&self, data: &BlogPostCreate) -> ApiResult<BlogPost> {
        let post: BlogPost = self.client.post("/blog/", data).await?;
        tracing::info!("Created blog post {} ({})", post.id, post.title);
        Ok(post)
    }

    /// Apply a partial update; unset fields are left alone by the backend
    pub async fn update(&self, id: i64, data: &BlogPostUpdate) -> ApiResult<BlogPost> {
        self.client.put(&format!("/blog/{}", id), data).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/blog/{}", id)).await?;
        tracing::info!("Deleted blog post {}", id);
        Ok(())
    }

    /// Push a post to the connected WordPress site
    pub async fn publish(&self, id: i64) -> ApiResult<BlogPost> {
        let post: BlogPost = self
            .client
            .post_empty(&format!("/blog/{}/publish", id))
            .await?;
        tracing::info!(
            "Published blog post {} (WordPress id {:?})",
            post.id,
            post.wordpress_post_id
        );
        Ok(post)
    }
}
