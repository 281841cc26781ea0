//! Auth service
//!
//! Login, registration and the lifecycle of the stored bearer token.
//! Being "authenticated" means nothing more than having a token stored;
//! its validity is only discovered when a request is rejected.

use reqwest::multipart::Form;

use crate::api::{ApiClient, ApiResult};
use crate::models::{AuthToken, RegisterRequest, User, UserUpdate};

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Log in with a username (the account email) and password
    ///
    /// Credentials are sent as multipart form fields. On success the token
    /// is stored and the token payload returned.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<AuthToken> {
        let form = Form::new()
            .text("username", username.to_string())
            .text("password", password.to_string());

        let token: AuthToken = self.client.post_multipart("/auth/login", form).await?;
        self.client.tokens().set(&token.access_token)?;
        tracing::info!("Logged in as {}", username);
        Ok(token)
    }

    /// Create an account and store the issued token
    pub async fn register(&self, email: &str, password: &str, full_name: &str) -> ApiResult<AuthToken> {
        let body = RegisterRequest::new(email, password, full_name);

        let token: AuthToken = self.client.post("/auth/register", &body).await?;
        self.client.tokens().set(&token.access_token)?;
        tracing::info!("Registered {}", email);
        Ok(token)
    }

    /// Fetch the account the stored token belongs to
    pub async fn current_user(&self) -> ApiResult<User> {
        self.client.get("/auth/me").await
    }

    /// Update email, display name or password of the current account
    pub async fn update_profile(&self, update: &UserUpdate) -> ApiResult<User> {
        self.client.put("/users/me", update).await
    }

    /// Forget the stored token
    pub fn logout(&self) {
        if let Err(e) = self.client.tokens().clear() {
            tracing::warn!("Failed to clear session: {}", e);
        }
    }

    pub fn token(&self) -> Option<String> {
        self.client.tokens().get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}
