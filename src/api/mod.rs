//! API layer - HTTP client wrapper
//!
//! Every service talks to the backend through `ApiClient`, which:
//! - Joins endpoint paths onto the configured base URL
//! - Reads the bearer token from the session store on each request and
//!   attaches `Authorization: Bearer <token>` when one is present
//! - Encodes JSON or multipart bodies and decodes JSON responses
//! - Turns any non-2xx response into `ApiError::Status`, untouched
//!
//! There is no retry, no timeout and no response caching.

pub mod error;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::session::DynTokenStore;

pub use error::ApiError;

/// Result alias used throughout the client
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP client bound to one backend and one token store
///
/// Cloning is cheap; clones share the connection pool and the token store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: DynTokenStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.tokens.get().is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>, tokens: DynTokenStore) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("draftdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(http, base_url, tokens))
    }

    /// Create a client from configuration
    pub fn from_config(config: &ApiConfig, tokens: DynTokenStore) -> ApiResult<Self> {
        Self::new(config.base_url.clone(), tokens)
    }

    /// Create a client around an existing reqwest client
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        tokens: DynTokenStore,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token store shared by every request
    pub fn tokens(&self) -> &DynTokenStore {
        &self.tokens
    }

    /// Absolute URL for an endpoint path such as `/blog/`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// GET and decode a JSON response
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.request(Method::GET, path);
        self.send_json(Method::GET, path, request).await
    }

    /// POST a JSON body and decode a JSON response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        self.send_json(Method::POST, path, request).await
    }

    /// POST without a body and decode a JSON response
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.request(Method::POST, path);
        self.send_json(Method::POST, path, request).await
    }

    /// POST a multipart/form-data body and decode a JSON response
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<T> {
        let request = self.request(Method::POST, path).multipart(form);
        self.send_json(Method::POST, path, request).await
    }

    /// PUT a JSON body and decode a JSON response
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).json(body);
        self.send_json(Method::PUT, path, request).await
    }

    /// DELETE, discarding whatever body the backend returns
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = self.request(Method::DELETE, path);
        self.send(Method::DELETE, path, request).await?;
        Ok(())
    }

    /// Start a request with the bearer token attached, if any
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.tokens.get() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> ApiResult<Response> {
        tracing::debug!("{} {}", method, path);

        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, path, e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} {} returned {}", method, path, status.as_u16());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = self.send(method, path, request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}
