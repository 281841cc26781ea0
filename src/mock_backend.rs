//! In-process mock of the draft assistant backend
//!
//! Serves the same endpoints as the real backend from an axum router bound
//! to an ephemeral port. Besides keeping users, posts and settings in
//! memory, it records what the client sent (authorization header, request
//! lines, multipart upload fields) so tests can assert on the wire
//! contract.

use axum::{
    extract::{Multipart, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::{
    BlogPost, BlogPostCreate, BlogPostUpdate, ImageGenerationRequest, PostStatus, WordPressSettings,
};

pub(crate) const SEED_EMAIL: &str = "writer@example.com";
pub(crate) const SEED_PASSWORD: &str = "correct horse";
pub(crate) const SEED_NAME: &str = "Test Writer";

/// Upload fields as received by `POST /files/upload/`
#[derive(Debug, Clone)]
pub(crate) struct RecordedUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone)]
struct MockUser {
    id: i64,
    email: String,
    full_name: String,
    password: String,
}

#[derive(Debug, Default)]
struct MockState {
    users: Vec<MockUser>,
    tokens: HashMap<String, i64>,
    next_token: u64,
    posts: BTreeMap<i64, (i64, BlogPost)>,
    next_post_id: i64,
    settings: HashMap<i64, WordPressSettings>,
    last_authorization: Option<String>,
    last_content_type: Option<String>,
    requests: Vec<String>,
    last_upload: Option<RecordedUpload>,
    last_settings_test: Option<WordPressSettings>,
    last_create_body: Option<Value>,
    images_generated: u64,
}

impl MockState {
    fn issue_token(&mut self, user_id: i64) -> String {
        self.next_token += 1;
        let token = format!("mock-token-{}-{}", user_id, self.next_token);
        self.tokens.insert(token.clone(), user_id);
        token
    }

    fn user(&self, id: i64) -> Option<&MockUser> {
        self.users.iter().find(|u| u.id == id)
    }

    fn owned_post(&self, user_id: i64, id: i64) -> Result<BlogPost, Failure> {
        match self.posts.get(&id) {
            Some((owner, post)) if *owner == user_id => Ok(post.clone()),
            _ => Err(failure(StatusCode::NOT_FOUND, "Post not found")),
        }
    }

    fn insert_post(&mut self, user_id: i64, mut post: BlogPost) -> BlogPost {
        self.next_post_id += 1;
        post.id = self.next_post_id;
        post.user_id = Some(user_id);
        self.posts.insert(post.id, (user_id, post.clone()));
        post
    }
}

type Shared = Arc<Mutex<MockState>>;
type Failure = (StatusCode, Json<Value>);

fn failure(status: StatusCode, detail: &str) -> Failure {
    (status, Json(json!({ "detail": detail })))
}

fn lock(state: &Shared) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn authenticate(state: &MockState, headers: &HeaderMap) -> Result<i64, Failure> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| state.tokens.get(token).copied())
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
}

fn user_json(user: &MockUser) -> Value {
    json!({
        "id": user.id,
        "email": user.email,
        "full_name": user.full_name,
        "is_active": true,
        "is_superuser": false,
    })
}

/// Running mock backend; the server task stops when the runtime shuts down
pub(crate) struct MockBackend {
    addr: SocketAddr,
    state: Shared,
}

impl MockBackend {
    /// Bind to an ephemeral port and start serving
    pub async fn start() -> Self {
        let mut initial = MockState::default();
        initial.users.push(MockUser {
            id: 1,
            email: SEED_EMAIL.to_string(),
            full_name: SEED_NAME.to_string(),
            password: SEED_PASSWORD.to_string(),
        });
        let state: Shared = Arc::new(Mutex::new(initial));

        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/auth/me", get(me))
            .route("/users/me", put(update_me))
            .route("/blog/", get(list_posts).post(create_post))
            .route(
                "/blog/{id}",
                get(get_post).put(update_post).delete(delete_post),
            )
            .route("/blog/{id}/publish", post(publish_post))
            .route("/files/upload/", post(upload_file))
            .route("/images/generate/", post(generate_image))
            .route(
                "/settings/wordpress",
                get(get_settings).put(update_settings),
            )
            .route("/settings/wordpress/test", post(test_settings));

        let app = Router::new()
            .nest("/api/v1", api)
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    /// Issue a valid token for the seeded account
    pub fn issue_token(&self) -> String {
        lock(&self.state).issue_token(1)
    }

    /// Store a post for the seeded account directly
    pub fn seed_post(
        &self,
        title: &str,
        status: PostStatus,
        created_at: Option<DateTime<Utc>>,
    ) -> BlogPost {
        let post = BlogPost {
            id: 0,
            title: title.to_string(),
            content: format!("<p>{}</p>", title),
            summary: format!("About {}", title),
            keywords: vec!["seed".to_string()],
            image_url: None,
            status,
            wordpress_post_id: None,
            user_id: None,
            created_at,
            updated_at: created_at,
        };
        lock(&self.state).insert_post(1, post)
    }

    /// Store WordPress settings for the seeded account directly
    pub fn configure_wordpress(&self, settings: WordPressSettings) {
        lock(&self.state).settings.insert(1, settings);
    }

    pub fn stored_post(&self, id: i64) -> Option<BlogPost> {
        lock(&self.state).posts.get(&id).map(|(_, post)| post.clone())
    }

    pub fn last_authorization(&self) -> Option<String> {
        lock(&self.state).last_authorization.clone()
    }

    pub fn last_content_type(&self) -> Option<String> {
        lock(&self.state).last_content_type.clone()
    }

    /// Request lines seen so far, e.g. `POST /api/v1/blog/`
    pub fn requests(&self) -> Vec<String> {
        lock(&self.state).requests.clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.state).requests.len()
    }

    pub fn last_upload(&self) -> Option<RecordedUpload> {
        lock(&self.state).last_upload.clone()
    }

    pub fn last_settings_test(&self) -> Option<WordPressSettings> {
        lock(&self.state).last_settings_test.clone()
    }

    /// Raw JSON body of the last `POST /blog/`
    pub fn last_create_body(&self) -> Option<Value> {
        lock(&self.state).last_create_body.clone()
    }

    pub fn images_generated(&self) -> u64 {
        lock(&self.state).images_generated
    }
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    {
        let mut s = lock(&state);
        s.last_authorization = header_string(request.headers(), header::AUTHORIZATION);
        s.last_content_type = header_string(request.headers(), header::CONTENT_TYPE);
        s.requests
            .push(format!("{} {}", request.method(), request.uri().path()));
    }
    next.run(request).await
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn login(State(state): State<Shared>, mut multipart: Multipart) -> Result<Json<Value>, Failure> {
    let mut fields = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| failure(StatusCode::BAD_REQUEST, "Malformed form"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|_| failure(StatusCode::BAD_REQUEST, "Malformed form"))?;
        fields.insert(name, value);
    }

    let mut s = lock(&state);
    let user_id = s
        .users
        .iter()
        .find(|u| Some(&u.email) == fields.get("username") && Some(&u.password) == fields.get("password"))
        .map(|u| u.id)
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Incorrect email or password"))?;
    let token = s.issue_token(user_id);
    Ok(Json(json!({ "access_token": token, "token_type": "bearer" })))
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    password: String,
    full_name: String,
}

async fn register(State(state): State<Shared>, Json(body): Json<RegisterBody>) -> Result<Json<Value>, Failure> {
    let mut s = lock(&state);
    if s.users.iter().any(|u| u.email == body.email) {
        return Err(failure(StatusCode::BAD_REQUEST, "Email already registered"));
    }
    let id = s.users.len() as i64 + 1;
    s.users.push(MockUser {
        id,
        email: body.email,
        full_name: body.full_name,
        password: body.password,
    });
    let token = s.issue_token(id);
    Ok(Json(json!({ "access_token": token, "token_type": "bearer" })))
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Result<Json<Value>, Failure> {
    let s = lock(&state);
    let user_id = authenticate(&s, &headers)?;
    let user = s
        .user(user_id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "User not found"))?;
    Ok(Json(user_json(user)))
}

#[derive(Deserialize)]
struct UpdateMeBody {
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
}

async fn update_me(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<UpdateMeBody>,
) -> Result<Json<Value>, Failure> {
    let mut s = lock(&state);
    let user_id = authenticate(&s, &headers)?;
    let user = s
        .users
        .iter_mut()
        .find(|u| u.id == user_id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "User not found"))?;
    if let Some(email) = body.email {
        user.email = email;
    }
    if let Some(full_name) = body.full_name {
        user.full_name = full_name;
    }
    if let Some(password) = body.password {
        user.password = password;
    }
    Ok(Json(user_json(user)))
}

async fn list_posts(State(state): State<Shared>, headers: HeaderMap) -> Result<Json<Vec<BlogPost>>, Failure> {
    let s = lock(&state);
    let user_id = authenticate(&s, &headers)?;
    let posts = s
        .posts
        .values()
        .filter(|(owner, _)| *owner == user_id)
        .map(|(_, post)| post.clone())
        .collect();
    Ok(Json(posts))
}

async fn get_post(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<BlogPost>, Failure> {
    let s = lock(&state);
    let user_id = authenticate(&s, &headers)?;
    Ok(Json(s.owned_post(user_id, id)?))
}

async fn create_post(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(raw): Json<Value>,
) -> Result<Json<BlogPost>, Failure> {
    let mut s = lock(&state);
    let user_id = authenticate(&s, &headers)?;
    s.last_create_body = Some(raw.clone());
    let body: BlogPostCreate = serde_json::from_value(raw)
        .map_err(|e| failure(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()))?;
    let now = Utc::now();
    let post = BlogPost {
        id: 0,
        title: body.title,
        content: body.content,
        summary: body.summary,
        keywords: body.keywords,
        image_url: body.image_url,
        status: body.status.unwrap_or_default(),
        wordpress_post_id: None,
        user_id: None,
        created_at: Some(now),
        updated_at: Some(now),
    };
    Ok(Json(s.insert_post(user_id, post)))
}

async fn update_post(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<BlogPostUpdate>,
) -> Result<Json<BlogPost>, Failure> {
    let mut s = lock(&state);
    let user_id = authenticate(&s, &headers)?;
    let mut post = s.owned_post(user_id, id)?;
    if let Some(title) = body.title {
        post.title = title;
    }
    if let Some(content) = body.content {
        post.content = content;
    }
    if let Some(summary) = body.summary {
        post.summary = summary;
    }
    if let Some(keywords) = body.keywords {
        post.keywords = keywords;
    }
    if let Some(image_url) = body.image_url {
        post.image_url = Some(image_url);
    }
    if let Some(status) = body.status {
        post.status = status;
    }
    post.updated_at = Some(Utc::now());
    s.posts.insert(id, (user_id, post.clone()));
    Ok(Json(post))
}

async fn delete_post(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Value>, Failure> {
    let mut s = lock(&state);
    let user_id = authenticate(&s, &headers)?;
    s.owned_post(user_id, id)?;
    s.posts.remove(&id);
    Ok(Json(json!({ "success": true })))
}

async fn publish_post(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<BlogPost>, Failure> {
    let mut s = lock(&state);
    let user_id = authenticate(&s, &headers)?;
    let mut post = s.owned_post(user_id, id)?;
    let configured = s
        .settings
        .get(&user_id)
        .map(|wp| !wp.site_url.is_empty() && !wp.application_password.is_empty())
        .unwrap_or(false);
    if !configured {
        return Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to publish post: WordPress settings not configured for user",
        ));
    }
    post.status = PostStatus::Published;
    post.wordpress_post_id = Some(1000 + id);
    s.posts.insert(id, (user_id, post.clone()));
    Ok(Json(post))
}

async fn upload_file(
    State(state): State<Shared>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, Failure> {
    {
        let s = lock(&state);
        authenticate(&s, &headers)?;
    }

    let mut upload = RecordedUpload {
        file_name: None,
        content_type: None,
        size: 0,
        custom_prompt: None,
    };
    let mut has_file = false;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| failure(StatusCode::BAD_REQUEST, "Malformed form"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                has_file = true;
                upload.file_name = field.file_name().map(str::to_string);
                upload.content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| failure(StatusCode::BAD_REQUEST, "Malformed form"))?;
                upload.size = data.len();
            }
            "custom_prompt" => {
                upload.custom_prompt = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| failure(StatusCode::BAD_REQUEST, "Malformed form"))?,
                );
            }
            _ => {}
        }
    }
    if !has_file {
        return Err(failure(StatusCode::UNPROCESSABLE_ENTITY, "file: field required"));
    }

    let stem = upload
        .file_name
        .as_deref()
        .and_then(|name| name.rsplit_once('.').map(|(stem, _)| stem.to_string()))
        .unwrap_or_else(|| "document".to_string());
    let angle = upload
        .custom_prompt
        .clone()
        .unwrap_or_else(|| "a well-structured blog post".to_string());
    let result = json!({
        "title": format!("Insights from {}", stem),
        "content": format!("<h1>Insights from {}</h1><p>Written as {}.</p>", stem, angle),
        "summary": format!("Key points extracted from {}", stem),
        "keywords": [stem, "insights"],
    });

    lock(&state).last_upload = Some(upload);
    Ok(Json(result))
}

async fn generate_image(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<ImageGenerationRequest>,
) -> Result<Json<Value>, Failure> {
    let mut s = lock(&state);
    authenticate(&s, &headers)?;
    if body.content.is_empty() || body.title.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Both content and title are required"));
    }
    s.images_generated += 1;
    let url = format!("https://images.example.com/generated/{}.png", s.images_generated);
    Ok(Json(json!({ "imageUrl": url })))
}

async fn get_settings(State(state): State<Shared>, headers: HeaderMap) -> Result<Json<Value>, Failure> {
    let s = lock(&state);
    let user_id = authenticate(&s, &headers)?;
    let settings = s.settings.get(&user_id).cloned().unwrap_or_default();
    // The backend reports an unset site URL as null
    let mut value = serde_json::to_value(&settings).unwrap_or_default();
    if settings.site_url.is_empty() {
        value["siteUrl"] = Value::Null;
    }
    Ok(Json(value))
}

async fn update_settings(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<WordPressSettings>,
) -> Result<Json<WordPressSettings>, Failure> {
    let mut s = lock(&state);
    let user_id = authenticate(&s, &headers)?;
    s.settings.insert(user_id, body.clone());
    Ok(Json(body))
}

async fn test_settings(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<WordPressSettings>,
) -> Result<Json<Value>, Failure> {
    let mut s = lock(&state);
    authenticate(&s, &headers)?;
    let reachable = body.site_url.starts_with("https://") && !body.application_password.is_empty();
    s.last_settings_test = Some(body);
    if reachable {
        Ok(Json(json!({ "success": true, "message": "Successfully connected to WordPress" })))
    } else {
        Ok(Json(json!({
            "success": false,
            "message": "Failed to connect to WordPress. Status code: 401",
        })))
    }
}
