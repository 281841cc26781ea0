//! Routing shell
//!
//! Maps paths to pages, keeps unauthenticated users out of the protected
//! ones, and provides the navigation entries and header shown around them.

use crate::services::AuthService;

/// Navigation entries: (label, path)
pub const NAV_ITEMS: &[(&str, &str)] = &[
    ("Dashboard", "/"),
    ("Upload", "/upload"),
    ("Preview", "/preview"),
    ("Settings", "/settings"),
];

/// Header label used when the current user could not be fetched
pub const LOADING_LABEL: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Upload,
    /// Preview, optionally for a post id exactly as it appeared in the path
    Preview(Option<String>),
    Settings,
}

impl Route {
    /// Parse a path; `None` for unknown paths
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Dashboard),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/upload" => Some(Route::Upload),
            "/preview" => Some(Route::Preview(None)),
            "/settings" => Some(Route::Settings),
            other => {
                let id = other.strip_prefix("/preview/")?;
                if id.is_empty() || id.contains('/') {
                    None
                } else {
                    Some(Route::Preview(Some(id.to_string())))
                }
            }
        }
    }

    pub fn preview(id: i64) -> Self {
        Route::Preview(Some(id.to_string()))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::Upload => "/upload".to_string(),
            Route::Preview(None) => "/preview".to_string(),
            Route::Preview(Some(id)) => format!("/preview/{}", id),
            Route::Settings => "/settings".to_string(),
        }
    }

    /// Everything but login and registration needs a session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Show the page
    Render(Route),
    /// Send the user elsewhere instead
    Redirect(Route),
    /// No page at this path
    Unknown(String),
}

/// Resolve a path against the current session
///
/// Only token presence is checked; an expired token still renders the page
/// and fails on its first request.
pub fn resolve(auth: &AuthService, path: &str) -> Resolution {
    match Route::parse(path) {
        None => Resolution::Unknown(path.to_string()),
        Some(route) => guard(auth, route),
    }
}

/// Redirect protected routes to login when there is no session
pub fn guard(auth: &AuthService, route: Route) -> Resolution {
    if route.is_protected() && !auth.is_authenticated() {
        tracing::debug!("No session, redirecting {} to /login", route);
        Resolution::Redirect(Route::Login)
    } else {
        Resolution::Render(route)
    }
}

/// Header text: the current user's full name, or a placeholder
pub async fn header_label(auth: &AuthService) -> String {
    match auth.current_user().await {
        Ok(user) => user.full_name,
        Err(e) => {
            tracing::error!("Error fetching user: {}", e);
            LOADING_LABEL.to_string()
        }
    }
}

/// Path of the active navigation entry, if the route has one
pub fn active_nav(route: &Route) -> Option<&'static str> {
    let path = match route {
        Route::Preview(_) => "/preview".to_string(),
        other => other.path(),
    };
    NAV_ITEMS
        .iter()
        .find(|(_, href)| *href == path)
        .map(|(_, href)| *href)
}

/// Drop the session and go to the login page
pub fn logout(auth: &AuthService) -> Route {
    auth.logout();
    Route::Login
}
