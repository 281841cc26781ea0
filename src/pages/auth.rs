//! Login and registration pages

use super::{failure, Notice, Route};
use crate::services::AuthService;

/// Log in and go to the dashboard
pub async fn login(auth: &AuthService, username: &str, password: &str) -> Result<Route, Notice> {
    auth.login(username, password)
        .await
        .map_err(|e| failure("Login failed", e))?;
    Ok(Route::Dashboard)
}

/// Create an account, which also logs in, and go to the dashboard
pub async fn register(
    auth: &AuthService,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<Route, Notice> {
    auth.register(email, password, full_name)
        .await
        .map_err(|e| failure("Registration failed", e))?;
    Ok(Route::Dashboard)
}
