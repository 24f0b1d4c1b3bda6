//! Login submission and the messages shown for each way it can fail.

use api::{admin_guard, ApiError, AuthBackend, AuthService, GuardDecision};
use store::config::origin_of;
use store::KeyValueStorage;

use crate::forms::LoginForm;

pub const ACCESS_DENIED: &str = "Access denied. Admin privileges required.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const ENDPOINT_NOT_FOUND: &str = "Login endpoint not found. Please check backend routes.";
pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session established and the admin guard allows the dashboard.
    Admitted,
    /// Nothing to navigate to; show the message under the form.
    Refused(String),
}

/// Message for a login request that failed below the `success` flag.
pub fn login_error_message(error: &ApiError, base_url: &str) -> String {
    match error.status() {
        0 => format!(
            "Cannot connect to server. Please check if the backend is running on {}",
            origin_of(base_url)
        ),
        404 => ENDPOINT_NOT_FOUND.to_string(),
        _ => error
            .backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_ERROR.to_string()),
    }
}

/// Validate `form`, log in, and decide where the user goes next.
pub async fn submit_login<S, B>(
    auth: &AuthService<S, B>,
    form: &LoginForm,
    base_url: &str,
) -> LoginOutcome
where
    S: KeyValueStorage,
    B: AuthBackend,
{
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(e) => return LoginOutcome::Refused(e.to_string()),
    };

    match auth.login(&credentials).await {
        Ok(response) if response.success => match admin_guard(auth) {
            GuardDecision::Allow => LoginOutcome::Admitted,
            GuardDecision::Redirect(_) => {
                tracing::info!("Login succeeded but {} is not an admin", credentials.email);
                LoginOutcome::Refused(ACCESS_DENIED.to_string())
            }
        },
        Ok(response) => LoginOutcome::Refused(
            response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| LOGIN_FAILED.to_string()),
        ),
        Err(e) => {
            tracing::error!("Login request failed: {e}");
            LoginOutcome::Refused(login_error_message(&e, base_url))
        }
    }
}
