//! # Authentication payloads
//!
//! ## [`LoginCredentials`] / [`RegisterData`]
//!
//! Bodies posted to `/auth/login` and `/auth/register`. `Debug` is implemented
//! by hand so the password never ends up in a log line.
//!
//! ## [`AuthResponse`]
//!
//! The backend answers both endpoints with the same shape:
//!
//! ```json
//! {"success": true, "token": "<jwt>", "user": {"id": "1", "name": "A", "email": "a@b.com", "role": "admin"}}
//! {"success": false, "message": "Invalid credentials"}
//! ```
//!
//! A logical failure (`success: false`) is a successfully decoded value, not an
//! error: the login view inspects `success` and `message` itself. Only transport
//! and HTTP failures surface as [`crate::ApiError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use store::User;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterData")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Answer of the login and register endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthResponse {
    /// Token and user when the response establishes a session.
    pub fn session(&self) -> Option<(&str, &User)> {
        if !self.success {
            return None;
        }
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        Some((token, self.user.as_ref()?))
    }

    /// A `success: false` response carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}
