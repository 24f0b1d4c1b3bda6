//! Authentication endpoints.

use std::future::Future;

use reqwest::Method;
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginCredentials, RegisterData};

/// The backend's `/auth` routes, as seen by [`crate::auth::AuthService`].
pub trait AuthBackend {
    /// `POST /auth/login`. A decoded `success: false` answer is `Ok`.
    fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>>;

    /// `POST /auth/register`.
    fn register(&self, data: &RegisterData) -> impl Future<Output = Result<AuthResponse, ApiError>>;

    /// `POST /auth/logout`, authenticated with `token` when given.
    fn logout(&self, token: Option<String>) -> impl Future<Output = Result<(), ApiError>>;
}

impl AuthBackend for ApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        let body = self
            .send_json(Method::POST, "auth/login", credentials)
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ApiError> {
        let body = self.send_json(Method::POST, "auth/register", data).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn logout(&self, token: Option<String>) -> Result<(), ApiError> {
        self.with_bearer(token)
            .send_json(Method::POST, "auth/logout", &json!({}))
            .await?;
        Ok(())
    }
}
