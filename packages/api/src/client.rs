//! # HTTP transport to the portfolio backend
//!
//! [`ApiClient`] is a thin wrapper around [`reqwest::Client`] that knows the
//! backend base URL, the optional bearer token of the current session and how
//! to turn an HTTP exchange into either a JSON body or an [`ApiError`].
//!
//! The client is cheap to clone (reqwest shares its connection pool), and a
//! token-carrying copy is derived per call site with [`ApiClient::with_bearer`]
//! from the session held by the auth service. There is no retry, caching,
//! backoff or cancellation; every request is fired exactly once.
//!
//! Endpoint groups are implemented in sibling modules:
//! [`crate::content`] (skills, projects, about, contacts) and
//! [`crate::auth::backend`] (login, register, logout).

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use store::AdminConfig;

use crate::envelope;
use crate::error::ApiError;
use crate::images::ImageRewriter;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
    images: ImageRewriter,
}

impl ApiClient {
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            bearer: None,
            images: ImageRewriter::from_config(config),
        }
    }

    /// Copy of this client that authenticates with `token` when present.
    pub fn with_bearer(&self, token: Option<String>) -> Self {
        Self {
            bearer: token.filter(|t| !t.is_empty()),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_bearer(&self) -> bool {
        self.bearer.is_some()
    }

    pub(crate) fn images(&self) -> &ImageRewriter {
        &self.images
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request, attaching `Authorization: Bearer <token>` when a token is held.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.url(path));
        match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and return its JSON body (`null` for an empty body).
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        resolve_body(status, &text)
    }

    pub(crate) async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.send(self.request(method, path).json(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(self.request(Method::DELETE, path)).await
    }
}

/// Turn a status and raw body into JSON, or into the error the backend reported.
fn resolve_body(status: StatusCode, text: &str) -> Result<Value, ApiError> {
    if !status.is_success() {
        let message = envelope::error_message(text);
        tracing::debug!("Backend answered {status}: {message:?}");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn urls_join_base_and_path() {
        let client = ApiClient::new(&AdminConfig::default().with_base_url("http://h:5000/api/"));
        assert_eq!(client.base_url(), "http://h:5000/api");
        assert_eq!(client.url("/skills/s1"), "http://h:5000/api/skills/s1");
        assert_eq!(client.url("auth/login"), "http://h:5000/api/auth/login");
    }

    #[test]
    fn bearer_only_when_token_present() {
        let client = ApiClient::new(&AdminConfig::default());
        assert!(!client.has_bearer());
        assert!(client.with_bearer(Some("tok".into())).has_bearer());
        assert!(!client.with_bearer(Some(String::new())).has_bearer());
        assert!(!client.with_bearer(None).has_bearer());
    }

    #[test]
    fn request_carries_authorization_header() {
        let client = ApiClient::new(&AdminConfig::default()).with_bearer(Some("tok".into()));
        let request = client.request(Method::GET, "skills").build().unwrap();
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer tok"
        );

        let anonymous = ApiClient::new(&AdminConfig::default());
        let request = anonymous.request(Method::GET, "skills").build().unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[rstest]
    #[case::not_found(404, r#"{"success":false,"message":"Skill not found"}"#, Some("Skill not found"))]
    #[case::unauthorized(401, r#"{"message":"Invalid token"}"#, Some("Invalid token"))]
    #[case::html_error(500, "<html>Internal Server Error</html>", None)]
    #[case::empty_error(503, "", None)]
    fn failures_keep_status_and_message(
        #[case] status: u16,
        #[case] body: &str,
        #[case] message: Option<&str>,
    ) {
        let status = StatusCode::from_u16(status).unwrap();
        match resolve_body(status, body) {
            Err(ApiError::Status {
                status: code,
                message: got,
            }) => {
                assert_eq!(code, status.as_u16());
                assert_eq!(got.as_deref(), message);
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[test]
    fn success_bodies() {
        assert_eq!(resolve_body(StatusCode::OK, "").unwrap(), Value::Null);
        assert_eq!(resolve_body(StatusCode::NO_CONTENT, "  \n").unwrap(), Value::Null);
        assert_eq!(
            resolve_body(StatusCode::CREATED, r#"{"success":true}"#).unwrap(),
            json!({"success": true})
        );
        assert!(matches!(
            resolve_body(StatusCode::OK, "not json"),
            Err(ApiError::Decode(_))
        ));
    }
}
