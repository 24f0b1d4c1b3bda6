//! Error type shared by every backend call.

use thiserror::Error;

/// Failure of a request to the portfolio backend.
///
/// Only two classes exist from the user's point of view: the backend answered
/// and refused ([`ApiError::Status`], [`ApiError::Rejected`]), or the request
/// never produced a usable answer ([`ApiError::Unreachable`], [`ApiError::Decode`]).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("backend returned {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("{}", .message.as_deref().unwrap_or("request rejected"))]
    Rejected { message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failure, `0` when the backend was never reached.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unreachable(_) => 0,
            ApiError::Status { status, .. } => *status,
            ApiError::Rejected { .. } | ApiError::Decode(_) => 200,
        }
    }

    /// Message reported by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Text suitable for the dashboard's message line.
    pub fn user_message(&self) -> String {
        match self.backend_message() {
            Some(message) => message.to_string(),
            None => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return ApiError::Decode(e.to_string());
        }
        match e.status() {
            Some(status) => ApiError::Status {
                status: status.as_u16(),
                message: None,
            },
            None => ApiError::Unreachable(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::Unreachable("refused".into()).status(), 0);
        let e = ApiError::Status {
            status: 404,
            message: None,
        };
        assert_eq!(e.status(), 404);
        assert_eq!(e.to_string(), "backend returned 404");
    }

    #[test]
    fn user_message_prefers_backend_text() {
        let e = ApiError::Status {
            status: 401,
            message: Some("Invalid credentials".into()),
        };
        assert_eq!(e.user_message(), "Invalid credentials");

        let e = ApiError::Unreachable("connection refused".into());
        assert_eq!(e.user_message(), "backend unreachable: connection refused");

        let e = ApiError::Rejected { message: None };
        assert_eq!(e.user_message(), "request rejected");
    }
}
