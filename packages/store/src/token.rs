//! Client-side inspection of the bearer token.
//!
//! The admin front-end never verifies signatures; it only reads the payload
//! segment of the JWT to learn when the backend will stop accepting it.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    MissingPayload,
    #[error("token payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The only claim the front-end reads. Every other claim is ignored, whatever
/// its type.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Expiry as a NumericDate: seconds since the Unix epoch, possibly fractional.
    #[serde(default)]
    pub exp: Option<f64>,
}

impl TokenClaims {
    /// Whether the token expired before `now`. Tokens without `exp` never expire.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp < now as f64)
    }
}

/// Decode the payload segment of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::MissingPayload)?;

    let trimmed = payload.trim_end_matches('=');
    let bytes = match URL_SAFE_NO_PAD.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) => STANDARD.decode(payload)?,
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Pure validity check: the token decodes and has not expired at `now`.
pub fn is_token_valid(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        Ok(claims) => !claims.is_expired_at(now),
        Err(e) => {
            tracing::debug!("Rejecting undecodable token: {e}");
            false
        }
    }
}

/// Seconds since the Unix epoch, platform-aware.
pub fn current_timestamp() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

/// Build an unsigned token carrying `payload`, for tests across the workspace.
#[doc(hidden)]
pub fn unsigned_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}
