//! # Admin configuration: `portfolio-admin.toml`
//!
//! Defines the TOML configuration the admin front-end is built with
//! (filename: [`AdminConfig::filename`] = `"portfolio-admin.toml"`). The web
//! crate embeds the file at compile time and hands the parsed value to the
//! composition root, which derives the API client and the auth service from it.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000/api"
//!
//! [session]
//! idle_timeout_secs = 1800       # forced logout after 30 minutes
//!
//! [assets]
//! base_url = ""                  # empty = origin of api.base_url
//! legacy_origins = []            # absolute origins rewritten to assets.base_url
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`AdminConfig`] | Top-level config. Builder helpers (`with_base_url`, `with_idle_timeout`), TOML (de)serialisation, canonical filename. |
//! | [`ApiConfig`] | Backend base URL, including the `/api` prefix. |
//! | [`SessionConfig`] | Idle timeout in seconds, default **1800**. |
//! | [`AssetsConfig`] | Where image URLs returned by the backend should point. |
//!
//! Every section derives `Default`, so a missing or empty file is equivalent to
//! the default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `portfolio-admin.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Session lifecycle settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle timeout in seconds after which the session is force-terminated.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_idle_timeout() -> u64 {
    30 * 60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

/// Image URL rewriting settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Origin that serves uploaded images. Empty means the origin of `api.base_url`.
    #[serde(default)]
    pub base_url: String,
    /// Absolute origins baked into stored URLs that must be replaced by `base_url`.
    #[serde(default)]
    pub legacy_origins: Vec<String>,
}

impl AdminConfig {
    /// Builder method to set the backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Builder method to set the idle timeout.
    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.session.idle_timeout_secs = secs;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "portfolio-admin.toml"
    }

    /// Idle timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session.idle_timeout_secs)
    }

    /// Origin image URLs are resolved against.
    ///
    /// Falls back to the scheme and host of the API base URL, so that
    /// `http://localhost:5000/api` serves assets from `http://localhost:5000`.
    pub fn asset_origin(&self) -> String {
        let configured = self.assets.base_url.trim_end_matches('/');
        if !configured.is_empty() {
            return configured.to_string();
        }
        origin_of(&self.api.base_url)
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Scheme + authority of an absolute URL, or the input trimmed of its path
/// when no scheme is present.
pub fn origin_of(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };
    let authority = rest.split('/').next().unwrap_or_default();
    match scheme {
        Some(scheme) => format!("{scheme}://{authority}"),
        None => authority.to_string(),
    }
}
