//! # API crate: backend access and session logic for the portfolio admin
//!
//! Everything the admin front-end needs that is not a view lives here: the
//! HTTP client for the portfolio backend, the typed content endpoints, and the
//! auth service that owns the client-side session.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | | Auth service, idle timer, route guards and the `/auth` endpoints |
//! | [`client`] | | `reqwest` wrapper: base URL, bearer token, status handling |
//! | [`content`] | | Skills, projects, about and contacts endpoints ([`ContentApi`]) |
//! | [`envelope`] | | Resolution of the backend's response envelopes |
//! | [`error`] | | [`ApiError`] and the user-facing messages derived from it |
//! | [`images`] | | Rewriting of relative and legacy image URLs |
//! | [`models`] | | Auth payloads and image uploads |
//! | `testing` | `testing` | Scripted backends for tests |
//!
//! The record types themselves (`Skill`, `Project`, ...) live in the `store`
//! crate and are re-exported here.

pub mod auth;
pub mod client;
pub mod content;
pub mod envelope;
pub mod error;
pub mod images;
pub mod models;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use auth::{
    admin_guard, auth_guard, AuthBackend, AuthService, GuardDecision, IdleTicket, SessionState,
    ADMIN_ROUTE, LOGIN_ROUTE,
};
pub use client::ApiClient;
pub use content::ContentApi;
pub use error::ApiError;
pub use models::{AuthResponse, ImageUpload, LoginCredentials, RegisterData};

pub use store::{
    About, AboutDraft, AdminConfig, Contact, ContactDraft, Project, ProjectDraft, Skill,
    SkillDraft, User,
};
