//! This crate contains all shared UI for the workspace.

pub mod admin;
pub mod forms;
pub mod login;
pub mod views;
pub mod window;

mod auth;
pub use auth::{
    use_auth, use_auth_handle, AppAuth, AppStorage, AuthHandle, AuthProvider, AuthState,
    SESSION_EXPIRED,
};
