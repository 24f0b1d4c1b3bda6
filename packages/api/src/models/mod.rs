//! Request and response payloads specific to the API layer.
//!
//! Domain records (skills, projects, ...) live in [`store::models`] and are
//! re-exported from the crate root.

mod auth;
mod upload;

pub use auth::{AuthResponse, LoginCredentials, RegisterData};
pub use upload::ImageUpload;
