pub mod config;
pub mod models;
pub mod session;
pub mod storage;
pub mod token;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::BrowserStorage;

pub use config::AdminConfig;
pub use models::{
    About, AboutDraft, Contact, ContactDraft, Project, ProjectDraft, Skill, SkillDraft, User,
};
pub use session::{SessionError, SessionStore};
pub use storage::KeyValueStorage;
pub use token::{current_timestamp, decode_claims, is_token_valid, TokenClaims, TokenError};
