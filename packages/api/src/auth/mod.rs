//! Session lifecycle and access control for the admin dashboard.

pub mod backend;
mod guard;
mod idle;
mod service;

pub use backend::AuthBackend;
pub use guard::{admin_guard, auth_guard, GuardDecision, SessionState, ADMIN_ROUTE, LOGIN_ROUTE};
pub use idle::{IdleTicket, IdleTimer};
pub use service::AuthService;
