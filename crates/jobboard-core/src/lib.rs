//! Core of the job board client.
//!
//! Owns everything below the view layer: configuration, logging, the session
//! store, the two HTTP adapters, typed endpoint services, the route table and
//! the route guards that gate navigation on the resolved identity.

pub mod api;
pub mod config;
pub mod guard;
pub mod logging;
pub mod logout;
pub mod routes;
pub mod services;
pub mod session;

pub use api::{ApiClients, ApiError, ApiErrorKind, ApiResult, AuthEvent, AuthEvents};
pub use guard::{AuthResolver, GuardOutcome, RoleGuard};
pub use logout::LogoutOutcome;
pub use routes::{Access, Route};
pub use session::{SessionSnapshot, SessionState, SessionStore};
