//! HTTP adapters for the job board API.
//!
//! - [`PublicClient`]: no credentials, for anonymous reads and registration.
//! - [`CredentialedClient`]: carries the session cookie and intercepts
//!   401/403 responses (clears the session store, emits an [`AuthEvent`]).
//!
//! Both share one base URL and one request timeout.

mod client;
mod error;
mod events;

pub use client::{ApiClients, CredentialedClient, PublicClient, Request, USER_AGENT};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use events::{AuthEvent, AuthEvents};
