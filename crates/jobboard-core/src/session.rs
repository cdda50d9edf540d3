//! Session store: the single source of truth for who is logged in.
//!
//! The store is an explicit object shared as `Arc<SessionStore>`. State lives
//! in a `watch` channel, so every write is visible to all subscribers before
//! the writing call returns.
//!
//! ## Generations
//!
//! Every identity write (set or clear) bumps a generation counter. Code that
//! fetches an identity asynchronously takes a [`Ticket`] first and commits
//! with [`SessionStore::set_identity_if_current`]; if anything wrote the
//! identity in between (a logout, an interceptor clear), the late result is
//! discarded instead of resurrecting the session.

use jobboard_types::{Identity, IdentityPatch};
use tokio::sync::watch;
use tracing::debug;

/// Full store state.
///
/// `is_authenticated` is derived from the identity, so the two can never
/// disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<Identity>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            identity: self.identity.clone(),
            is_authenticated: self.is_authenticated(),
        }
    }
}

/// The `{ identity, isAuthenticated }` view handed to readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub is_authenticated: bool,
}

/// Generation observed before an identity fetch started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Creates an empty, unauthenticated store.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx }
    }

    /// Stores `identity`, marks the session authenticated and clears any error.
    pub fn set_identity(&self, identity: Identity) {
        self.tx.send_modify(|state| {
            debug!(user = %identity.id, role = %identity.role, "session.set");
            state.identity = Some(identity);
            state.error = None;
            state.generation += 1;
        });
    }

    /// Commits `identity` only if no identity write happened since `ticket`.
    ///
    /// Returns whether the identity was stored.
    pub fn set_identity_if_current(&self, ticket: Ticket, identity: Identity) -> bool {
        self.tx.send_if_modified(|state| {
            if state.generation != ticket.0 {
                debug!(
                    ticket = ticket.0,
                    current = state.generation,
                    "session.set discarded: stale identity fetch"
                );
                return false;
            }
            state.identity = Some(identity);
            state.error = None;
            state.generation += 1;
            true
        })
    }

    /// Removes the identity. Always applied, and always invalidates
    /// outstanding tickets.
    pub fn clear_identity(&self) {
        self.tx.send_modify(|state| {
            if state.identity.is_some() {
                debug!("session.clear");
            }
            state.identity = None;
            state.error = None;
            state.generation += 1;
        });
    }

    /// Updates display fields of the current identity, if any.
    pub fn patch_identity(&self, patch: &IdentityPatch) {
        self.tx.send_if_modified(|state| match state.identity.as_mut() {
            Some(identity) => {
                identity.apply(patch);
                true
            }
            None => false,
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.tx.send_if_modified(|state| {
            let changed = state.loading != loading;
            state.loading = loading;
            changed
        });
    }

    /// Records an error message and ends any loading state.
    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|state| {
            state.error = Some(message);
            state.loading = false;
        });
    }

    /// Returns a ticket for a fetch that is about to start.
    pub fn ticket(&self) -> Ticket {
        Ticket(self.tx.borrow().generation)
    }

    /// Returns a copy of the full state.
    pub fn read(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.tx.borrow().identity.clone()
    }

    /// Returns a receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
