//! Auth-invalidated notifications.
//!
//! The credentialed adapter never navigates. It reports rejected sessions on
//! this channel and a single top-level listener decides what to do.

use tokio::sync::mpsc;

/// Signal emitted by the credentialed adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A credentialed call came back 401/403. The session store has already
    /// been cleared when this is observed.
    Invalidated { status: u16, endpoint: String },
}

/// Receiving half held by the listener that owns navigation.
#[derive(Debug)]
pub struct AuthEvents {
    rx: mpsc::UnboundedReceiver<AuthEvent>,
}

impl AuthEvents {
    /// Returns the next pending event without waiting.
    pub fn try_next(&mut self) -> Option<AuthEvent> {
        self.rx.try_recv().ok()
    }

    /// Takes every pending event.
    pub fn drain(&mut self) -> Vec<AuthEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

pub(crate) fn channel() -> (mpsc::UnboundedSender<AuthEvent>, AuthEvents) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, AuthEvents { rx })
}
