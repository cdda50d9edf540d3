//! Logout flow.

use tracing::{info, warn};

use crate::api::CredentialedClient;
use crate::routes::Route;
use crate::services::auth;

/// Where to go after logging out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub redirect: Route,
    /// The history entry must be replaced so back cannot return to an
    /// authenticated page.
    pub replace: bool,
    /// Whether the server acknowledged the logout.
    pub server_confirmed: bool,
}

/// Tells the server to end the session, then clears local state no matter
/// what the server said.
pub async fn logout(client: &CredentialedClient) -> LogoutOutcome {
    let server_confirmed = match auth::logout(client).await {
        Ok(_) => true,
        Err(err) => {
            warn!(kind = %err.kind, error = %err, "server logout failed, clearing locally");
            false
        }
    };

    client.store().clear_identity();
    info!(server_confirmed, "logged out");

    LogoutOutcome {
        redirect: Route::Login,
        replace: true,
        server_confirmed,
    }
}
