//! Route-entry checks.
//!
//! Guards run before a protected view mounts. They fetch the identity behind
//! the session cookie, write it into the session store and hand the routing
//! layer a [`GuardOutcome`]. Failures never reach the user as errors: the
//! outcome is simply a redirect to the login page.
//!
//! A role mismatch is corrective navigation, not an error. The identity is
//! still stored and the user is bounced to their own dashboard.

use jobboard_types::{Identity, Role};
use tracing::{debug, warn};

use crate::api::CredentialedClient;
use crate::routes::Route;
use crate::services::auth;

/// What the routing layer should do after a guard ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Mount the view with this identity; no second fetch needed.
    Resolved(Identity),
    Redirect(Route),
}

impl GuardOutcome {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            GuardOutcome::Resolved(identity) => Some(identity),
            GuardOutcome::Redirect(_) => None,
        }
    }
}

/// Decides whether `identity` may enter a route requiring `required`.
pub fn decide(required: &Role, identity: &Identity) -> GuardOutcome {
    if identity.role == *required {
        GuardOutcome::Resolved(identity.clone())
    } else {
        GuardOutcome::Redirect(Route::dashboard_for(&identity.role))
    }
}

/// Resolves the current identity for routes open to any signed-in role.
#[derive(Debug, Clone)]
pub struct AuthResolver {
    client: CredentialedClient,
}

impl AuthResolver {
    pub fn new(client: CredentialedClient) -> Self {
        Self { client }
    }

    pub async fn resolve(&self) -> GuardOutcome {
        let store = self.client.store();
        let ticket = store.ticket();
        store.set_loading(true);

        match auth::get_me(&self.client).await {
            Ok(identity) => {
                store.set_loading(false);
                if store.set_identity_if_current(ticket, identity.clone()) {
                    return GuardOutcome::Resolved(identity);
                }
                // Something wrote the session while we were waiting. Whatever
                // it left behind is newer than our answer.
                match store.identity() {
                    Some(current) => {
                        debug!(user = %current.id, "guard using newer session identity");
                        GuardOutcome::Resolved(current)
                    }
                    None => GuardOutcome::Redirect(Route::Login),
                }
            }
            Err(err) => {
                warn!(kind = %err.kind, error = %err, "identity resolution failed");
                store.set_loading(false);
                store.clear_identity();
                GuardOutcome::Redirect(Route::Login)
            }
        }
    }
}

/// [`AuthResolver`] plus a required role.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    resolver: AuthResolver,
    required: Role,
}

impl RoleGuard {
    pub fn new(client: CredentialedClient, required: Role) -> Self {
        Self {
            resolver: AuthResolver::new(client),
            required,
        }
    }

    pub fn required(&self) -> &Role {
        &self.required
    }

    pub async fn check(&self) -> GuardOutcome {
        match self.resolver.resolve().await {
            GuardOutcome::Resolved(identity) => {
                let outcome = decide(&self.required, &identity);
                if let GuardOutcome::Redirect(target) = &outcome {
                    debug!(
                        role = %identity.role,
                        required = %self.required,
                        %target,
                        "role mismatch, redirecting"
                    );
                }
                outcome
            }
            redirect @ GuardOutcome::Redirect(_) => redirect,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::{ApiClients, AuthEvents};
    use crate::config::ApiConfig;
    use crate::session::SessionStore;

    const ROLES: [Role; 3] = [Role::User, Role::Recruiter, Role::Admin];

    fn identity(role: Role) -> Identity {
        Identity::new("id1", "Sam", "sam@example.com", role)
    }

    fn setup(server: &MockServer) -> (ApiClients, AuthEvents, Arc<SessionStore>) {
        let store = Arc::new(SessionStore::new());
        let config = ApiConfig::with_base_url(server.uri());
        let (clients, events) = ApiClients::new(&config, Arc::clone(&store)).unwrap();
        (clients, events, store)
    }

    async fn serve_me(server: &MockServer, role: &str) {
        Mock::given(method("GET"))
            .and(path("/auth/getMe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "id1",
                "name": "Sam",
                "email": "sam@example.com",
                "role": role
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_decide_matches_role_or_redirects_to_own_dashboard() {
        for required in &ROLES {
            for actual in ROLES {
                let who = identity(actual.clone());
                let outcome = decide(required, &who);
                if *required == actual {
                    assert_eq!(outcome, GuardOutcome::Resolved(who));
                } else {
                    assert_eq!(
                        outcome,
                        GuardOutcome::Redirect(Route::dashboard_for(&actual))
                    );
                }
            }
        }
    }

    #[test]
    fn test_decide_unknown_role_goes_to_login() {
        let who = identity(Role::Other("owner".to_string()));
        for required in &ROLES {
            assert_eq!(decide(required, &who), GuardOutcome::Redirect(Route::Login));
        }
    }

    #[tokio::test]
    async fn test_recruiter_on_admin_route_is_bounced_and_stored() {
        let server = MockServer::start().await;
        serve_me(&server, "recruiter").await;
        let (clients, _events, store) = setup(&server);

        let outcome = RoleGuard::new(clients.credentialed, Role::Admin).check().await;

        assert_eq!(outcome, GuardOutcome::Redirect(Route::RecruiterDashboard));
        assert_eq!(store.identity(), Some(identity(Role::Recruiter)));
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_matching_role_resolves() {
        let server = MockServer::start().await;
        serve_me(&server, "user").await;
        let (clients, _events, store) = setup(&server);

        let outcome = RoleGuard::new(clients.credentialed, Role::User).check().await;

        assert_eq!(outcome, GuardOutcome::Resolved(identity(Role::User)));
        assert!(!store.read().is_loading());
    }

    #[tokio::test]
    async fn test_rejected_session_redirects_to_login() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/getMe"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let (clients, _events, store) = setup(&server);
        store.set_identity(identity(Role::User));

        let outcome = AuthResolver::new(clients.credentialed).resolve().await;

        assert_eq!(outcome, GuardOutcome::Redirect(Route::Login));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_server_error_redirects_to_login() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/getMe"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let (clients, mut events, store) = setup(&server);
        store.set_identity(identity(Role::Admin));

        let outcome = RoleGuard::new(clients.credentialed, Role::Admin).check().await;

        assert_eq!(outcome, GuardOutcome::Redirect(Route::Login));
        assert!(!store.is_authenticated());
        // Only 401/403 go through the interceptor.
        assert!(events.drain().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_identity_redirects_to_login() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/getMe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;
        let (clients, _events, store) = setup(&server);

        let outcome = AuthResolver::new(clients.credentialed).resolve().await;

        assert_eq!(outcome, GuardOutcome::Redirect(Route::Login));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_late_identity_after_logout_does_not_resurrect_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/getMe"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "_id": "id1",
                        "name": "Sam",
                        "email": "sam@example.com",
                        "role": "user"
                    }))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        let (clients, _events, store) = setup(&server);
        let guard = RoleGuard::new(clients.credentialed, Role::User);

        let check = tokio::spawn(async move { guard.check().await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        store.clear_identity();

        let outcome = check.await.unwrap();
        assert_eq!(outcome, GuardOutcome::Redirect(Route::Login));
        assert!(!store.is_authenticated());
    }
}
