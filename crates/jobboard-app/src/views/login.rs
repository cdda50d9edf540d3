use jobboard_core::Route;
use jobboard_core::services::auth;
use jobboard_types::LoginRequest;
use tracing::info;

use super::ViewContext;
use crate::effects::AppEffect;

#[derive(Debug, Default)]
pub struct LoginView {
    pub submitting: bool,
}

impl LoginView {
    /// Signs in, stores the identity and heads to the matching dashboard.
    ///
    /// Errors are always shown here: this page is where a rejected session
    /// ends up, so nothing else will report them.
    pub async fn login(&mut self, request: LoginRequest, cx: &mut ViewContext<'_>) -> Vec<AppEffect> {
        self.submitting = true;
        let result = Self::sign_in(&request, cx).await;
        self.submitting = false;

        match result {
            Ok(role_home) => {
                cx.toasts.success("Login successful!");
                vec![AppEffect::Navigate(role_home)]
            }
            Err(message) => {
                cx.toasts.error(message);
                Vec::new()
            }
        }
    }

    async fn sign_in(request: &LoginRequest, cx: &ViewContext<'_>) -> Result<Route, String> {
        let client = &cx.clients.credentialed;
        auth::login(client, request)
            .await
            .map_err(|err| err.user_message("Login failed").to_string())?;

        let ticket = cx.store.ticket();
        let identity = auth::get_me(client)
            .await
            .map_err(|err| err.user_message("Login failed").to_string())?;
        info!(user = %identity.id, role = %identity.role, "signed in");

        let target = Route::dashboard_for(&identity.role);
        if !cx.store.set_identity_if_current(ticket, identity) {
            return Err("Login failed".to_string());
        }
        Ok(target)
    }
}
