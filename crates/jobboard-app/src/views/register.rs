use jobboard_core::Route;
use jobboard_core::services::auth;
use jobboard_types::RegisterRequest;

use super::ViewContext;
use crate::effects::AppEffect;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Default)]
pub struct RegisterView {
    pub submitting: bool,
}

impl RegisterView {
    /// Creates the account and moves on to the login page.
    pub async fn register(
        &mut self,
        request: RegisterRequest,
        cx: &mut ViewContext<'_>,
    ) -> Vec<AppEffect> {
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            cx.toasts
                .error("Password must be at least 6 characters long");
            return Vec::new();
        }

        self.submitting = true;
        let result = auth::register(&cx.clients.public, &request).await;
        self.submitting = false;

        match result {
            Ok(ack) => {
                cx.toasts.success(
                    ack.message
                        .unwrap_or_else(|| "Registration successful".to_string()),
                );
                vec![AppEffect::Navigate(Route::Login)]
            }
            Err(err) => {
                cx.toasts.error(err.user_message("Registration failed"));
                Vec::new()
            }
        }
    }
}
