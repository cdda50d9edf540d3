use jobboard_core::services::applications;
use jobboard_types::{Application, Identity};

use super::ViewContext;

/// Job seeker dashboard: the user's own applications.
#[derive(Debug)]
pub struct UserDashboardView {
    pub identity: Identity,
    pub applications: Vec<Application>,
    pub loading: bool,
}

impl UserDashboardView {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            applications: Vec::new(),
            loading: false,
        }
    }

    pub async fn load(&mut self, cx: &mut ViewContext<'_>) {
        self.loading = true;
        match applications::my_applications(&cx.clients.credentialed).await {
            Ok(list) => self.applications = list,
            Err(err) => cx.report_load(&err, "Failed to fetch applications."),
        }
        self.loading = false;
    }
}
