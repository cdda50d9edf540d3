use jobboard_core::Route;
use jobboard_core::services::{applications, jobs};
use jobboard_types::{Job, Role};

use super::ViewContext;
use crate::effects::AppEffect;

/// One posting, plus the apply form.
#[derive(Debug)]
pub struct JobDetailsView {
    pub job_id: String,
    pub job: Option<Job>,
    pub show_application_form: bool,
    pub applying: bool,
}

impl JobDetailsView {
    pub fn new(job_id: String) -> Self {
        Self {
            job_id,
            job: None,
            show_application_form: false,
            applying: false,
        }
    }

    /// Fetches the posting. A missing job sends the user back home.
    pub async fn load(&mut self, cx: &mut ViewContext<'_>) -> Vec<AppEffect> {
        match jobs::get_job(&cx.clients.public, &self.job_id).await {
            Ok(job) => {
                self.job = Some(job);
                Vec::new()
            }
            Err(_) => {
                cx.toasts.error("Failed to fetch job details.");
                vec![AppEffect::Navigate(Route::Home)]
            }
        }
    }

    /// Opens the apply form if the visitor is a signed-in job seeker.
    pub fn start_application(&mut self, cx: &mut ViewContext<'_>) -> Vec<AppEffect> {
        match cx.store.identity() {
            None => {
                cx.toasts.info("Please login to apply for jobs.");
                vec![AppEffect::Navigate(Route::Login)]
            }
            Some(identity) if identity.role != Role::User => {
                cx.toasts.error("Only job seekers can apply for jobs.");
                Vec::new()
            }
            Some(_) => {
                self.show_application_form = true;
                Vec::new()
            }
        }
    }

    pub async fn submit_application(
        &mut self,
        cover_letter: &str,
        cx: &mut ViewContext<'_>,
    ) -> Vec<AppEffect> {
        self.applying = true;
        let result = applications::apply(&cx.clients.credentialed, &self.job_id, cover_letter).await;
        self.applying = false;

        match result {
            Ok(_) => {
                cx.toasts.success("Application submitted successfully!");
                self.show_application_form = false;
                self.load(cx).await
            }
            Err(err) => {
                cx.report(&err, "Failed to submit application");
                Vec::new()
            }
        }
    }
}
