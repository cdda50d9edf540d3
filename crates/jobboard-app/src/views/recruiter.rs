use jobboard_core::services::{applications, jobs};
use jobboard_types::{Application, ApplicationStatus, Identity, Job};

use super::ViewContext;
use crate::forms::JobForm;

/// Recruiter dashboard: own postings and their applicants.
#[derive(Debug)]
pub struct RecruiterDashboardView {
    pub identity: Identity,
    pub jobs: Vec<Job>,
    /// Job whose applicants are listed, if any.
    pub selected_job: Option<String>,
    pub applications: Vec<Application>,
    pub loading: bool,
}

impl RecruiterDashboardView {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            jobs: Vec::new(),
            selected_job: None,
            applications: Vec::new(),
            loading: false,
        }
    }

    /// Name of the company the recruiter belongs to, when populated.
    pub fn company_name(&self) -> Option<&str> {
        self.identity
            .assigned_company
            .as_ref()?
            .get("name")?
            .as_str()
    }

    pub async fn load(&mut self, cx: &mut ViewContext<'_>) {
        self.loading = true;
        match jobs::my_jobs(&cx.clients.credentialed).await {
            Ok(list) => self.jobs = list,
            Err(err) => cx.report_load(&err, "Failed to fetch jobs."),
        }
        self.loading = false;
    }

    /// Prefilled form for editing one of the listed jobs.
    pub fn edit_form(&self, job_id: &str) -> Option<JobForm> {
        self.jobs
            .iter()
            .find(|job| job.id() == Some(job_id))
            .map(JobForm::from_job)
    }

    pub async fn create_job(&mut self, form: &JobForm, cx: &mut ViewContext<'_>) {
        match jobs::create_job(&cx.clients.credentialed, &form.to_draft()).await {
            Ok(_) => {
                cx.toasts.success("Job created successfully!");
                self.load(cx).await;
            }
            Err(err) => cx.report(&err, "Failed to create job"),
        }
    }

    pub async fn update_job(&mut self, job_id: &str, form: &JobForm, cx: &mut ViewContext<'_>) {
        match jobs::update_job(&cx.clients.credentialed, job_id, &form.to_draft()).await {
            Ok(_) => {
                cx.toasts.success("Job updated successfully!");
                self.load(cx).await;
            }
            Err(err) => cx.report(&err, "Failed to update job"),
        }
    }

    pub async fn delete_job(&mut self, job_id: &str, cx: &mut ViewContext<'_>) {
        match jobs::delete_job(&cx.clients.credentialed, job_id).await {
            Ok(_) => {
                cx.toasts.success("Job deleted successfully!");
                self.load(cx).await;
            }
            Err(err) => cx.report(&err, "Failed to delete job"),
        }
    }

    pub async fn show_applications(&mut self, job_id: &str, cx: &mut ViewContext<'_>) {
        match jobs::job_applications(&cx.clients.credentialed, job_id).await {
            Ok(list) => {
                self.applications = list;
                self.selected_job = Some(job_id.to_string());
            }
            Err(err) => cx.report_load(&err, "Failed to fetch applications."),
        }
    }

    /// Changes an applicant's status, then refreshes the applicants of the
    /// job that application belongs to.
    pub async fn update_application_status(
        &mut self,
        application_id: &str,
        status: ApplicationStatus,
        cx: &mut ViewContext<'_>,
    ) {
        if let Err(err) =
            applications::update_status(&cx.clients.credentialed, application_id, status).await
        {
            cx.report(&err, "Failed to update status");
            return;
        }
        cx.toasts.success("Application status updated successfully!");

        let job_id = self
            .applications
            .iter()
            .find(|app| app.id() == Some(application_id))
            .and_then(|app| app.nested_id("job"))
            .map(str::to_string);
        if let Some(job_id) = job_id {
            self.show_applications(&job_id, cx).await;
        }
    }
}
