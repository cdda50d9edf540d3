use jobboard_core::services::companies;
use jobboard_types::{Company, Identity, RecruiterDraft, Record};

use super::ViewContext;
use crate::forms::CompanyForm;

/// Admin dashboard: companies and recruiter accounts.
#[derive(Debug)]
pub struct AdminDashboardView {
    pub identity: Identity,
    pub companies: Vec<Company>,
    pub recruiters: Vec<Record>,
    pub loading: bool,
}

impl AdminDashboardView {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            companies: Vec::new(),
            recruiters: Vec::new(),
            loading: false,
        }
    }

    /// Loads companies and recruiters together. Either failing leaves both
    /// lists untouched.
    pub async fn load(&mut self, cx: &mut ViewContext<'_>) {
        self.loading = true;
        let client = &cx.clients.credentialed;
        let (listed_companies, listed_recruiters) = tokio::join!(
            companies::list_companies(client),
            companies::list_recruiters(client)
        );
        match (listed_companies, listed_recruiters) {
            (Ok(companies), Ok(recruiters)) => {
                self.companies = companies;
                self.recruiters = recruiters;
            }
            (Err(err), _) | (_, Err(err)) => cx.report_load(&err, "Failed to fetch data."),
        }
        self.loading = false;
    }

    pub async fn create_company(&mut self, form: &CompanyForm, cx: &mut ViewContext<'_>) {
        match companies::create_company(&cx.clients.credentialed, &form.to_draft()).await {
            Ok(_) => {
                cx.toasts.success("Company created successfully!");
                self.load(cx).await;
            }
            Err(err) => cx.report(&err, "Failed to create company"),
        }
    }

    pub async fn update_company(
        &mut self,
        company_id: &str,
        form: &CompanyForm,
        cx: &mut ViewContext<'_>,
    ) {
        let draft = form.to_draft();
        match companies::update_company(&cx.clients.credentialed, company_id, &draft).await {
            Ok(_) => {
                cx.toasts.success("Company updated successfully!");
                self.load(cx).await;
            }
            Err(err) => cx.report(&err, "Failed to update company"),
        }
    }

    pub async fn delete_company(&mut self, company_id: &str, cx: &mut ViewContext<'_>) {
        match companies::delete_company(&cx.clients.credentialed, company_id).await {
            Ok(_) => {
                cx.toasts.success("Company deleted successfully!");
                self.load(cx).await;
            }
            Err(err) => cx.report(&err, "Failed to delete company"),
        }
    }

    pub async fn create_recruiter(&mut self, draft: &RecruiterDraft, cx: &mut ViewContext<'_>) {
        match companies::create_recruiter(&cx.clients.credentialed, draft).await {
            Ok(_) => {
                cx.toasts.success("Recruiter created successfully!");
                self.load(cx).await;
            }
            Err(err) => cx.report(&err, "Failed to create recruiter"),
        }
    }
}
