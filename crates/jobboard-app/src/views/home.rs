use jobboard_core::Route;
use jobboard_core::services::jobs;
use jobboard_types::{Job, JobFilters};

use super::ViewContext;
use crate::effects::AppEffect;

/// Search fields on the home page. Blank fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeFilters {
    pub search: String,
    pub location: String,
    pub job_type: String,
    pub experience_level: String,
}

/// Public job listing with search and paging.
#[derive(Debug)]
pub struct HomeView {
    pub filters: HomeFilters,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub jobs: Vec<Job>,
    pub loading: bool,
}

impl HomeView {
    pub fn new(page_size: u32) -> Self {
        Self {
            filters: HomeFilters::default(),
            page: 1,
            page_size,
            total_pages: 1,
            jobs: Vec::new(),
            loading: false,
        }
    }

    fn query(&self) -> JobFilters {
        let field = |value: &str| Some(value.to_string());
        JobFilters {
            search: field(&self.filters.search),
            location: field(&self.filters.location),
            job_type: field(&self.filters.job_type),
            experience_level: field(&self.filters.experience_level),
            page: Some(self.page),
            limit: Some(self.page_size),
        }
    }

    pub async fn fetch(&mut self, cx: &mut ViewContext<'_>) {
        self.loading = true;
        match jobs::list_jobs(&cx.clients.public, &self.query()).await {
            Ok(page) => {
                self.jobs = page.jobs;
                self.total_pages = page.total_pages;
            }
            Err(_) => cx.toasts.error("Failed to fetch jobs."),
        }
        self.loading = false;
    }

    /// Applies new filters and starts over from the first page.
    pub async fn search(&mut self, filters: HomeFilters, cx: &mut ViewContext<'_>) {
        self.filters = filters;
        self.page = 1;
        self.fetch(cx).await;
    }

    pub async fn next_page(&mut self, cx: &mut ViewContext<'_>) {
        if self.page < self.total_pages {
            self.page += 1;
            self.fetch(cx).await;
        }
    }

    pub async fn prev_page(&mut self, cx: &mut ViewContext<'_>) {
        if self.page > 1 {
            self.page -= 1;
            self.fetch(cx).await;
        }
    }

    pub fn open_job(id: &str) -> AppEffect {
        AppEffect::Navigate(Route::JobDetails(id.to_string()))
    }
}
