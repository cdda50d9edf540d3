//! Page controllers.
//!
//! A view holds the state of one page and performs its API calls. Views are
//! mounted only after the route's guard resolved, and they never check roles
//! themselves: the guard already did.

mod admin;
mod home;
mod job_details;
mod login;
mod recruiter;
mod register;
mod user;

use jobboard_core::config::Config;
use jobboard_core::{ApiClients, ApiError, Route, SessionStore};
use jobboard_types::Identity;
use tracing::debug;

use crate::effects::AppEffect;
use crate::toast::Toasts;

pub use admin::AdminDashboardView;
pub use home::{HomeFilters, HomeView};
pub use job_details::JobDetailsView;
pub use login::LoginView;
pub use recruiter::RecruiterDashboardView;
pub use register::RegisterView;
pub use user::UserDashboardView;

/// What a view may touch while loading or handling an action.
pub struct ViewContext<'a> {
    pub clients: &'a ApiClients,
    pub store: &'a SessionStore,
    pub toasts: &'a mut Toasts,
}

impl ViewContext<'_> {
    /// Reports a failed credentialed action.
    ///
    /// Rejected sessions are left to the auth-invalidated listener, which
    /// navigates to login instead of showing an error.
    pub fn report(&mut self, err: &ApiError, default: &str) {
        if err.is_auth_rejected() {
            debug!(error = %err, "action rejected, session listener takes over");
            return;
        }
        self.toasts.error(err.user_message(default));
    }

    /// Reports a failed fetch with a fixed message.
    pub fn report_load(&mut self, err: &ApiError, message: &str) {
        if err.is_auth_rejected() {
            debug!(error = %err, "load rejected, session listener takes over");
            return;
        }
        self.toasts.error(message);
    }
}

/// The mounted page.
#[derive(Debug)]
pub enum View {
    /// Nothing mounted yet.
    Blank,
    Home(HomeView),
    JobDetails(JobDetailsView),
    Register(RegisterView),
    Login(LoginView),
    UserDashboard(UserDashboardView),
    RecruiterDashboard(RecruiterDashboardView),
    AdminDashboard(AdminDashboardView),
    NotFound(String),
}

impl View {
    /// Builds the controller for `route`.
    ///
    /// Dashboards receive the identity their guard resolved. If none is
    /// available the page cannot be shown and `NotFound` is mounted.
    pub fn mount(route: &Route, identity: Option<Identity>, config: &Config) -> Self {
        match (route, identity) {
            (Route::Home, _) => View::Home(HomeView::new(config.jobs.page_size)),
            (Route::JobDetails(id), _) => View::JobDetails(JobDetailsView::new(id.clone())),
            (Route::Register, _) => View::Register(RegisterView::default()),
            (Route::Login, _) => View::Login(LoginView::default()),
            (Route::UserDashboard, Some(identity)) => {
                View::UserDashboard(UserDashboardView::new(identity))
            }
            (Route::RecruiterDashboard, Some(identity)) => {
                View::RecruiterDashboard(RecruiterDashboardView::new(identity))
            }
            (Route::AdminDashboard, Some(identity)) => {
                View::AdminDashboard(AdminDashboardView::new(identity))
            }
            (route, _) => View::NotFound(route.path()),
        }
    }

    /// Runs the page's initial data fetch.
    pub async fn load(&mut self, cx: &mut ViewContext<'_>) -> Vec<AppEffect> {
        match self {
            View::Home(view) => {
                view.fetch(cx).await;
                Vec::new()
            }
            View::JobDetails(view) => view.load(cx).await,
            View::UserDashboard(view) => {
                view.load(cx).await;
                Vec::new()
            }
            View::RecruiterDashboard(view) => {
                view.load(cx).await;
                Vec::new()
            }
            View::AdminDashboard(view) => {
                view.load(cx).await;
                Vec::new()
            }
            View::Blank | View::Register(_) | View::Login(_) | View::NotFound(_) => Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Blank => "blank",
            View::Home(_) => "home",
            View::JobDetails(_) => "job_details",
            View::Register(_) => "register",
            View::Login(_) => "login",
            View::UserDashboard(_) => "user_dashboard",
            View::RecruiterDashboard(_) => "recruiter_dashboard",
            View::AdminDashboard(_) => "admin_dashboard",
            View::NotFound(_) => "not_found",
        }
    }
}
