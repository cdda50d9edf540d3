//! Client runtime.
//!
//! [`App`] owns the session store, both API adapters, the history stack and
//! the mounted view. Every navigation goes through the target route's guard
//! before the view is built, and only then does the view fetch its data.
//!
//! The app is also the single listener for auth-invalidated events. After
//! each navigation step or action it drains them and, unless the user is
//! already on the login or register page, replaces the current location with
//! `/login`.

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result;
use jobboard_core::config::Config;
use jobboard_core::guard::{AuthResolver, GuardOutcome, RoleGuard};
use jobboard_core::{Access, ApiClients, AuthEvent, AuthEvents, Route, SessionStore, logout};
use jobboard_types::{ApplicationStatus, Identity, LoginRequest, RecruiterDraft, RegisterRequest};
use tracing::{debug, info, warn};

use crate::effects::AppEffect;
use crate::forms::{CompanyForm, JobForm};
use crate::navigator::{NavMode, Navigator};
use crate::toast::{Toast, Toasts};
use crate::views::{HomeFilters, HomeView, View, ViewContext};

/// Guard redirects followed for a single navigation.
const MAX_REDIRECTS: usize = 8;
/// Navigation steps executed for a single call into the app.
const MAX_STEPS: usize = 16;

/// User intents handled by the mounted view.
#[derive(Debug, Clone)]
pub enum Action {
    Search(HomeFilters),
    NextPage,
    PrevPage,
    OpenJob(String),
    StartApplication,
    SubmitApplication { cover_letter: String },
    Register(RegisterRequest),
    Login(LoginRequest),
    CreateJob(JobForm),
    UpdateJob { job_id: String, form: JobForm },
    DeleteJob { job_id: String },
    ShowApplications { job_id: String },
    UpdateApplicationStatus { application_id: String, status: ApplicationStatus },
    CreateCompany(CompanyForm),
    UpdateCompany { company_id: String, form: CompanyForm },
    DeleteCompany { company_id: String },
    CreateRecruiter(RecruiterDraft),
    Logout,
}

/// Result of running a route's entry check.
enum Entry {
    Open(Option<Identity>),
    Redirect(Route),
}

impl From<GuardOutcome> for Entry {
    fn from(outcome: GuardOutcome) -> Self {
        match outcome {
            GuardOutcome::Resolved(identity) => Entry::Open(Some(identity)),
            GuardOutcome::Redirect(route) => Entry::Redirect(route),
        }
    }
}

pub struct App {
    config: Config,
    store: Arc<SessionStore>,
    clients: ApiClients,
    events: AuthEvents,
    navigator: Navigator,
    toasts: Toasts,
    view: View,
}

impl App {
    /// Builds the runtime with an empty session. Nothing is mounted until the
    /// first [`navigate`](Self::navigate).
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(SessionStore::new());
        let (clients, events) = ApiClients::new(&config.api, Arc::clone(&store))?;
        Ok(Self {
            config,
            store,
            clients,
            events,
            navigator: Navigator::new(),
            toasts: Toasts::default(),
            view: View::Blank,
        })
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn location(&self) -> Option<&Route> {
        self.navigator.current()
    }

    pub fn history(&self) -> &[Route] {
        self.navigator.entries()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    /// Navigates to `location`, pushing a history entry.
    pub async fn navigate(&mut self, location: &str) {
        self.run(vec![AppEffect::Navigate(Route::parse(location))])
            .await;
    }

    /// Goes back one entry, re-running that route's guard.
    ///
    /// Returns false when there is no earlier entry.
    pub async fn back(&mut self) -> bool {
        let Some(previous) = self.navigator.back() else {
            return false;
        };
        self.run(vec![AppEffect::Replace(previous)]).await;
        true
    }

    /// Ends the session and lands on `/login` without a way back.
    pub async fn logout(&mut self) {
        let outcome = logout::logout(&self.clients.credentialed).await;
        let effect = if outcome.replace {
            AppEffect::Replace(outcome.redirect)
        } else {
            AppEffect::Navigate(outcome.redirect)
        };
        self.run(vec![effect]).await;
    }

    /// Hands `action` to the mounted view and executes whatever it returns.
    pub async fn dispatch(&mut self, action: Action) {
        if matches!(action, Action::Logout) {
            self.logout().await;
            return;
        }

        let mut cx = ViewContext {
            clients: &self.clients,
            store: &self.store,
            toasts: &mut self.toasts,
        };

        let effects = match (&mut self.view, action) {
            (View::Home(view), Action::Search(filters)) => {
                view.search(filters, &mut cx).await;
                Vec::new()
            }
            (View::Home(view), Action::NextPage) => {
                view.next_page(&mut cx).await;
                Vec::new()
            }
            (View::Home(view), Action::PrevPage) => {
                view.prev_page(&mut cx).await;
                Vec::new()
            }
            (View::Home(_), Action::OpenJob(job_id)) => vec![HomeView::open_job(&job_id)],
            (View::JobDetails(view), Action::StartApplication) => view.start_application(&mut cx),
            (View::JobDetails(view), Action::SubmitApplication { cover_letter }) => {
                view.submit_application(&cover_letter, &mut cx).await
            }
            (View::Register(view), Action::Register(request)) => {
                view.register(request, &mut cx).await
            }
            (View::Login(view), Action::Login(request)) => view.login(request, &mut cx).await,
            (View::RecruiterDashboard(view), Action::CreateJob(form)) => {
                view.create_job(&form, &mut cx).await;
                Vec::new()
            }
            (View::RecruiterDashboard(view), Action::UpdateJob { job_id, form }) => {
                view.update_job(&job_id, &form, &mut cx).await;
                Vec::new()
            }
            (View::RecruiterDashboard(view), Action::DeleteJob { job_id }) => {
                view.delete_job(&job_id, &mut cx).await;
                Vec::new()
            }
            (View::RecruiterDashboard(view), Action::ShowApplications { job_id }) => {
                view.show_applications(&job_id, &mut cx).await;
                Vec::new()
            }
            (
                View::RecruiterDashboard(view),
                Action::UpdateApplicationStatus {
                    application_id,
                    status,
                },
            ) => {
                view.update_application_status(&application_id, status, &mut cx)
                    .await;
                Vec::new()
            }
            (View::AdminDashboard(view), Action::CreateCompany(form)) => {
                view.create_company(&form, &mut cx).await;
                Vec::new()
            }
            (View::AdminDashboard(view), Action::UpdateCompany { company_id, form }) => {
                view.update_company(&company_id, &form, &mut cx).await;
                Vec::new()
            }
            (View::AdminDashboard(view), Action::DeleteCompany { company_id }) => {
                view.delete_company(&company_id, &mut cx).await;
                Vec::new()
            }
            (View::AdminDashboard(view), Action::CreateRecruiter(draft)) => {
                view.create_recruiter(&draft, &mut cx).await;
                Vec::new()
            }
            (view, _) => {
                warn!(view = view.name(), "action not available on this page");
                Vec::new()
            }
        };

        self.run(effects).await;
    }

    /// Executes navigation effects until none are left.
    async fn run(&mut self, effects: Vec<AppEffect>) {
        let mut pending: VecDeque<AppEffect> = effects.into();
        self.preempt_on_invalidation(&mut pending);

        let mut steps = 0;
        while let Some(effect) = pending.pop_front() {
            steps += 1;
            if steps > MAX_STEPS {
                warn!(remaining = pending.len() + 1, "navigation loop cut short");
                break;
            }

            let more = match effect {
                AppEffect::Navigate(route) => self.enter(route, NavMode::Push).await,
                AppEffect::Replace(route) => self.enter(route, NavMode::Replace).await,
            };
            pending.extend(more);
            self.preempt_on_invalidation(&mut pending);
        }
    }

    /// Drains auth-invalidated events. Any event drops queued navigation in
    /// favour of `/login`, unless the user already sits on an auth page.
    fn preempt_on_invalidation(&mut self, pending: &mut VecDeque<AppEffect>) {
        let events = self.events.drain();
        let Some(AuthEvent::Invalidated { status, endpoint }) = events.last() else {
            return;
        };

        let on_auth_page = self.navigator.current().is_some_and(Route::is_auth_entry);
        let heading_to_auth_page = pending.back().is_some_and(|effect| match effect {
            AppEffect::Navigate(route) | AppEffect::Replace(route) => route.is_auth_entry(),
        });
        if on_auth_page || heading_to_auth_page {
            debug!(status = *status, %endpoint, "session invalidated on an auth page, staying put");
            return;
        }

        info!(status = *status, %endpoint, "session invalidated, redirecting to login");
        pending.clear();
        pending.push_back(AppEffect::Replace(Route::Login));
    }

    /// Runs the guard chain for `route`, then mounts and loads the view.
    async fn enter(&mut self, route: Route, mode: NavMode) -> Vec<AppEffect> {
        let mut target = route;
        let mut identity = None;

        for hop in 0..=MAX_REDIRECTS {
            match self.check(&target).await {
                Entry::Open(resolved) => {
                    identity = resolved;
                    break;
                }
                Entry::Redirect(next) if hop < MAX_REDIRECTS => {
                    debug!(from = %target, to = %next, "guard redirect");
                    target = next;
                }
                Entry::Redirect(next) => {
                    warn!(from = %target, to = %next, "too many guard redirects");
                    target = Route::Login;
                }
            }
        }

        self.navigator.commit(target.clone(), mode);
        self.view = View::mount(&target, identity, &self.config);
        debug!(route = %target, view = self.view.name(), "mounted");

        let mut cx = ViewContext {
            clients: &self.clients,
            store: &self.store,
            toasts: &mut self.toasts,
        };
        self.view.load(&mut cx).await
    }

    async fn check(&self, route: &Route) -> Entry {
        let client = self.clients.credentialed.clone();
        match route.access() {
            Access::Public => Entry::Open(self.store.identity()),
            Access::Authenticated => AuthResolver::new(client).resolve().await.into(),
            Access::Role(role) => RoleGuard::new(client, role).check().await.into(),
        }
    }
}
