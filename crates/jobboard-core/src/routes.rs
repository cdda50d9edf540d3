//! Client routes and their access requirements.

use std::fmt;

use jobboard_types::Role;

/// Every page the client can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    JobDetails(String),
    Register,
    Login,
    UserDashboard,
    RecruiterDashboard,
    AdminDashboard,
    NotFound(String),
}

/// Who may enter a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any signed-in role.
    Authenticated,
    /// Exactly this role.
    Role(Role),
}

impl Route {
    /// Parses a location path. Query strings, fragments and trailing slashes
    /// are ignored.
    pub fn parse(location: &str) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] | [""] => Route::Home,
            ["jobs" | "job", id] if !id.is_empty() => Route::JobDetails((*id).to_string()),
            ["register"] => Route::Register,
            ["login"] => Route::Login,
            ["dashboard"] => Route::UserDashboard,
            ["recruiter", "dashboard"] => Route::RecruiterDashboard,
            ["admin", "dashboard"] => Route::AdminDashboard,
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Canonical location of this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::JobDetails(id) => format!("/jobs/{id}"),
            Route::Register => "/register".to_string(),
            Route::Login => "/login".to_string(),
            Route::UserDashboard => "/dashboard".to_string(),
            Route::RecruiterDashboard => "/recruiter/dashboard".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::UserDashboard => Access::Role(Role::User),
            Route::RecruiterDashboard => Access::Role(Role::Recruiter),
            Route::AdminDashboard => Access::Role(Role::Admin),
            Route::Home
            | Route::JobDetails(_)
            | Route::Register
            | Route::Login
            | Route::NotFound(_) => Access::Public,
        }
    }

    /// The dashboard a role belongs on. Unrecognized roles go to login.
    pub fn dashboard_for(role: &Role) -> Self {
        match role {
            Role::User => Route::UserDashboard,
            Role::Recruiter => Route::RecruiterDashboard,
            Role::Admin => Route::AdminDashboard,
            Role::Other(_) => Route::Login,
        }
    }

    /// Pages that stay reachable while the session is being rejected.
    pub fn is_auth_entry(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
