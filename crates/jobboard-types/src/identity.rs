//! The authenticated principal and its role.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account role as reported by the server.
///
/// Unknown role strings are kept verbatim in `Other` so routing can treat
/// them explicitly instead of failing to decode the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Job seeker.
    User,
    Recruiter,
    Admin,
    Other(String),
}

impl Role {
    /// Returns the wire identifier for this role.
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Recruiter => "recruiter",
            Role::Admin => "admin",
            Role::Other(other) => other.as_str(),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Role::User,
            "recruiter" => Role::Recruiter,
            "admin" => Role::Admin,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logged-in user, fetched fresh from `/auth/getMe` on each protected
/// navigation and replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawIdentity")]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Company a recruiter is attached to (opaque, display only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_company: Option<Value>,
}

/// Wire form of [`Identity`]. Mongo documents carry `_id`, and serializers
/// with virtuals enabled send `id` as well.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIdentity {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    name: String,
    email: String,
    role: Role,
    #[serde(default)]
    assigned_company: Option<Value>,
}

impl TryFrom<RawIdentity> for Identity {
    type Error = String;

    fn try_from(raw: RawIdentity) -> Result<Self, Self::Error> {
        let id = raw
            .mongo_id
            .or(raw.id)
            .ok_or_else(|| "identity has neither `_id` nor `id`".to_string())?;
        Ok(Self {
            id,
            name: raw.name,
            email: raw.email,
            role: raw.role,
            assigned_company: raw.assigned_company,
        })
    }
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<Role>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
            assigned_company: None,
        }
    }

    /// Applies a display-only patch. Identity and role never change this way.
    pub fn apply(&mut self, patch: &IdentityPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
    }
}

/// Display fields that may be updated in place on the current identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}
