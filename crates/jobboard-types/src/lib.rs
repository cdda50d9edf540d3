//! Shared data types for the job board client.
//!
//! Identity and role types are strongly typed since routing decisions depend
//! on them. Job, company and application records are opaque JSON payloads
//! that the client passes through to views unmodified.

pub mod identity;
pub mod records;
pub mod requests;

pub use identity::{Identity, IdentityPatch, Role};
pub use records::{Application, Company, Job, Record};
pub use requests::{
    ApplicationRequest, ApplicationStatus, CompanyDraft, JobDraft, JobFilters, LoginRequest,
    RecruiterDraft, RegisterRequest, StatusUpdate,
};
