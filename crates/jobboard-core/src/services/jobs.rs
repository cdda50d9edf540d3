//! `/jobs` endpoints.

use jobboard_types::{Application, Job, JobDraft, JobFilters, Record};
use serde_json::Value;

use super::{Ack, records_at};
use crate::api::{ApiError, ApiResult, CredentialedClient, PublicClient, Request};

/// One page of the public listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    /// Never below 1, even when the server omits it or reports 0.
    pub total_pages: u32,
}

impl From<Value> for JobPage {
    fn from(body: Value) -> Self {
        let total_pages = body
            .get("totalPages")
            .and_then(Value::as_u64)
            .and_then(|pages| u32::try_from(pages).ok())
            .unwrap_or(1)
            .max(1);
        Self {
            jobs: records_at(&body, "jobs"),
            total_pages,
        }
    }
}

/// Lists jobs matching `filters`. Blank filters are left out of the query.
pub async fn list_jobs(client: &PublicClient, filters: &JobFilters) -> ApiResult<JobPage> {
    let body: Value = client
        .send(Request::get("/jobs").query(filters.to_query()))
        .await?;
    Ok(JobPage::from(body))
}

/// Fetches a single job. A reply without a `job` object is a parse error.
pub async fn get_job(client: &PublicClient, id: &str) -> ApiResult<Job> {
    let mut body: Value = client.send(Request::get(format!("/jobs/{id}"))).await?;
    match body.get_mut("job").map(Value::take) {
        Some(job @ Value::Object(_)) => Ok(Record(job)),
        _ => Err(ApiError::parse(format!("Job {id} missing from response"))),
    }
}

pub async fn create_job(client: &CredentialedClient, draft: &JobDraft) -> ApiResult<Ack> {
    let body: Value = client.send(Request::post("/jobs").json(draft)?).await?;
    Ok(Ack::from(body))
}

pub async fn update_job(client: &CredentialedClient, id: &str, draft: &JobDraft) -> ApiResult<Ack> {
    let body: Value = client
        .send(Request::put(format!("/jobs/{id}")).json(draft)?)
        .await?;
    Ok(Ack::from(body))
}

pub async fn delete_job(client: &CredentialedClient, id: &str) -> ApiResult<Ack> {
    let body: Value = client.send(Request::delete(format!("/jobs/{id}"))).await?;
    Ok(Ack::from(body))
}

/// Postings owned by the signed-in recruiter.
pub async fn my_jobs(client: &CredentialedClient) -> ApiResult<Vec<Job>> {
    let body: Value = client.send(Request::get("/jobs/recruiter/jobs")).await?;
    Ok(records_at(&body, "jobs"))
}

/// Applications received for one of the recruiter's postings.
pub async fn job_applications(
    client: &CredentialedClient,
    job_id: &str,
) -> ApiResult<Vec<Application>> {
    let body: Value = client
        .send(Request::get(format!(
            "/jobs/recruiter/jobs/{job_id}/applications"
        )))
        .await?;
    Ok(records_at(&body, "applications"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::{ApiClients, ApiErrorKind};
    use crate::config::ApiConfig;
    use crate::session::SessionStore;

    fn clients(server: &MockServer) -> ApiClients {
        let config = ApiConfig::with_base_url(server.uri());
        ApiClients::new(&config, Arc::new(SessionStore::new())).unwrap().0
    }

    #[tokio::test]
    async fn test_list_jobs_omits_blank_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("search", "rust"))
            .and(query_param("jobType", "Full-time"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "12"))
            .and(query_param_is_missing("location"))
            .and(query_param_is_missing("experienceLevel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobs": [{ "_id": "j1", "title": "Rust Dev" }],
                "totalPages": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filters = JobFilters {
            search: Some("rust".to_string()),
            location: Some("  ".to_string()),
            job_type: Some("Full-time".to_string()),
            experience_level: None,
            page: Some(2),
            limit: Some(12),
        };
        let page = list_jobs(&clients(&server).public, &filters).await.unwrap();

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.jobs[0].str_field("title"), Some("Rust Dev"));
    }

    #[tokio::test]
    async fn test_list_jobs_defaults_total_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jobs": [] })))
            .mount(&server)
            .await;

        let page = list_jobs(&clients(&server).public, &JobFilters::default())
            .await
            .unwrap();

        assert!(page.jobs.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_get_job_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs/j1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "job": { "_id": "j1", "title": "Rust Dev" } })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/jobs/j2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;
        let clients = clients(&server);

        let job = get_job(&clients.public, "j1").await.unwrap();
        assert_eq!(job.id(), Some("j1"));

        let err = get_job(&clients.public, "j2").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_create_job_sends_camel_case_draft() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jobs"))
            .and(body_json(json!({
                "title": "Rust Dev",
                "description": "Build things",
                "requirements": "Rust",
                "location": "Remote",
                "jobType": "Full-time",
                "experienceLevel": "Senior",
                "skills": ["rust", "tokio"]
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "message": "Job created" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let draft = JobDraft {
            title: "Rust Dev".to_string(),
            description: "Build things".to_string(),
            requirements: "Rust".to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            experience_level: "Senior".to_string(),
            skills: JobDraft::parse_skills("rust, tokio, "),
            ..Default::default()
        };
        let ack = create_job(&clients(&server).credentialed, &draft).await.unwrap();

        assert_eq!(ack.message.as_deref(), Some("Job created"));
    }

    #[tokio::test]
    async fn test_job_applications_reads_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs/recruiter/jobs/j1/applications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "applications": [{ "_id": "a1", "job": { "_id": "j1" }, "status": "pending" }]
            })))
            .mount(&server)
            .await;

        let apps = job_applications(&clients(&server).credentialed, "j1")
            .await
            .unwrap();

        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].nested_id("job"), Some("j1"));
    }
}
