//! `/applications` endpoints.

use jobboard_types::{Application, ApplicationRequest, ApplicationStatus, StatusUpdate};
use serde_json::Value;

use super::{Ack, records_at};
use crate::api::{ApiResult, CredentialedClient, Request};

/// Submits an application for `job_id` as the signed-in job seeker.
pub async fn apply(client: &CredentialedClient, job_id: &str, cover_letter: &str) -> ApiResult<Ack> {
    let request = ApplicationRequest {
        cover_letter: cover_letter.to_string(),
    };
    let body: Value = client
        .send(Request::post(format!("/applications/{job_id}/apply")).json(&request)?)
        .await?;
    Ok(Ack::from(body))
}

pub async fn update_status(
    client: &CredentialedClient,
    application_id: &str,
    status: ApplicationStatus,
) -> ApiResult<Ack> {
    let body: Value = client
        .send(
            Request::put(format!("/applications/{application_id}/status"))
                .json(&StatusUpdate { status })?,
        )
        .await?;
    Ok(Ack::from(body))
}

/// Applications submitted by the signed-in job seeker.
pub async fn my_applications(client: &CredentialedClient) -> ApiResult<Vec<Application>> {
    let body: Value = client.send(Request::get("/applications")).await?;
    Ok(records_at(&body, "applications"))
}
