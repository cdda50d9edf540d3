//! Admin endpoints: companies, recruiters and users.

use jobboard_types::{Company, CompanyDraft, RecruiterDraft, Record};
use serde_json::Value;
use tracing::debug;

use super::{Ack, records_at};
use crate::api::{ApiResult, CredentialedClient, Request};

pub async fn list_companies(client: &CredentialedClient) -> ApiResult<Vec<Company>> {
    let body: Value = client.send(Request::get("/companies")).await?;
    Ok(records_at(&body, "companies"))
}

pub async fn create_company(client: &CredentialedClient, draft: &CompanyDraft) -> ApiResult<Ack> {
    let body: Value = client.send(Request::post("/companies").json(draft)?).await?;
    Ok(Ack::from(body))
}

pub async fn update_company(
    client: &CredentialedClient,
    id: &str,
    draft: &CompanyDraft,
) -> ApiResult<Ack> {
    let body: Value = client
        .send(Request::put(format!("/companies/{id}")).json(draft)?)
        .await?;
    Ok(Ack::from(body))
}

pub async fn delete_company(client: &CredentialedClient, id: &str) -> ApiResult<Ack> {
    let body: Value = client
        .send(Request::delete(format!("/companies/{id}")))
        .await?;
    Ok(Ack::from(body))
}

pub async fn create_recruiter(client: &CredentialedClient, draft: &RecruiterDraft) -> ApiResult<Ack> {
    let body: Value = client
        .send(Request::post("/companies/recruiters").json(draft)?)
        .await?;
    Ok(Ack::from(body))
}

/// Lists recruiter accounts. Older servers lack this endpoint, so any failure
/// other than a rejected session reads as an empty list.
pub async fn list_recruiters(client: &CredentialedClient) -> ApiResult<Vec<Record>> {
    list_or_empty(client, "/companies/recruiters", "recruiters").await
}

/// Lists user accounts, with the same fallback as [`list_recruiters`].
pub async fn list_users(client: &CredentialedClient) -> ApiResult<Vec<Record>> {
    list_or_empty(client, "/users", "users").await
}

async fn list_or_empty(
    client: &CredentialedClient,
    path: &str,
    key: &str,
) -> ApiResult<Vec<Record>> {
    match client.send::<Value>(Request::get(path)).await {
        Ok(body) => Ok(records_at(&body, key)),
        Err(err) if err.is_auth_rejected() => Err(err),
        Err(err) => {
            debug!(path, error = %err, "listing unavailable, treating as empty");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jobboard_types::{Identity, Role};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::{ApiClients, AuthEvents};
    use crate::config::ApiConfig;
    use crate::session::SessionStore;

    fn clients(server: &MockServer) -> (ApiClients, AuthEvents, Arc<SessionStore>) {
        let store = Arc::new(SessionStore::new());
        let config = ApiConfig::with_base_url(server.uri());
        let (clients, events) = ApiClients::new(&config, Arc::clone(&store)).unwrap();
        (clients, events, store)
    }

    #[tokio::test]
    async fn test_missing_recruiters_endpoint_reads_as_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/companies/recruiters"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let (clients, _events, _store) = clients(&server);

        let recruiters = list_recruiters(&clients.credentialed).await.unwrap();

        assert!(recruiters.is_empty());
    }

    #[tokio::test]
    async fn test_list_users_propagates_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let (clients, mut events, store) = clients(&server);
        store.set_identity(Identity::new("a1", "Al", "al@example.com", Role::Admin));

        let err = list_users(&clients.credentialed).await.unwrap_err();

        assert!(err.is_auth_rejected());
        assert!(!store.is_authenticated());
        assert_eq!(events.drain().len(), 1);
    }

    #[tokio::test]
    async fn test_create_company_omits_blank_founded_year() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/companies"))
            .and(body_json(json!({
                "name": "Acme",
                "description": "",
                "website": "",
                "industry": "Tools",
                "location": "",
                "size": ""
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Created" })))
            .expect(1)
            .mount(&server)
            .await;
        let (clients, _events, _store) = clients(&server);

        let draft = CompanyDraft {
            name: "Acme".to_string(),
            industry: "Tools".to_string(),
            ..Default::default()
        };
        create_company(&clients.credentialed, &draft).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_companies_reads_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/companies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "companies": [{ "_id": "c1", "name": "Acme" }]
            })))
            .mount(&server)
            .await;
        let (clients, _events, _store) = clients(&server);

        let companies = list_companies(&clients.credentialed).await.unwrap();

        assert_eq!(companies[0].str_field("name"), Some("Acme"));
    }
}
