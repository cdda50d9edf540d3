//! `/auth` endpoints.

use jobboard_types::{Identity, LoginRequest, RegisterRequest};
use serde::Deserialize;
use serde_json::Value;

use super::Ack;
use crate::api::{ApiResult, CredentialedClient, PublicClient, Request};

/// `/auth/getMe` answers either with the identity itself or wrapped in
/// `{ "user": ... }` depending on the server version.
#[derive(Deserialize)]
#[serde(untagged)]
enum MeResponse {
    Wrapped { user: Identity },
    Bare(Identity),
}

impl From<MeResponse> for Identity {
    fn from(response: MeResponse) -> Self {
        match response {
            MeResponse::Wrapped { user } | MeResponse::Bare(user) => user,
        }
    }
}

/// Creates an account. Anonymous.
pub async fn register(client: &PublicClient, request: &RegisterRequest) -> ApiResult<Ack> {
    let body: Value = client
        .send(Request::post("/auth/register").json(request)?)
        .await?;
    Ok(Ack::from(body))
}

/// Establishes a session. The cookie lands in the credentialed client's jar.
pub async fn login(client: &CredentialedClient, request: &LoginRequest) -> ApiResult<Ack> {
    let body: Value = client
        .send(Request::post("/auth/login").json(request)?)
        .await?;
    Ok(Ack::from(body))
}

/// Fetches the identity behind the current session cookie.
pub async fn get_me(client: &CredentialedClient) -> ApiResult<Identity> {
    let response: MeResponse = client.send(Request::get("/auth/getMe")).await?;
    Ok(response.into())
}

pub async fn logout(client: &CredentialedClient) -> ApiResult<Ack> {
    let body: Value = client.send(Request::post("/auth/logout")).await?;
    Ok(Ack::from(body))
}
