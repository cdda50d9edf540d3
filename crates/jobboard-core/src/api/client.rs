use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use super::events::{self, AuthEvent, AuthEvents};
use crate::config::ApiConfig;
use crate::session::SessionStore;

/// Standard User-Agent header for API requests.
pub const USER_AGENT: &str = concat!("jobboard/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Request description
// ============================================================================

/// One API call: method, path relative to the base URL, query and JSON body.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl Request {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn query(mut self, pairs: Vec<(&'static str, String)>) -> Self {
        self.query = pairs;
        self
    }

    /// Attaches a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::parse(format!("Failed to encode request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

// ============================================================================
// Shared transport
// ============================================================================

#[derive(Debug, Clone)]
struct Transport {
    http: reqwest::Client,
    base_url: String,
}

impl Transport {
    fn build(config: &ApiConfig, with_cookies: bool) -> Result<Self> {
        let base_url = config.effective_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout())
            .cookie_store(with_cookies)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    async fn send<T: DeserializeOwned>(&self, request: &Request) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, %url, "api.request");

        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        // Reading the body can still time out; that is a network failure too.
        let text = response.text().await?;
        debug!(status = status.as_u16(), path = %request.path, "api.response");

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &text));
        }

        let body = if text.trim().is_empty() {
            "null"
        } else {
            text.as_str()
        };
        serde_json::from_str(body).map_err(|e| ApiError {
            details: Some(text.clone()),
            ..ApiError::parse(format!("Failed to parse response from {}: {e}", request.path))
        })
    }
}

// ============================================================================
// Adapters
// ============================================================================

/// Adapter for anonymous endpoints. Never sends cookies.
#[derive(Debug, Clone)]
pub struct PublicClient {
    transport: Transport,
}

impl PublicClient {
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> ApiResult<T> {
        self.transport.send(&request).await
    }
}

/// Adapter for identity-scoped endpoints.
///
/// Keeps a cookie store so the session cookie set by `/auth/login` is replayed
/// on every later call. Any 401/403 clears the session store and emits
/// [`AuthEvent::Invalidated`] before the error reaches the caller.
#[derive(Debug, Clone)]
pub struct CredentialedClient {
    transport: Transport,
    store: Arc<SessionStore>,
    events: mpsc::UnboundedSender<AuthEvent>,
}

impl CredentialedClient {
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> ApiResult<T> {
        let result = self.transport.send(&request).await;
        if let Err(err) = &result
            && err.is_auth_rejected()
        {
            self.intercept_rejection(err, request.path());
        }
        result
    }

    fn intercept_rejection(&self, err: &ApiError, endpoint: &str) {
        let status = err.status.unwrap_or(401);
        warn!(status, endpoint, "credentialed call rejected, clearing session");
        self.store.clear_identity();
        // Nobody listening only means there is no navigation to trigger.
        let _ = self.events.send(AuthEvent::Invalidated {
            status,
            endpoint: endpoint.to_string(),
        });
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }
}

/// Both adapters, built from one config and sharing one session store.
#[derive(Debug, Clone)]
pub struct ApiClients {
    pub public: PublicClient,
    pub credentialed: CredentialedClient,
}

impl ApiClients {
    /// Builds the adapters and returns the receiving end of the
    /// auth-invalidated channel.
    pub fn new(config: &ApiConfig, store: Arc<SessionStore>) -> Result<(Self, AuthEvents)> {
        let (tx, rx) = events::channel();
        let clients = Self {
            public: PublicClient {
                transport: Transport::build(config, false)?,
            },
            credentialed: CredentialedClient {
                transport: Transport::build(config, true)?,
                store,
                events: tx,
            },
        };
        Ok((clients, rx))
    }
}
