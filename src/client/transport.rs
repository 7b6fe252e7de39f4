//! Transport seam between the retrying client and the network.
//!
//! [`Transport`] executes exactly one API call with no retry semantics; the
//! retry loop lives in [`ApiClient`](super::ApiClient). [`HttpTransport`] is
//! the production implementation over reqwest. Tests substitute stub
//! transports to script failure sequences deterministically.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::auth;
use crate::config::ApiConfig;

use super::ApiRequest;
use super::error::ApiError;

/// Executes a single catalog API call.
///
/// # Object Safety
///
/// Uses `async_trait` to support dynamic dispatch via `Arc<dyn Transport>`.
/// Rust 2024 native async traits are not object-safe, so `async_trait` is
/// required for the stub-transport pattern.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one request and returns the raw response body on a 2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] for network failures and
    /// [`ApiError::HttpStatus`] for non-2xx responses. Never retries.
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError>;
}

/// Production transport: POSTs JSON bodies to the configured endpoint with
/// the daily `X-Auth` token.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    secret: String,
}

impl HttpTransport {
    /// Builds the transport and its underlying HTTP client from config.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if reqwest client construction fails.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()
            .map_err(|error| ApiError::transport("client construction", error))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            secret: config.secret.clone(),
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let action = request.action.as_str();

        // Derived fresh on every call: the token rolls over at UTC midnight
        // and the server rejects stale dates.
        let token = auth::auth_key(&self.secret);

        debug!(action, endpoint = %self.base_url, "calling catalog API");

        let response = self
            .client
            .post(&self.base_url)
            .header("X-Auth", token)
            .json(request)
            .send()
            .await
            .map_err(|error| ApiError::transport(action, error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http_status(action, status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|error| ApiError::transport(action, error))
    }
}
