//! Retrying catalog API client and wire protocol types.
//!
//! The wire contract is a single fixed endpoint taking `POST` bodies of the
//! shape `{"action": <name>, "params": {...}}` with a daily `X-Auth` token
//! header. This module provides:
//!
//! - [`Action`] / [`ApiRequest`] - the request body types
//! - [`Transport`] / [`HttpTransport`] - the single-call network seam
//! - [`ApiClient`] - the retrying caller every fetcher routes through
//! - [`ApiError`] - the failure taxonomy
//!
//! # Retry policy
//!
//! One policy for every action: each call gets up to `max_attempts`
//! consecutive tries with no backoff between them, and the last error is
//! propagated wrapped in [`ApiError::ExhaustedRetries`]. A non-2xx status or
//! an undecodable body counts as a failed attempt just like a network fault.

mod error;
mod transport;

pub use error::ApiError;
pub use transport::{HttpTransport, Transport};

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::ApiConfig;

/// The actions understood by the catalog endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Page of product identifiers, optionally narrowed by filter params.
    GetIds,
    /// Full product records for a batch of identifiers.
    GetItems,
    /// Distinct values of one filterable field.
    GetFields,
}

impl Action {
    /// Wire name of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetIds => "get_ids",
            Self::GetItems => "get_items",
            Self::GetFields => "get_fields",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request body: an action name plus its JSON params object.
#[derive(Debug, Clone, Serialize)]
pub struct ApiRequest {
    /// The action to invoke.
    pub action: Action,
    /// Action parameters, serialized as a JSON object.
    pub params: Map<String, Value>,
}

/// Retrying caller over a [`Transport`].
///
/// Stateless apart from configuration; safe to share behind a reference.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    config: ApiConfig,
}

impl ApiClient {
    /// Creates a client backed by the production [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if HTTP client construction fails.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self { transport, config })
    }

    /// Creates a client over an arbitrary transport (stubbed in tests).
    #[must_use]
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Calls an action and decodes the response body into `T`.
    ///
    /// Retries immediately on failure up to the configured attempt cap,
    /// logging each failed attempt with its attempt number.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ExhaustedRetries`] wrapping the final attempt's
    /// error once the cap is reached.
    #[tracing::instrument(skip(self, params, action), fields(action = %action))]
    pub async fn call<T: DeserializeOwned>(
        &self,
        action: Action,
        params: Map<String, Value>,
    ) -> Result<T, ApiError> {
        let request = ApiRequest { action, params };
        let max_attempts = self.config.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let outcome = match self.transport.execute(&request).await {
                Ok(body) => serde_json::from_value::<T>(body)
                    .map_err(|error| ApiError::decode(action.as_str(), error)),
                Err(error) => Err(error),
            };

            match outcome {
                Ok(value) => return Ok(value),
                Err(error) => {
                    warn!(attempt, max_attempts, error = %error, "catalog API attempt failed");
                    if attempt >= max_attempts {
                        return Err(ApiError::exhausted(action.as_str(), max_attempts, error));
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::config::ApiConfig;

    /// Transport double that replays the same body for every call.
    struct FixedTransport(Value);

    #[async_trait]
    impl Transport for FixedTransport {
        async fn execute(&self, _request: &ApiRequest) -> Result<Value, ApiError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_call_decodes_typed_envelope() {
        #[derive(Debug, serde::Deserialize)]
        struct Envelope {
            result: Vec<String>,
        }

        let client = ApiClient::with_transport(
            ApiConfig::new("http://unused.invalid/", "secret"),
            Arc::new(FixedTransport(json!({"result": ["a", "b"]}))),
        );

        let envelope: Envelope =
            tokio_test::block_on(client.call(Action::GetIds, Map::new())).unwrap();
        assert_eq!(envelope.result, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_call_decode_mismatch_exhausts_retries() {
        #[derive(Debug, serde::Deserialize)]
        struct Envelope {
            #[serde(rename = "result")]
            _result: Vec<String>,
        }

        let client = ApiClient::with_transport(
            ApiConfig::new("http://unused.invalid/", "secret"),
            Arc::new(FixedTransport(json!({"unexpected": true}))),
        );

        let error =
            tokio_test::block_on(client.call::<Envelope>(Action::GetItems, Map::new())).unwrap_err();
        match error {
            ApiError::ExhaustedRetries { attempts, source, .. } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*source, ApiError::Decode { .. }));
            }
            other => panic!("expected ExhaustedRetries, got: {other}"),
        }
    }

    #[test]
    fn test_action_wire_names() {
        assert_eq!(Action::GetIds.as_str(), "get_ids");
        assert_eq!(Action::GetItems.as_str(), "get_items");
        assert_eq!(Action::GetFields.as_str(), "get_fields");
    }

    #[test]
    fn test_api_request_serializes_to_wire_shape() {
        let mut params = Map::new();
        params.insert("offset".to_string(), Value::from(100));
        params.insert("limit".to_string(), Value::from(50));
        let request = ApiRequest {
            action: Action::GetIds,
            params,
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({"action": "get_ids", "params": {"offset": 100, "limit": 50}})
        );
    }

    #[test]
    fn test_api_request_empty_params_serializes_to_empty_object() {
        let request = ApiRequest {
            action: Action::GetFields,
            params: Map::new(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"action": "get_fields", "params": {}}));
    }
}
