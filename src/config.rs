//! Runtime configuration for the catalog API client.
//!
//! The base URL and credential seed are injected configuration rather than
//! module-level constants so tests and alternate deployments can substitute
//! their own endpoint and secret.

use std::time::Duration;

/// Default catalog API endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.valantis.store:40000/";

/// Default credential seed for the daily auth token.
pub const DEFAULT_SECRET: &str = "Valantis";

/// Fixed batch size for ID pagination.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Default maximum attempts per API call (including the initial attempt).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Configuration bundle passed to the HTTP transport and fetchers.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Endpoint all API calls are POSTed to.
    pub base_url: String,
    /// Credential seed the daily auth token is derived from.
    pub secret: String,
    /// Number of IDs requested per page.
    pub page_size: u32,
    /// Maximum attempts per API call (minimum 1).
    pub max_attempts: u32,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub read_timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration for the given endpoint and secret with
    /// default pagination and retry settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            secret: secret.into(),
            page_size: DEFAULT_PAGE_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(READ_TIMEOUT_SECS),
        }
    }

    /// Returns the same configuration with a different retry cap (floored at 1).
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_SECRET)
    }
}
