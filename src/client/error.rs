//! Error types for catalog API calls.
//!
//! The taxonomy mirrors how failures surface on the wire: transport faults,
//! non-2xx statuses, undecodable bodies, and the terminal retry-exhaustion
//! wrapper around whichever of those happened last.

use thiserror::Error;

/// Errors that can occur while calling the catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS resolution, connection refused, timeout, etc.)
    #[error("network error calling {action}: {source}")]
    Transport {
        /// The API action being called.
        action: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} calling {action}")]
    HttpStatus {
        /// The API action being called.
        action: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Response body did not match the expected envelope shape.
    #[error("failed to decode {action} response: {source}")]
    Decode {
        /// The API action being called.
        action: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// All retry attempts were consumed; wraps the final attempt's error.
    #[error("{action} failed after {attempts} attempts: {source}")]
    ExhaustedRetries {
        /// The API action being called.
        action: String,
        /// How many attempts were made.
        attempts: u32,
        /// The error from the last attempt.
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    /// Creates a transport error from a reqwest error.
    pub fn transport(action: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            action: action.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(action: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            action: action.into(),
            status,
        }
    }

    /// Creates a decode error from a serde error.
    pub fn decode(action: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            action: action.into(),
            source,
        }
    }

    /// Creates a retry-exhaustion error wrapping the last attempt's failure.
    pub fn exhausted(action: impl Into<String>, attempts: u32, source: ApiError) -> Self {
        Self::ExhaustedRetries {
            action: action.into(),
            attempts,
            source: Box::new(source),
        }
    }
}

// No blanket `From<reqwest::Error>` / `From<serde_json::Error>` impls: every
// variant needs the `action` context, which the source errors cannot supply.
// The helper constructors are the intended construction path.
