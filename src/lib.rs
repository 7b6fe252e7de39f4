//! Catalog Browser Core Library
//!
//! Async client for a remote product-catalog API with daily-token
//! authentication, paged ID retrieval, field-based filtering, and a
//! page/filter state controller.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Injected endpoint/secret/retry configuration
//! - [`auth`] - Daily auth-key derivation
//! - [`client`] - Wire types, transport seam, and the retrying API client
//! - [`catalog`] - Domain types, deduplication, and the three fetchers
//! - [`controller`] - Page/filter state machine with stale-response protection

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod controller;

// Re-export commonly used types
pub use catalog::{
    FilterCriteria, FilterField, FilterOptions, IdPage, Product, ProductId, dedup_by_id,
    fetch_details, fetch_field_values, fetch_filter_options, fetch_ids,
};
pub use client::{Action, ApiClient, ApiError, ApiRequest, HttpTransport, Transport};
pub use config::{
    ApiConfig, DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_PAGE_SIZE, DEFAULT_SECRET,
};
pub use controller::{LoadPhase, LoadTicket, PageController, PageState};
