//! Paged ID retrieval with filter support.
//!
//! `get_ids` is the one action used whether or not filter criteria are set;
//! criteria ride alongside `offset`/`limit` as top-level params. The page
//! count comes from the envelope's `total` field when the server supplies
//! one, and otherwise from a bound derived from the page shape itself -
//! never from misreading the ID array as a count.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::client::{Action, ApiClient, ApiError};

use super::{FilterCriteria, ProductId};

/// Envelope of a `get_ids` response.
#[derive(Debug, Deserialize)]
struct IdsEnvelope {
    result: Vec<ProductId>,
    /// Total matching IDs across all pages. Older server revisions omit it.
    #[serde(default)]
    total: Option<u64>,
}

/// One page of identifiers plus the derived page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPage {
    /// Identifiers on this page, in server order.
    pub ids: Vec<ProductId>,
    /// Number of pages the query spans, as far as the response reveals.
    pub total_pages: u32,
}

/// Fetches one page of product identifiers matching the filter.
///
/// The request carries `offset = page * page_size` and `limit = page_size`
/// (page size from the client's config, 50 by default).
///
/// # Errors
///
/// Propagates [`ApiError`] after the client's retries are exhausted. Callers
/// that want the degrade-to-empty behavior apply it themselves (see
/// [`PageController::apply_ids`](crate::controller::PageController::apply_ids)).
#[tracing::instrument(skip(client, filter))]
pub async fn fetch_ids(
    client: &ApiClient,
    page: u32,
    filter: &FilterCriteria,
) -> Result<IdPage, ApiError> {
    let page_size = client.config().page_size;
    let offset = u64::from(page) * u64::from(page_size);

    let mut params = filter.to_params();
    params.insert("offset".to_string(), Value::from(offset));
    params.insert("limit".to_string(), Value::from(page_size));

    let envelope: IdsEnvelope = client.call(Action::GetIds, params).await?;
    let total_pages = derive_total_pages(page, envelope.result.len(), envelope.total, page_size);

    debug!(
        ids = envelope.result.len(),
        total = ?envelope.total,
        total_pages,
        "fetched id page"
    );

    Ok(IdPage {
        ids: envelope.result,
        total_pages,
    })
}

/// Derives the page count from a response.
///
/// With a server-reported `total`, the count is `ceil(total / page_size)`.
/// Without one, the page shape gives a bound: a full page at index `p`
/// proves at least one further page exists; a short page is the last; an
/// empty page means everything ended before it.
fn derive_total_pages(page: u32, fetched: usize, total: Option<u64>, page_size: u32) -> u32 {
    let page_size = page_size.max(1);
    match total {
        Some(total) => u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX),
        None => {
            let fetched = u32::try_from(fetched).unwrap_or(u32::MAX);
            if fetched == 0 {
                page
            } else if fetched >= page_size {
                page + 2
            } else {
                page + 1
            }
        }
    }
}
