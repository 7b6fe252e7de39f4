//! Batch resolution of identifiers to full product records.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::{Action, ApiClient, ApiError};

use super::{Product, ProductId, dedup_by_id};

/// Envelope of a `get_items` response.
#[derive(Debug, Deserialize)]
struct ItemsEnvelope {
    result: Vec<Product>,
}

/// Resolves a batch of identifiers to deduplicated product records.
///
/// An empty batch short-circuits to an empty result without touching the
/// network. The server's known duplicate-record quirk is scrubbed here, so
/// callers always see at most one record per identifier, in first-seen
/// order.
///
/// # Errors
///
/// Propagates [`ApiError`] once the client's retries are exhausted; the
/// caller decides whether the previous product list stays stale or is
/// cleared.
#[tracing::instrument(skip(client, ids), fields(batch = ids.len()))]
pub async fn fetch_details(
    client: &ApiClient,
    ids: &[ProductId],
) -> Result<Vec<Product>, ApiError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut params = Map::new();
    params.insert(
        "ids".to_string(),
        Value::Array(
            ids.iter()
                .map(|id| Value::String(id.as_str().to_owned()))
                .collect(),
        ),
    );

    let envelope: ItemsEnvelope = client.call(Action::GetItems, params).await?;
    let fetched = envelope.result.len();
    let products = dedup_by_id(envelope.result);

    debug!(
        fetched,
        kept = products.len(),
        "fetched product details"
    );

    Ok(products)
}
