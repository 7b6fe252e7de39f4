//! Filter-option discovery.
//!
//! The three filterable fields are queried concurrently at startup. The
//! join is deliberately not all-or-nothing: one field failing leaves its
//! option list empty while the other two still populate.

use futures_util::join;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::client::{Action, ApiClient, ApiError};

use super::{FilterField, FilterOptions};

/// How many distinct values to request per field. The catalog's fields are
/// small (hundreds of distinct values), so a single page covers them.
pub const FIELD_OPTIONS_LIMIT: u32 = 1000;

/// Envelope of a `get_fields` response. Values may be `null` for records
/// missing the field.
#[derive(Debug, Deserialize)]
struct FieldEnvelope<T> {
    result: Vec<Option<T>>,
}

/// Fetches the distinct values of one filterable field, with nulls removed.
///
/// # Errors
///
/// Propagates [`ApiError`] once the client's retries are exhausted.
#[tracing::instrument(skip(client, field), fields(field = %field))]
pub async fn fetch_field_values<T: DeserializeOwned>(
    client: &ApiClient,
    field: FilterField,
    offset: u32,
    limit: u32,
) -> Result<Vec<T>, ApiError> {
    let mut params = Map::new();
    params.insert("field".to_string(), Value::from(field.as_str()));
    params.insert("offset".to_string(), Value::from(offset));
    params.insert("limit".to_string(), Value::from(limit));

    let envelope: FieldEnvelope<T> = client.call(Action::GetFields, params).await?;
    Ok(envelope.result.into_iter().flatten().collect())
}

/// Fetches the options for all three filterable fields concurrently.
///
/// Never fails as a whole: a field whose request errors (post-retry) is
/// logged and left empty.
pub async fn fetch_filter_options(client: &ApiClient) -> FilterOptions {
    let (brand, price, product) = join!(
        fetch_field_values::<String>(client, FilterField::Brand, 0, FIELD_OPTIONS_LIMIT),
        fetch_field_values::<f64>(client, FilterField::Price, 0, FIELD_OPTIONS_LIMIT),
        fetch_field_values::<String>(client, FilterField::Product, 0, FIELD_OPTIONS_LIMIT),
    );

    FilterOptions {
        brand: values_or_empty(FilterField::Brand, brand),
        price: values_or_empty(FilterField::Price, price),
        product: values_or_empty(FilterField::Product, product),
    }
}

fn values_or_empty<T>(field: FilterField, outcome: Result<Vec<T>, ApiError>) -> Vec<T> {
    match outcome {
        Ok(values) => values,
        Err(error) => {
            warn!(field = field.as_str(), error = %error, "filter options unavailable for field");
            Vec::new()
        }
    }
}
