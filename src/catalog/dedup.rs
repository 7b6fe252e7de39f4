//! Order-preserving deduplication of catalog records.
//!
//! The remote API is known to return repeated records under the same
//! identifier within one `get_items` response. The first occurrence is the
//! one kept; relative order of first occurrences is preserved.

use std::collections::HashSet;

use super::Product;

/// Drops every record whose `id` was already seen earlier in the sequence.
#[must_use]
pub fn dedup_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::with_capacity(products.len());
    products
        .into_iter()
        .filter(|product| seen.insert(product.id.clone()))
        .collect()
}
