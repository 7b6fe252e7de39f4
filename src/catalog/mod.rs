//! Catalog domain types and fetchers.
//!
//! - [`ProductId`] / [`Product`] - the remote catalog's records
//! - [`FilterCriteria`] / [`FilterField`] / [`FilterOptions`] - filtering model
//! - [`dedup_by_id`] - order-preserving deduplication
//! - [`fetch_ids`] / [`fetch_details`] / [`fetch_filter_options`] - fetchers
//!
//! Fetchers are stateless free functions over an [`ApiClient`]: they return
//! structured results rather than mutating caller state through injected
//! setters, leaving all state ownership to the
//! [`PageController`](crate::controller::PageController).

mod dedup;
mod details;
mod fields;
mod ids;

pub use dedup::dedup_by_id;
pub use details::fetch_details;
pub use fields::{FIELD_OPTIONS_LIMIT, fetch_field_values, fetch_filter_options};
pub use ids::{IdPage, fetch_ids};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque key uniquely naming a product in the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wraps a raw identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One catalog record. Identity key is `id`; records are immutable once
/// fetched and replaced wholesale on each successful detail fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identity key.
    pub id: ProductId,
    /// Product name (the API calls this field `product`).
    pub product: String,
    /// Price in the catalog's currency.
    pub price: f64,
    /// Brand name; the API returns `null` for unbranded records.
    pub brand: Option<String>,
}

/// The filterable fields of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Product name.
    Product,
    /// Exact price.
    Price,
    /// Brand name.
    Brand,
}

impl FilterField {
    /// Wire name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Price => "price",
            Self::Brand => "brand",
        }
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-selected constraints narrowing the ID query. An empty criteria set
/// means "no filter". Set fields become top-level params of the `get_ids`
/// request alongside `offset` and `limit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact product-name match.
    pub product: Option<String>,
    /// Exact price match.
    pub price: Option<f64>,
    /// Exact brand match.
    pub brand: Option<String>,
}

impl FilterCriteria {
    /// True when no field is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.product.is_none() && self.price.is_none() && self.brand.is_none()
    }

    /// Renders the set fields as request params.
    #[must_use]
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        if let Some(product) = &self.product {
            params.insert("product".to_string(), Value::from(product.clone()));
        }
        if let Some(price) = self.price {
            params.insert("price".to_string(), Value::from(price));
        }
        if let Some(brand) = &self.brand {
            params.insert("brand".to_string(), Value::from(brand.clone()));
        }
        params
    }
}

/// Distinct values available per filterable field. Populated once at
/// startup, read-only thereafter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Distinct brand names.
    pub brand: Vec<String>,
    /// Distinct prices.
    pub price: Vec<f64>,
    /// Distinct product names.
    pub product: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_id_roundtrips_as_transparent_string() {
        let id: ProductId = serde_json::from_value(json!("1789ecf3-f81c-4f49-ada2-83804dcc74b0")).unwrap();
        assert_eq!(id.as_str(), "1789ecf3-f81c-4f49-ada2-83804dcc74b0");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("1789ecf3-f81c-4f49-ada2-83804dcc74b0"));
    }

    #[test]
    fn test_product_deserializes_with_null_brand() {
        let product: Product = serde_json::from_value(json!({
            "id": "abc",
            "product": "Золотое кольцо",
            "price": 12500.0,
            "brand": null
        }))
        .unwrap();
        assert_eq!(product.id, ProductId::new("abc"));
        assert_eq!(product.brand, None);
    }

    #[test]
    fn test_filter_criteria_empty_produces_no_params() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.to_params().is_empty());
    }

    #[test]
    fn test_filter_criteria_set_fields_become_params() {
        let criteria = FilterCriteria {
            product: Some("кольцо".to_string()),
            price: Some(17500.0),
            brand: None,
        };
        assert!(!criteria.is_empty());

        let params = criteria.to_params();
        assert_eq!(params.get("product"), Some(&json!("кольцо")));
        assert_eq!(params.get("price"), Some(&json!(17500.0)));
        assert!(!params.contains_key("brand"));
    }

    #[test]
    fn test_filter_field_wire_names() {
        assert_eq!(FilterField::Product.as_str(), "product");
        assert_eq!(FilterField::Price.as_str(), "price");
        assert_eq!(FilterField::Brand.as_str(), "brand");
    }
}
