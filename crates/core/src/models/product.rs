//! Catalog product types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A catalog product.
///
/// Products are created by catalog seeding or explicit creation and are
/// never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID, assigned by the backend.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Current price, 2-decimal scale.
    pub price: Decimal,
    /// Pre-discount price, if the product is on sale.
    pub original_price: Option<Decimal>,
    /// Primary image URL.
    pub image_url: String,
    /// Category slug (e.g. "electronics", "home").
    pub category: String,
    /// Average review rating, if any reviews exist.
    pub rating: Option<Decimal>,
    /// Whether the product is currently purchasable.
    pub in_stock: bool,
}

/// Draft for creating a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub rating: Option<Decimal>,
    /// Defaults to `true` when omitted.
    #[serde(default)]
    pub in_stock: Option<bool>,
}
