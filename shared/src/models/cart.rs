//! Cart and wishlist line models

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by store mutations that violate the caller contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The referenced line is not in the cart. A logic bug at the call
    /// site, not a user-facing condition.
    #[error("Item not found in cart: {0}")]
    NotFound(String),

    /// The mutation would push the cart past the unit limit.
    #[error("Cart limit of {limit} units exceeded")]
    QuantityLimitExceeded { limit: u32 },
}

/// One cart line, keyed by product id.
///
/// Invariant: `quantity >= 1`. A line whose quantity drops to zero is
/// removed from the store, never kept around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub base_price: f64,
    /// Manual per-unit discount price; 0.0 means no override.
    #[serde(default)]
    pub discount_price: f64,
    /// Percent discount carried over from the catalog product; 0 disables.
    #[serde(default)]
    pub discount_percent: f64,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

/// One wishlist entry, unique per product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
}
