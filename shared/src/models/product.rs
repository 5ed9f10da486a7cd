//! Catalog product model

use serde::{Deserialize, Serialize};

use crate::models::cart::{CartItem, WishlistItem};
use crate::models::money::Money;
use crate::pricing;

/// Product entry as configured in the admin catalog service.
///
/// This is a read-only snapshot value: price and discount arrive as raw
/// admin-entered text and are only interpreted through [`crate::pricing`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Raw price text (e.g. "₹1,299").
    #[serde(default)]
    pub price: String,
    /// Raw manual discount price text; empty means no override.
    #[serde(default)]
    pub discount_price: String,
    /// Percent discount; 0 disables.
    #[serde(default)]
    pub discount_percent: f64,
    /// Currency hint from the admin; when absent the symbol is detected
    /// from the price text.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub image: String,
}

impl CatalogProduct {
    /// Numeric base price parsed from the raw text.
    pub fn base_amount(&self) -> f64 {
        pricing::parse_price(&self.price)
    }

    /// Numeric manual discount price; 0.0 when unset.
    pub fn discount_amount(&self) -> f64 {
        pricing::parse_price(&self.discount_price)
    }

    /// Per-unit price after resolving discount precedence.
    pub fn effective_amount(&self) -> f64 {
        pricing::effective_price(self.base_amount(), self.discount_amount(), self.discount_percent)
    }

    /// Display symbol: the admin hint when present, otherwise detected
    /// from the price text.
    pub fn currency_symbol(&self) -> &str {
        match self.currency.as_deref() {
            Some(hint) if !hint.is_empty() => hint,
            _ => pricing::detect_currency_symbol(&self.price),
        }
    }

    /// Effective per-unit price as a displayable amount.
    pub fn effective_money(&self) -> Money {
        Money::new(self.effective_amount(), self.currency_symbol())
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Build a cart line for this product.
    pub fn to_cart_item(&self, quantity: u32) -> CartItem {
        CartItem {
            product_id: self.id.clone(),
            name: self.name.clone(),
            base_price: self.base_amount(),
            discount_price: self.discount_amount(),
            discount_percent: self.discount_percent,
            quantity: quantity.max(1),
            image: if self.image.is_empty() {
                None
            } else {
                Some(self.image.clone())
            },
        }
    }

    /// Build a wishlist entry for this product.
    pub fn to_wishlist_item(&self) -> WishlistItem {
        WishlistItem {
            product_id: self.id.clone(),
            name: self.name.clone(),
            price: self.effective_amount(),
            image: if self.image.is_empty() {
                None
            } else {
                Some(self.image.clone())
            },
        }
    }
}
