//! Cart store

use shared::models::cart::{CartError, CartItem};
use shared::pricing;

use super::{ListenerId, Listeners};

/// Hard limit on total units across the whole cart, enforced by the store
/// itself so every code path hits the same policy.
pub const MAX_CART_UNITS: u32 = 10;

/// Change notifications emitted after a cart mutation is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    ItemAdded { product_id: String },
    ItemRemoved { product_id: String },
    QuantityChanged { product_id: String, quantity: u32 },
    Cleared,
    ConfigChanged,
}

/// Derived monetary aggregates for the current cart contents.
///
/// `order_discount` is the store-wide percent discount applied on top of
/// per-item discounts; tax is computed on the discounted subtotal. With
/// the store discount at zero, `total = subtotal + tax`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartTotals {
    pub subtotal: f64,
    pub total_discount: f64,
    pub order_discount: f64,
    pub tax: f64,
    pub total: f64,
}

/// Observable cart keyed by product id.
///
/// Owns its lines exclusively; insertion order is display order. Lines
/// with the same product id merge by quantity.
pub struct CartStore {
    items: Vec<CartItem>,
    tax_rate_percent: f64,
    discount_percent: f64,
    listeners: Listeners<CartEvent>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::with_rates(0.0, 0.0)
    }

    /// Create a cart with store-level GST and discount percentages.
    pub fn with_rates(tax_rate_percent: f64, discount_percent: f64) -> Self {
        Self {
            items: Vec::new(),
            tax_rate_percent,
            discount_percent,
            listeners: Listeners::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&CartEvent) + Send + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Add a line. An existing line with the same product id merges by
    /// incrementing its quantity; a new line is appended. Rejected when
    /// the cart would exceed [`MAX_CART_UNITS`].
    pub fn add(&mut self, item: CartItem) -> Result<(), CartError> {
        let added = item.quantity.max(1);
        if self.total_quantity() + added > MAX_CART_UNITS {
            return Err(CartError::QuantityLimitExceeded {
                limit: MAX_CART_UNITS,
            });
        }

        match self
            .items
            .iter()
            .position(|line| line.product_id == item.product_id)
        {
            Some(pos) => {
                self.items[pos].quantity += added;
                let event = CartEvent::QuantityChanged {
                    product_id: item.product_id,
                    quantity: self.items[pos].quantity,
                };
                self.listeners.emit(&event);
            }
            None => {
                let product_id = item.product_id.clone();
                self.items.push(CartItem {
                    quantity: added,
                    ..item
                });
                self.listeners.emit(&CartEvent::ItemAdded { product_id });
            }
        }
        Ok(())
    }

    /// Remove every line with this product id. Returns whether anything
    /// was removed; listeners are only notified on an actual change.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.listeners.emit(&CartEvent::ItemRemoved {
                product_id: product_id.to_string(),
            });
        }
        removed
    }

    /// Set a line's quantity. `quantity == 0` removes the line; an absent
    /// id is a caller bug and fails with [`CartError::NotFound`].
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        let pos = self
            .items
            .iter()
            .position(|line| line.product_id == product_id)
            .ok_or_else(|| CartError::NotFound(product_id.to_string()))?;

        if quantity == 0 {
            self.items.remove(pos);
            self.listeners.emit(&CartEvent::ItemRemoved {
                product_id: product_id.to_string(),
            });
            return Ok(());
        }

        let other_units = self.total_quantity() - self.items[pos].quantity;
        if other_units + quantity > MAX_CART_UNITS {
            return Err(CartError::QuantityLimitExceeded {
                limit: MAX_CART_UNITS,
            });
        }

        self.items[pos].quantity = quantity;
        self.listeners.emit(&CartEvent::QuantityChanged {
            product_id: product_id.to_string(),
            quantity,
        });
        Ok(())
    }

    /// Empty the cart with a single notification; no-op when already
    /// empty.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.listeners.emit(&CartEvent::Cleared);
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn tax_rate_percent(&self) -> f64 {
        self.tax_rate_percent
    }

    /// Update the GST rate (from store configuration).
    pub fn set_tax_rate_percent(&mut self, rate: f64) {
        if (self.tax_rate_percent - rate).abs() > f64::EPSILON {
            self.tax_rate_percent = rate;
            self.listeners.emit(&CartEvent::ConfigChanged);
        }
    }

    pub fn discount_percent(&self) -> f64 {
        self.discount_percent
    }

    /// Update the store-wide discount percentage.
    pub fn set_discount_percent(&mut self, percent: f64) {
        if (self.discount_percent - percent).abs() > f64::EPSILON {
            self.discount_percent = percent;
            self.listeners.emit(&CartEvent::ConfigChanged);
        }
    }

    /// Bill aggregates for the current contents.
    pub fn totals(&self) -> CartTotals {
        let subtotal = pricing::subtotal(&self.items);
        let total_discount = pricing::total_discount(&self.items);
        let order_discount = subtotal * self.discount_percent / 100.0;
        let taxable = subtotal - order_discount;
        let tax = pricing::tax_amount(taxable, self.tax_rate_percent);

        CartTotals {
            subtotal,
            total_discount,
            order_discount,
            tax,
            total: taxable + tax,
        }
    }

    /// Final amount including the shipping fee, waived at the free
    /// shipping threshold.
    pub fn total_with_shipping(&self, fee: f64, free_threshold: f64) -> f64 {
        pricing::shipping_adjusted_total(self.totals().total, fee, free_threshold)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
