//! Wishlist store

use shared::models::cart::WishlistItem;

use super::{ListenerId, Listeners};

/// Change notifications emitted after a wishlist mutation is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistEvent {
    ItemAdded { product_id: String },
    ItemRemoved { product_id: String },
    Cleared,
}

/// Observable wishlist with at most one entry per product id.
pub struct WishlistStore {
    items: Vec<WishlistItem>,
    listeners: Listeners<WishlistEvent>,
}

impl WishlistStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            listeners: Listeners::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&WishlistEvent) + Send + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Idempotent add: returns whether the entry was inserted. A duplicate
    /// id is a silent no-op.
    pub fn add(&mut self, item: WishlistItem) -> bool {
        if self.contains(&item.product_id) {
            return false;
        }
        let product_id = item.product_id.clone();
        self.items.push(item);
        self.listeners.emit(&WishlistEvent::ItemAdded { product_id });
        true
    }

    /// Returns whether anything was removed; listeners are only notified
    /// on an actual change.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|entry| entry.product_id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.listeners.emit(&WishlistEvent::ItemRemoved {
                product_id: product_id.to_string(),
            });
        }
        removed
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|entry| entry.product_id == product_id)
    }

    /// Empty the wishlist with a single notification; no-op when already
    /// empty.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.listeners.emit(&WishlistEvent::Cleared);
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for WishlistStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn entry(id: &str) -> WishlistItem {
        WishlistItem {
            product_id: id.to_string(),
            name: id.to_string(),
            price: 10.0,
            image: None,
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = WishlistStore::new();

        assert!(wishlist.add(entry("p1")));
        assert!(!wishlist.add(entry("p1")));

        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.contains("p1"));
    }

    #[test]
    fn test_duplicate_add_does_not_notify() {
        let mut wishlist = WishlistStore::new();
        let count = Arc::new(Mutex::new(0u32));
        let sink = Arc::clone(&count);
        wishlist.subscribe(move |_| *sink.lock().unwrap() += 1);

        wishlist.add(entry("p1"));
        wishlist.add(entry("p1"));
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut wishlist = WishlistStore::new();
        wishlist.add(entry("p1"));
        wishlist.add(entry("p2"));

        assert!(wishlist.remove("p1"));
        assert!(!wishlist.remove("p1"));
        assert!(!wishlist.contains("p1"));

        wishlist.clear();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut wishlist = WishlistStore::new();
        for id in ["p3", "p1", "p2"] {
            wishlist.add(entry(id));
        }
        let ids: Vec<&str> = wishlist.items().iter().map(|e| e.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p1", "p2"]);
    }
}
