//! Observable cart and wishlist stores
//!
//! Each store owns its item list outright and notifies registered
//! listeners synchronously, in registration order, after a mutation is
//! fully applied — a listener never observes a half-applied change.

pub mod cart;
pub mod wishlist;

use uuid::Uuid;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

/// Typed listener registry shared by the stores.
///
/// Replaces the implicit notify-base-class pattern with explicit
/// subscribe/unsubscribe; emission order is registration order.
pub struct Listeners<E> {
    entries: Vec<(ListenerId, Box<dyn Fn(&E) + Send>)>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&E) + Send + 'static) -> ListenerId {
        let id = ListenerId(Uuid::new_v4());
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the listener was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&self, event: &E) {
        for (_, listener) in &self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}
