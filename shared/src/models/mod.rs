//! Domain models
//!
//! Serde-backed value types for the catalog snapshot, cart and wishlist.
//! Snapshot-side types parse defensively: every field carries a default so
//! a partial or malformed backend payload never surfaces as `null`.

pub mod cart;
pub mod money;
pub mod product;
pub mod store_info;

pub use cart::{CartError, CartItem, WishlistItem};
pub use money::Money;
pub use product::CatalogProduct;
pub use store_info::{DesignSettings, StoreInfo, StoreSnapshot};
