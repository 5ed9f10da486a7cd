//! Shared types for the Limpet storefront client
//!
//! Domain models, pure pricing functions, the real-time update wire
//! protocol and the backend response envelopes, shared between the client
//! runtime and any embedding surface.

pub mod models;
pub mod pricing;
pub mod response;
pub mod updates;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Update stream re-exports (for convenient access)
pub use updates::{SyncEvent, SyncEventKind, UpdateMessage};
