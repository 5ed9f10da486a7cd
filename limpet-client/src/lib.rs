//! Limpet client — tenant-scoped storefront state sync and pricing core
//!
//! The runtime half of the Limpet storefront: resolves which tenant this
//! installation belongs to, keeps a push-updated local snapshot of the
//! tenant's catalog and store configuration, and owns the observable cart
//! and wishlist state the UI renders.
//!
//! Everything here is explicitly constructed and explicitly owned: the
//! embedding layer builds a [`ClientConfig`], wires the services together
//! at startup and tears them down with [`CatalogSyncClient::dispose`] and a
//! `CancellationToken`. No process-wide singletons.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> Result<(), limpet_client::ClientError> {
//! use limpet_client::{AdminApi, CatalogSnapshotLoader, CatalogSyncClient, ClientConfig, TenantResolver};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = ClientConfig::from_env();
//! let api = AdminApi::new(&config)?;
//!
//! let resolver = TenantResolver::new(&config, api.clone())?;
//! let tenant_id = resolver.resolve().await?;
//!
//! let sync = CatalogSyncClient::new(&config);
//! sync.connect(&tenant_id);
//!
//! let loader = Arc::new(CatalogSnapshotLoader::new(&config, api));
//! loader.load(&tenant_id).await;
//! let shutdown = CancellationToken::new();
//! let _worker = Arc::clone(&loader).watch_updates(&sync, &tenant_id, shutdown.clone());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod sync;
pub mod tenant;

pub use api::AdminApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use snapshot::CatalogSnapshotLoader;
pub use store::cart::{CartStore, CartTotals};
pub use store::wishlist::WishlistStore;
pub use sync::{CatalogSyncClient, ConnectionState};
pub use tenant::TenantResolver;
