//! Catalog snapshot loading and refresh
//!
//! Pull-based counterpart of the update channel. `load` fetches the full
//! catalog/config snapshot; `watch_updates` keeps it fresh by re-pulling
//! on every push event (debounced) and on a fixed fallback cadence that
//! covers missed pushes.
//!
//! Failures never surface: the last known snapshot (or the documented
//! defaults before the first successful pull) stays visible, so the UI is
//! never left without something to render.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use shared::models::StoreSnapshot;

use crate::api::AdminApi;
use crate::config::ClientConfig;
use crate::sync::CatalogSyncClient;

/// Debounce window for push-triggered reloads.
const RELOAD_DEBOUNCE_MS: u64 = 500;

/// Owns the last-known snapshot and hands out read-only copies.
pub struct CatalogSnapshotLoader {
    api: AdminApi,
    refresh_interval: Duration,
    snapshot: RwLock<StoreSnapshot>,
    active_tenant: RwLock<Option<String>>,
    last_refreshed: RwLock<Option<i64>>,
    loading_tx: watch::Sender<bool>,
}

impl CatalogSnapshotLoader {
    pub fn new(config: &ClientConfig, api: AdminApi) -> Self {
        let (loading_tx, _) = watch::channel(false);
        Self {
            api,
            refresh_interval: config.refresh_interval,
            snapshot: RwLock::new(StoreSnapshot::default()),
            active_tenant: RwLock::new(None),
            last_refreshed: RwLock::new(None),
            loading_tx,
        }
    }

    /// Copy of the last-known snapshot (defaults before the first pull).
    pub fn snapshot(&self) -> StoreSnapshot {
        self.snapshot.read().unwrap().clone()
    }

    /// Millisecond timestamp of the last successful pull, `None` while
    /// only defaults have been shown. Freshness signal for the UI.
    pub fn last_refreshed_at(&self) -> Option<i64> {
        *self.last_refreshed.read().unwrap()
    }

    /// Whether an initial/explicit load is in flight. Background refreshes
    /// never raise this, so the UI can skip its loading indicator for them.
    pub fn loading(&self) -> bool {
        *self.loading_tx.borrow()
    }

    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    /// Explicit load for a tenant. Marks the loader as loading for its
    /// duration and pins the loader to the tenant: stale results from
    /// earlier tenants are discarded on arrival.
    pub async fn load(&self, tenant_id: &str) -> StoreSnapshot {
        *self.active_tenant.write().unwrap() = Some(tenant_id.to_string());

        self.loading_tx.send_replace(true);
        let snapshot = self.reload(tenant_id).await;
        self.loading_tx.send_replace(false);
        snapshot
    }

    /// Background reload: same pull, no loading indicator.
    async fn background_reload(&self, tenant_id: &str) -> StoreSnapshot {
        self.reload(tenant_id).await
    }

    async fn reload(&self, tenant_id: &str) -> StoreSnapshot {
        let fetched = match self.api.fetch_form(tenant_id).await {
            Ok(form) => Some(StoreSnapshot::from_form(form)),
            Err(e) => {
                tracing::warn!(tenant_id = %tenant_id, "snapshot pull failed, trying legacy shape: {e}");
                match self.api.fetch_dynamic(tenant_id).await {
                    Ok(dynamic) => {
                        let base = self.snapshot();
                        Some(StoreSnapshot::from_dynamic(base, dynamic))
                    }
                    Err(e) => {
                        tracing::warn!(tenant_id = %tenant_id, "legacy snapshot pull failed, keeping last known: {e}");
                        None
                    }
                }
            }
        };

        if let Some(snapshot) = fetched {
            // A tenant switch may have raced the request; stale results
            // must not clobber the new tenant's state.
            let still_active = self
                .active_tenant
                .read()
                .unwrap()
                .as_deref()
                .is_some_and(|active| active == tenant_id);
            if still_active {
                tracing::debug!(
                    tenant_id = %tenant_id,
                    products = snapshot.products.len(),
                    "snapshot refreshed"
                );
                *self.snapshot.write().unwrap() = snapshot;
                *self.last_refreshed.write().unwrap() = Some(shared::util::now_millis());
            } else {
                tracing::debug!(tenant_id = %tenant_id, "dropping snapshot for inactive tenant");
            }
        }

        self.snapshot()
    }

    /// Keep the snapshot fresh from the update channel.
    ///
    /// Every recognized event schedules one reload; triggers landing
    /// inside the debounce window (or while a reload is in flight)
    /// coalesce into a single trailing reload. A periodic fallback reload
    /// covers pushes lost to disconnects.
    pub fn watch_updates(
        self: Arc<Self>,
        sync: &CatalogSyncClient,
        tenant_id: &str,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let mut events = sync.subscribe();
        let tenant = tenant_id.to_string();

        tokio::spawn(async move {
            let mut fallback = tokio::time::interval(self.refresh_interval);
            fallback.tick().await; // skip immediate tick

            let mut reload_deadline: Option<Instant> = None;

            loop {
                let sleep_until = reload_deadline
                    .unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

                tokio::select! {
                    _ = shutdown.cancelled() => {
                        tracing::debug!("snapshot refresh worker stopping");
                        return;
                    }

                    // Debounce timer fired → reload once
                    _ = tokio::time::sleep_until(sleep_until), if reload_deadline.is_some() => {
                        reload_deadline = None;
                        self.background_reload(&tenant).await;
                    }

                    // Periodic fallback covering missed push events
                    _ = fallback.tick() => {
                        self.background_reload(&tenant).await;
                    }

                    event = events.recv() => {
                        match event {
                            Ok(event) if event.tenant_id == tenant && event.triggers_reload() => {
                                reload_deadline =
                                    Some(Instant::now() + Duration::from_millis(RELOAD_DEBOUNCE_MS));
                            }
                            Ok(_) => {}
                            Err(broadcast::error::RecvError::Lagged(n)) => {
                                tracing::warn!(missed = n, "update stream lagged, scheduling reload");
                                reload_deadline =
                                    Some(Instant::now() + Duration::from_millis(RELOAD_DEBOUNCE_MS));
                            }
                            Err(broadcast::error::RecvError::Closed) => {
                                tracing::debug!("update stream closed, refresh worker stopping");
                                return;
                            }
                        }
                    }
                }
            }
        })
    }
}
