//! Tenant resolution
//!
//! Decides which admin's catalog this installation shows. The resolved id
//! is immutable for a session and cached durably so later launches skip
//! the network.

use std::sync::Mutex;

use crate::api::AdminApi;
use crate::config::{ClientConfig, PLACEHOLDER_ADMIN_ID};
use crate::error::{ClientError, ClientResult};
use crate::storage::{SettingsStore, ADMIN_ID_KEY};

/// Resolves the tenant ("admin") id with a fallback chain:
///
/// 1. in-memory cache from a prior resolution,
/// 2. durable local storage (`admin_id`),
/// 3. the compiled-in default, unless it is still the placeholder,
/// 4. backend auto-detection via `/api/admin/app-info`.
///
/// The first strategy that yields an id wins; 3 and 4 persist their result
/// so the next resolution short-circuits at 1 or 2.
pub struct TenantResolver {
    api: AdminApi,
    default_admin_id: String,
    storage: Mutex<SettingsStore>,
    cached: Mutex<Option<String>>,
}

impl TenantResolver {
    pub fn new(config: &ClientConfig, api: AdminApi) -> ClientResult<Self> {
        let storage = SettingsStore::load(&config.data_dir)?;
        Ok(Self {
            api,
            default_admin_id: config.default_admin_id.clone(),
            storage: Mutex::new(storage),
            cached: Mutex::new(None),
        })
    }

    /// Resolve the tenant id for this session.
    ///
    /// Fails with [`ClientError::Config`] only when every strategy comes up
    /// empty; the embedding layer must surface that as a "configure the
    /// app" state rather than rendering an empty store.
    pub async fn resolve(&self) -> ClientResult<String> {
        // 1. In-memory cache
        if let Some(id) = self.cached.lock().unwrap().clone() {
            return Ok(id);
        }

        // 2. Durable storage
        if let Some(id) = self
            .storage
            .lock()
            .unwrap()
            .get(ADMIN_ID_KEY)
            .map(str::to_string)
        {
            *self.cached.lock().unwrap() = Some(id.clone());
            tracing::debug!(tenant_id = %id, "tenant resolved from storage");
            return Ok(id);
        }

        // 3. Compiled-in default, unless still the placeholder
        if !self.default_admin_id.is_empty() && self.default_admin_id != PLACEHOLDER_ADMIN_ID {
            let id = self.default_admin_id.clone();
            self.persist_resolved(&id);
            tracing::info!(tenant_id = %id, "tenant resolved from build default");
            return Ok(id);
        }

        // 4. Backend auto-detection
        match self.api.fetch_app_info().await {
            Ok(info) => {
                let id = info.admin_id;
                self.persist_resolved(&id);
                tracing::info!(tenant_id = %id, "tenant auto-detected from backend");
                Ok(id)
            }
            Err(e) => {
                tracing::warn!("tenant auto-detection failed: {e}");
                Err(ClientError::Config("no tenant configured".to_string()))
            }
        }
    }

    /// Overwrite the tenant id, storage first.
    ///
    /// Storage is written before memory, so a persistence failure leaves
    /// the previous in-memory value in place and the two views consistent.
    pub fn set_tenant_id(&self, id: &str) -> ClientResult<()> {
        self.storage.lock().unwrap().set(ADMIN_ID_KEY, id)?;
        *self.cached.lock().unwrap() = Some(id.to_string());
        Ok(())
    }

    /// The tenant id resolved earlier in this process, if any.
    pub fn cached_tenant(&self) -> Option<String> {
        self.cached.lock().unwrap().clone()
    }

    /// Persist an id resolved by strategies 3–4. Resolution itself
    /// succeeded, so a persist failure is only logged; the cache is left
    /// unset and the next `resolve()` walks the chain again.
    fn persist_resolved(&self, id: &str) {
        if let Err(e) = self.set_tenant_id(id) {
            tracing::warn!(tenant_id = %id, "failed to persist resolved tenant id: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config_at(dir: &Path, base: &str) -> ClientConfig {
        ClientConfig::new(base)
            .with_data_dir(dir)
            .with_request_timeout(std::time::Duration::from_millis(500))
    }

    fn resolver(config: &ClientConfig) -> TenantResolver {
        let api = AdminApi::new(config).unwrap();
        TenantResolver::new(config, api).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_prefers_stored_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SettingsStore::load(dir.path()).unwrap();
        store.set(ADMIN_ID_KEY, "stored-tenant").unwrap();

        // Backend is unreachable and the default is set; storage still wins
        let config =
            config_at(dir.path(), "http://127.0.0.1:9").with_default_admin_id("default-tenant");
        let resolver = resolver(&config);

        assert_eq!(resolver.resolve().await.unwrap(), "stored-tenant");
        assert_eq!(resolver.cached_tenant().as_deref(), Some("stored-tenant"));
    }

    #[tokio::test]
    async fn test_resolve_uses_build_default_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            config_at(dir.path(), "http://127.0.0.1:9").with_default_admin_id("default-tenant");
        let resolver = resolver(&config);

        assert_eq!(resolver.resolve().await.unwrap(), "default-tenant");

        // Persisted: a fresh resolver finds it in storage without network
        let resolver2 = self::resolver(&config);
        assert_eq!(resolver2.resolve().await.unwrap(), "default-tenant");
    }

    #[tokio::test]
    async fn test_placeholder_default_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(dir.path(), "http://127.0.0.1:9");
        let resolver = resolver(&config);

        // Placeholder default + unreachable backend → no tenant
        match resolver.resolve().await {
            Err(ClientError::Config(msg)) => assert_eq!(msg, "no tenant configured"),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_autodetects_from_backend() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let body = r#"{"success":true,"data":{"adminId":"detected-tenant"}}"#;
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf).await;
                let resp = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        let dir = tempfile::tempdir().unwrap();
        let config = config_at(dir.path(), &format!("http://{addr}"));
        let resolver = resolver(&config);

        assert_eq!(resolver.resolve().await.unwrap(), "detected-tenant");
        // Memoized for the rest of the session
        assert_eq!(resolver.cached_tenant().as_deref(), Some("detected-tenant"));
    }

    #[tokio::test]
    async fn test_set_tenant_id_rolls_back_on_persist_failure() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let config = config_at(&data_dir, "http://127.0.0.1:9");
        let resolver = resolver(&config);
        resolver.set_tenant_id("tenant-a").unwrap();

        // Make the data directory unusable: replace it with a regular file
        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, b"not a directory").unwrap();

        assert!(resolver.set_tenant_id("tenant-b").is_err());
        // Memory still holds the last consistently persisted value
        assert_eq!(resolver.cached_tenant().as_deref(), Some("tenant-a"));
    }
}
