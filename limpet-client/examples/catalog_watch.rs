//! Resolve the tenant, pull a snapshot and print live catalog updates.
//!
//! ```sh
//! LIMPET_API_BASE=https://api.example.com cargo run --example catalog_watch
//! ```

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use limpet_client::{
    AdminApi, CatalogSnapshotLoader, CatalogSyncClient, ClientConfig, TenantResolver,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let api = AdminApi::new(&config)?;

    let resolver = TenantResolver::new(&config, api.clone())?;
    let tenant_id = resolver.resolve().await?;
    tracing::info!(tenant_id = %tenant_id, "tenant resolved");

    let loader = Arc::new(CatalogSnapshotLoader::new(&config, api));
    let snapshot = loader.load(&tenant_id).await;
    tracing::info!(
        store = %snapshot.store_name,
        products = snapshot.products.len(),
        "initial snapshot loaded"
    );
    for product in &snapshot.products {
        println!("  {} — {}", product.name, product.effective_money());
    }

    let sync = CatalogSyncClient::new(&config);
    sync.connect(&tenant_id);

    let shutdown = CancellationToken::new();
    let worker = Arc::clone(&loader).watch_updates(&sync, &tenant_id, shutdown.clone());

    let mut events = sync.subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Ok(event) => tracing::info!(kind = ?event.kind, "update received"),
                Err(_) => break,
            }
        }
    }

    shutdown.cancel();
    sync.dispose();
    let _ = worker.await;
    Ok(())
}
