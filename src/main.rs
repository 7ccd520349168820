use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hub_docs::cli::load_catalog;
use hub_docs::config::config;
use hub_docs::handlers::{app, DocsState};
use hub_docs::services::{HubDiscovery, HubInspector};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so HUBDOCS_* settings apply under cargo run
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config();
    let catalog = load_catalog(config.server.catalog_path.as_deref())?;
    let hub_count = catalog.discover().len();

    let inspector = Arc::new(HubInspector::new(catalog.types()));
    let state = DocsState::new(inspector, Arc::new(catalog), config.docs.clone());
    let app = app(state, config.server.enable_cors);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(
        "Hub docs listening on http://{}{} ({} hubs)",
        bind_addr,
        config.docs.normalized_prefix(),
        hub_count
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
