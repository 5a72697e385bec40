use std::sync::Arc;

use mnemo::api;
use mnemo::config::AppConfig;
use mnemo::fetch::HttpPageFetcher;
use mnemo::seed::seed_demo_data;
use mnemo::state::AppState;
use mnemo::store::{DocumentStore, MemoryDocumentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mnemo=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting mnemo server...");

    let config = AppConfig::from_env();

    // Build the document store, loading a snapshot if one is configured
    let store: Arc<dyn DocumentStore> = match &config.snapshot_path {
        Some(path) => {
            tracing::info!("Using snapshot file {}", path.display());
            Arc::new(MemoryDocumentStore::with_snapshot(path.clone())?)
        }
        None => Arc::new(MemoryDocumentStore::new()),
    };

    if config.demo_mode {
        seed_demo_data(store.as_ref()).await?;
    }

    let fetcher = Arc::new(HttpPageFetcher::new(config.fetch_timeout)?);

    let app_state = AppState {
        store,
        fetcher,
        config: config.clone(),
    };

    let app = api::router(app_state);

    // Start the server
    tracing::info!("Listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
