use anyhow::{Context, Result};
use paddock::api::{create_animal_router, create_grid_router, AnimalAppState, GridAppState};
use paddock::config::{load_config, PaddockConfig};
use paddock::feed::FeedClient;
use paddock::reconcile::Reconciler;
use paddock::snapshot::manager::SnapshotManager;
use paddock::snapshot::recovery;
use paddock::store::ZooStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paddock=info".into()),
        )
        .init();

    info!("Paddock starting...");

    // Load configuration (PADDOCK_CONFIG points at a TOML file; defaults otherwise)
    let config = match std::env::var("PADDOCK_CONFIG") {
        Ok(path) => load_config(&path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to load config from {}", path))?,
        Err(_) => PaddockConfig::default(),
    };

    info!(
        feed_url = %config.feed.url,
        poll_interval_seconds = config.feed.poll_interval_seconds,
        bind_addr = %config.api.bind_addr,
        snapshots_enabled = config.snapshot.enabled,
        "Configuration loaded"
    );

    // Initialize store, recovering the last merged state if a snapshot exists
    let store = Arc::new(ZooStore::new());
    if config.snapshot.enabled {
        if let Some(snapshot) = recovery::load_latest_snapshot(&config.snapshot.directory)
            .context("Snapshot recovery failed")?
        {
            store.load_from_snapshot(snapshot.animals, snapshot.maintenance);
        }
    }

    // Feed reconciler: one pass immediately, then one per poll interval
    let feed = FeedClient::new(&config.feed).context("Failed to initialize feed client")?;
    let snapshots = SnapshotManager::new(Arc::clone(&store), config.snapshot.clone());
    let reconciler = Arc::new(Reconciler::new(
        Arc::clone(&store),
        feed,
        snapshots,
        config.feed.poll_interval_seconds,
    ));

    let reconciler_handle = {
        let reconciler = Arc::clone(&reconciler);
        tokio::spawn(async move {
            if let Err(e) = reconciler.run_poll_loop().await {
                error!(error = %e, "Feed reconciler loop terminated");
            }
        })
    };

    // HTTP API
    let router = create_grid_router(Arc::new(GridAppState {
        store: Arc::clone(&store),
    }))
    .merge(create_animal_router(Arc::new(AnimalAppState {
        store: Arc::clone(&store),
    })))
    .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.api.bind_addr)
        .await
        .context("Failed to bind API address")?;
    info!(addr = %config.api.bind_addr, "API listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!(error = %e, "API server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    server_handle.abort();
    reconciler_handle.abort();
    info!("Paddock stopped");

    Ok(())
}
