mod api;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riptide_core::{
    load_config, validate_config, HttpMetadataResolver, ImdbClient, IndexSearcher,
    MetadataResolver, Searcher, StreamResolver, TitleProvider, TmdbClient,
};

use api::create_router;
use state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("RIPTIDE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Torrent index: {}", config.index.base_url);

    // Title providers: IMDb is always available, TMDB only when configured
    let imdb: Arc<dyn TitleProvider> = Arc::new(
        ImdbClient::new(config.titles.imdb.clone()).context("Failed to create IMDb client")?,
    );

    let tmdb: Option<Arc<dyn TitleProvider>> = match &config.titles.tmdb {
        Some(tmdb_config) => match TmdbClient::new(tmdb_config.clone()) {
            Ok(client) => {
                info!("TMDB title provider initialized");
                Some(Arc::new(client))
            }
            Err(e) => {
                error!("Failed to create TMDB client: {}", e);
                None
            }
        },
        None => {
            info!("TMDB not configured; tmdb: ids will resolve to empty results");
            None
        }
    };

    // Search and metadata clients share the index session credential
    let searcher: Arc<dyn Searcher> = Arc::new(IndexSearcher::new(config.index.clone()));
    let metadata: Arc<dyn MetadataResolver> = Arc::new(HttpMetadataResolver::new(
        &config.index,
        config.resolver.fetch_timeout_secs,
    ));

    let resolver = Arc::new(StreamResolver::new(
        imdb,
        tmdb,
        searcher,
        metadata,
        config.resolver.clone(),
    ));
    info!(
        max_parallel_fetches = config.resolver.max_parallel_fetches,
        "Stream resolver initialized"
    );

    // Create app state and router
    let state = Arc::new(AppState::new(config.clone(), resolver));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);
    info!("Manifest available at http://{}/manifest.json", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
