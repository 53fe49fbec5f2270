use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use movie_watchlist::{
    api::{create_router, AppState},
    config::{Config, StoreBackend},
    db::{create_redis_client, InMemoryWatchlistStore, RedisWatchlistStore, WatchlistStore},
    services::{providers::OmdbProvider, render::Renderer},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_watchlist=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn WatchlistStore> = match config.store_backend {
        StoreBackend::Redis => {
            let client = create_redis_client(&config.redis_url)?;
            Arc::new(RedisWatchlistStore::connect(client, config.watchlist_key.clone()).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory watchlist; entries are lost on exit");
            Arc::new(InMemoryWatchlistStore::new())
        }
    };

    let provider = Arc::new(OmdbProvider::new(
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
    ));

    let state = AppState::new(provider, store, Renderer::new(config.fallback_poster.clone()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Watchlist running");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
