use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use redis::Client;

use crate::{
    db::WatchlistStore,
    error::AppResult,
    models::{MovieId, WatchlistEntry},
};

/// Creates a Redis client for the watchlist store
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Watchlist persisted as a single Redis hash
///
/// Each field is a movie identifier and its value the display title, so a
/// hash gives one entry per identifier for free. Writes are issued directly
/// on the multiplexed connection; nothing is queued in the background.
#[derive(Clone)]
pub struct RedisWatchlistStore {
    conn: ConnectionManager,
    key: String,
}

impl RedisWatchlistStore {
    /// Connects to Redis and binds the store to the hash at `key`
    pub async fn connect(client: Client, key: impl Into<String>) -> AppResult<Self> {
        let conn = ConnectionManager::new(client).await?;
        let key = key.into();

        tracing::info!(hash = %key, "Connected watchlist store to Redis");

        Ok(Self { conn, key })
    }
}

#[async_trait::async_trait]
impl WatchlistStore for RedisWatchlistStore {
    async fn get(&self, id: &MovieId) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        let title: Option<String> = conn.hget(&self.key, id.as_str()).await?;
        Ok(title)
    }

    async fn set(&self, entry: WatchlistEntry) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.hset(&self.key, entry.id.as_str(), entry.title).await?;
        Ok(())
    }

    async fn remove(&self, id: &MovieId) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.hdel(&self.key, id.as_str()).await?;
        Ok(())
    }

    async fn keys(&self) -> AppResult<Vec<MovieId>> {
        let mut conn = self.conn.clone();
        let fields: Vec<String> = conn.hkeys(&self.key).await?;
        let mut keys: Vec<MovieId> = fields.into_iter().map(MovieId).collect();
        keys.sort();
        Ok(keys)
    }

    async fn is_empty(&self) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let len: usize = conn.hlen(&self.key).await?;
        Ok(len == 0)
    }

    async fn add_if_absent(&self, entry: WatchlistEntry) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let written: bool = conn
            .hset_nx(&self.key, entry.id.as_str(), entry.title)
            .await?;
        Ok(written)
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_store(key: &str) -> (RedisWatchlistStore, Client) {
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let client = create_redis_client(&redis_url).unwrap();
        let store = RedisWatchlistStore::connect(client.clone(), key)
            .await
            .unwrap();
        (store, client)
    }

    async fn cleanup(client: &Client, key: &str) {
        let mut conn = client.get_multiplexed_async_connection().await.unwrap();
        let _: () = conn.del(key).await.unwrap();
    }

    #[test]
    fn test_create_redis_client_rejects_bad_url() {
        assert!(create_redis_client("not a url").is_err());
    }

    #[tokio::test]
    #[ignore = "requires a running Redis"]
    async fn test_set_get_remove_roundtrip() {
        let key = "watchlist_test_roundtrip";
        let (store, client) = create_test_store(key).await;
        let id = MovieId::new("tt0372784");

        store
            .set(WatchlistEntry::new(id.clone(), "Batman Begins"))
            .await
            .unwrap();
        assert_eq!(
            store.get(&id).await.unwrap().as_deref(),
            Some("Batman Begins")
        );
        assert!(!store.is_empty().await.unwrap());

        store.remove(&id).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), None);
        assert!(store.is_empty().await.unwrap());

        cleanup(&client, key).await;
    }

    #[tokio::test]
    #[ignore = "requires a running Redis"]
    async fn test_add_if_absent_is_idempotent() {
        let key = "watchlist_test_add_if_absent";
        let (store, client) = create_test_store(key).await;
        let id = MovieId::new("tt0096895");

        assert!(store
            .add_if_absent(WatchlistEntry::new(id.clone(), "Batman"))
            .await
            .unwrap());
        assert!(!store
            .add_if_absent(WatchlistEntry::new(id.clone(), "Batman (1989)"))
            .await
            .unwrap());

        assert_eq!(store.keys().await.unwrap(), vec![id.clone()]);
        assert_eq!(store.get(&id).await.unwrap().as_deref(), Some("Batman"));

        cleanup(&client, key).await;
    }
}
