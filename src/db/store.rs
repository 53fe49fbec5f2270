use crate::{
    error::AppResult,
    models::{MovieId, WatchlistEntry},
};

/// Durable key-value store holding the watchlist
///
/// Keys are movie identifiers, values are display titles. The store is the
/// watchlist itself: there is no separate index, so enumerating the keys
/// enumerates the watchlist. Every write goes straight to the backend.
#[async_trait::async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Title stored for an identifier, if any
    async fn get(&self, id: &MovieId) -> AppResult<Option<String>>;

    /// Stores `id → title`, overwriting any previous title
    async fn set(&self, entry: WatchlistEntry) -> AppResult<()>;

    /// Removes an identifier; removing an absent key is not an error
    async fn remove(&self, id: &MovieId) -> AppResult<()>;

    /// All persisted identifiers, sorted
    async fn keys(&self) -> AppResult<Vec<MovieId>>;

    async fn contains(&self, id: &MovieId) -> AppResult<bool> {
        Ok(self.get(id).await?.is_some())
    }

    async fn is_empty(&self) -> AppResult<bool> {
        Ok(self.keys().await?.is_empty())
    }

    /// Stores the entry only if its identifier is not already present
    ///
    /// Returns `true` when the entry was written.
    async fn add_if_absent(&self, entry: WatchlistEntry) -> AppResult<bool> {
        if self.contains(&entry.id).await? {
            return Ok(false);
        }
        self.set(entry).await?;
        Ok(true)
    }

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
