use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{
    db::WatchlistStore,
    error::AppResult,
    models::{MovieId, WatchlistEntry},
};

/// Process-local watchlist store
///
/// Used by tests and by the `memory` backend. Entries live as long as the
/// process does.
#[derive(Default)]
pub struct InMemoryWatchlistStore {
    entries: RwLock<HashMap<MovieId, String>>,
}

impl InMemoryWatchlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries
    pub fn with_entries(entries: impl IntoIterator<Item = WatchlistEntry>) -> Self {
        let entries = entries.into_iter().map(|e| (e.id, e.title)).collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait::async_trait]
impl WatchlistStore for InMemoryWatchlistStore {
    async fn get(&self, id: &MovieId) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn set(&self, entry: WatchlistEntry) -> AppResult<()> {
        self.entries.write().await.insert(entry.id, entry.title);
        Ok(())
    }

    async fn remove(&self, id: &MovieId) -> AppResult<()> {
        self.entries.write().await.remove(id);
        Ok(())
    }

    async fn keys(&self) -> AppResult<Vec<MovieId>> {
        let mut keys: Vec<MovieId> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn add_if_absent(&self, entry: WatchlistEntry) -> AppResult<bool> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.id) {
            return Ok(false);
        }
        entries.insert(entry.id, entry.title);
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
