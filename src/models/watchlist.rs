use serde::{Deserialize, Serialize};

use super::MovieId;

/// A persisted watchlist entry: movie identifier and the title shown for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub id: MovieId,
    pub title: String,
}

impl WatchlistEntry {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}
