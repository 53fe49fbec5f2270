use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    db::WatchlistStore,
    error::{AppError, AppResult},
    models::{MovieId, WatchlistEntry},
    services::{
        providers::{self, MovieProvider},
        render::{added_label_html, Container, Fragment, PageMode, Renderer},
    },
};

/// Payload posted by the page's delegated click listener
///
/// Mirrors the attributes bound on the clicked control. Clicks on anything
/// that is not a watchlist control arrive without an identifier.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct WatchlistEvent {
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub remove: bool,
}

/// Action decoded from a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchlistAction {
    Add(WatchlistEntry),
    Remove(MovieId),
}

impl WatchlistAction {
    /// Decodes an event; `Ok(None)` when the click was not on a watchlist control
    pub fn from_event(event: WatchlistEvent) -> AppResult<Option<Self>> {
        let Some(id) = event.imdb_id.filter(|id| !id.trim().is_empty()) else {
            return Ok(None);
        };
        let id = MovieId::new(id);

        if event.remove {
            return Ok(Some(WatchlistAction::Remove(id)));
        }

        let title = event.title.ok_or_else(|| {
            AppError::InvalidInput(format!("Add event for {} carries no title", id))
        })?;

        Ok(Some(WatchlistAction::Add(WatchlistEntry::new(id, title))))
    }
}

/// Result of handling one click
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Not a watchlist control
    Ignored,
    /// Entry persisted; the clicked control's container becomes this label
    Added { id: MovieId, label_html: String },
    /// Identifier was already on the watchlist; nothing changed
    AlreadyAdded,
    /// Entry deleted and the watchlist page rebuilt from the store
    Removed { page: Container },
}

/// Watchlist page rendering and mutation handling
#[derive(Clone)]
pub struct WatchlistService {
    provider: Arc<dyn MovieProvider>,
    store: Arc<dyn WatchlistStore>,
    renderer: Renderer,
}

impl WatchlistService {
    pub fn new(
        provider: Arc<dyn MovieProvider>,
        store: Arc<dyn WatchlistStore>,
        renderer: Renderer,
    ) -> Self {
        Self {
            provider,
            store,
            renderer,
        }
    }

    /// Rebuilds the watchlist page from durable storage
    ///
    /// An empty store yields the empty-state placeholder without touching the
    /// network. Otherwise every identifier is looked up concurrently and
    /// lookups that fail are left out of the page.
    pub async fn render_page(&self) -> AppResult<Container> {
        let mut container = Container::new();
        let ids = self.store.keys().await?;

        if ids.is_empty() {
            container.show_placeholder(Fragment::EmptyWatchlist);
            return Ok(container);
        }

        let movies = providers::fetch_by_ids(self.provider.as_ref(), &ids).await;

        tracing::info!(
            stored = ids.len(),
            rendered = movies.len(),
            store = self.store.name(),
            "Watchlist page rendered"
        );

        self.renderer
            .render_movies(
                movies,
                PageMode::Watchlist,
                self.store.as_ref(),
                &mut container,
            )
            .await;

        Ok(container)
    }

    /// Applies one delegated click
    pub async fn handle(&self, event: WatchlistEvent) -> AppResult<MutationOutcome> {
        match WatchlistAction::from_event(event)? {
            None => Ok(MutationOutcome::Ignored),
            Some(WatchlistAction::Add(entry)) => self.add(entry).await,
            Some(WatchlistAction::Remove(id)) => self.remove(id).await,
        }
    }

    async fn add(&self, entry: WatchlistEntry) -> AppResult<MutationOutcome> {
        let id = entry.id.clone();
        let label_html = added_label_html(&entry.id, &entry.title);

        if !self.store.add_if_absent(entry).await? {
            tracing::debug!(imdb_id = %id, "Movie already on watchlist");
            return Ok(MutationOutcome::AlreadyAdded);
        }

        tracing::info!(imdb_id = %id, "Added movie to watchlist");

        Ok(MutationOutcome::Added { id, label_html })
    }

    async fn remove(&self, id: MovieId) -> AppResult<MutationOutcome> {
        self.store.remove(&id).await?;

        tracing::info!(imdb_id = %id, "Removed movie from watchlist");

        let page = self.render_page().await?;
        Ok(MutationOutcome::Removed { page })
    }
}
