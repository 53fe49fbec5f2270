use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    db::WatchlistStore,
    models::{MovieId, MovieRecord},
    services::{
        providers::{self, MovieProvider},
        render::{Container, Fragment, PageMode, Renderer},
    },
};

/// The search page's results element
///
/// Every search invocation takes the next generation number. A batch is only
/// published if no newer search has started since, so a slow response can
/// never overwrite the results of a later query.
#[derive(Default)]
pub struct SearchResults {
    latest: AtomicU64,
    container: RwLock<Container>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }

    /// Replaces the container with a finished batch unless it went stale
    async fn publish(&self, generation: u64, container: Container) -> bool {
        let mut current = self.container.write().await;
        if !self.is_current(generation) {
            return false;
        }
        *current = container;
        true
    }

    pub async fn snapshot(&self) -> Container {
        self.container.read().await.clone()
    }
}

/// Per-invocation search context
///
/// Holds the dedup set and the container being filled. Built fresh for every
/// search and dropped once the batch is published.
pub struct SearchSession {
    generation: u64,
    seen: HashSet<MovieId>,
    container: Container,
}

impl SearchSession {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            seen: HashSet::new(),
            container: Container::new(),
        }
    }

    /// Records the identifier; `false` if this pass already rendered it
    fn admit(&mut self, movie: &MovieRecord) -> bool {
        self.seen.insert(movie.id.clone())
    }
}

/// What a search invocation did to the results container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query: nothing requested, container untouched
    Ignored,
    /// Coarse search failed or matched nothing; placeholder shown
    NoResults,
    /// Batch rendered with this many distinct movies
    Rendered(usize),
    /// A newer search started before this one settled; batch discarded
    Stale,
}

/// Runs keyword search, enrichment and dedup, then renders the batch
#[derive(Clone)]
pub struct SearchOrchestrator {
    provider: Arc<dyn MovieProvider>,
    store: Arc<dyn WatchlistStore>,
    renderer: Renderer,
    results: Arc<SearchResults>,
}

impl SearchOrchestrator {
    pub fn new(
        provider: Arc<dyn MovieProvider>,
        store: Arc<dyn WatchlistStore>,
        renderer: Renderer,
        results: Arc<SearchResults>,
    ) -> Self {
        Self {
            provider,
            store,
            renderer,
            results,
        }
    }

    pub fn results(&self) -> &Arc<SearchResults> {
        &self.results
    }

    /// The published results with every control checked against the store
    pub async fn current_results(&self) -> Container {
        let mut container = self.results.snapshot().await;
        self.renderer
            .refresh_controls(&mut container, self.store.as_ref())
            .await;
        container
    }

    pub async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Ignored;
        }

        let mut session = SearchSession::new(self.results.begin());

        let stubs = match self.provider.search_by_keyword(query).await {
            Ok(stubs) => stubs,
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Search error");
                Vec::new()
            }
        };

        if stubs.is_empty() {
            session.container.show_placeholder(Fragment::NoResults);
            return self.finish(query, session, SearchOutcome::NoResults).await;
        }

        let movies = providers::fetch_by_titles(self.provider.as_ref(), &stubs).await;

        for movie in movies {
            if !session.admit(&movie) {
                tracing::debug!(imdb_id = %movie.id, "Dropping duplicate search result");
                continue;
            }
            self.renderer
                .render_movie(
                    movie,
                    PageMode::Search,
                    self.store.as_ref(),
                    &mut session.container,
                )
                .await;
        }

        let rendered = session.seen.len();
        self.finish(query, session, SearchOutcome::Rendered(rendered))
            .await
    }

    async fn finish(
        &self,
        query: &str,
        session: SearchSession,
        outcome: SearchOutcome,
    ) -> SearchOutcome {
        let generation = session.generation;
        if !self.results.publish(generation, session.container).await {
            tracing::info!(query = %query, generation, "Discarding stale search batch");
            return SearchOutcome::Stale;
        }

        tracing::info!(query = %query, generation, outcome = ?outcome, "Search rendered");
        outcome
    }
}
