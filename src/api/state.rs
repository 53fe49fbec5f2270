use std::sync::Arc;

use crate::{
    db::WatchlistStore,
    services::{
        providers::MovieProvider, render::Renderer, SearchOrchestrator, SearchResults,
        WatchlistService,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub search: SearchOrchestrator,
    pub watchlist: WatchlistService,
    pub renderer: Renderer,
}

impl AppState {
    /// Wires the search and watchlist services over one provider and store
    pub fn new(
        provider: Arc<dyn MovieProvider>,
        store: Arc<dyn WatchlistStore>,
        renderer: Renderer,
    ) -> Self {
        Self {
            search: SearchOrchestrator::new(
                provider.clone(),
                store.clone(),
                renderer.clone(),
                Arc::new(SearchResults::new()),
            ),
            watchlist: WatchlistService::new(provider, store, renderer.clone()),
            renderer,
        }
    }
}
