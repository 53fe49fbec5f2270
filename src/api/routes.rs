use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Search page
        .route("/", get(handlers::search_page))
        .route("/search", get(handlers::search))
        // Watchlist page
        .route("/watchlist", get(handlers::watchlist_page))
        .route("/watchlist/items", get(handlers::watchlist_items))
        .route("/watchlist/events", post(handlers::watchlist_event))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}
