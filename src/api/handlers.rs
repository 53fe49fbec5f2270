use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    services::{MutationOutcome, WatchlistEvent},
};

use super::pages::{self, Page};
use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Which part of the page the client should replace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Swap {
    /// Leave the page untouched
    None,
    /// Replace the clicked control's container
    Control,
    /// Replace the whole watchlist container
    Page,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventResponse {
    pub swap: Swap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Search page with the latest published results
pub async fn search_page(State(state): State<AppState>) -> Html<String> {
    let results = state.search.current_results().await;
    Html(pages::shell(Page::Search, &state.renderer.container_html(&results)))
}

/// Search submission; answers with the results container markup
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> Html<String> {
    let outcome = state.search.search(&params.q).await;

    tracing::info!(
        request_id = %request_id,
        query = %params.q.trim(),
        outcome = ?outcome,
        "Processed search submission"
    );

    let results = state.search.current_results().await;
    Html(state.renderer.container_html(&results))
}

/// Watchlist page rebuilt from the store
pub async fn watchlist_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = state.watchlist.render_page().await?;
    Ok(Html(pages::shell(
        Page::Watchlist,
        &state.renderer.container_html(&page),
    )))
}

/// Watchlist container markup only
pub async fn watchlist_items(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = state.watchlist.render_page().await?;
    Ok(Html(state.renderer.container_html(&page)))
}

/// Delegated click on a watchlist control
pub async fn watchlist_event(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(event): Json<WatchlistEvent>,
) -> AppResult<Json<EventResponse>> {
    let outcome = state.watchlist.handle(event).await?;

    tracing::debug!(request_id = %request_id, outcome = ?outcome, "Processed watchlist event");

    let response = match outcome {
        MutationOutcome::Ignored | MutationOutcome::AlreadyAdded => EventResponse {
            swap: Swap::None,
            html: None,
        },
        MutationOutcome::Added { label_html, .. } => EventResponse {
            swap: Swap::Control,
            html: Some(label_html),
        },
        MutationOutcome::Removed { page } => EventResponse {
            swap: Swap::Page,
            html: Some(state.renderer.container_html(&page)),
        },
    };

    Ok(Json(response))
}
