//! OMDb API provider
//!
//! All three lookups hit the same endpoint and differ only by query
//! parameter:
//! 1. Keyword search: `s=<query>` → `{"Search": [stub, ...]}`
//! 2. Title lookup: `t=<title>` → full record
//! 3. Identifier lookup: `i=<imdb id>` → full record
//!
//! Every request is restricted to `type=movie`. OMDb reports lookup failures
//! as `{"Response": "False", "Error": "..."}` with a 200 status, so the body is
//! checked for an `Error` field after every request.
use crate::{
    error::{AppError, AppResult},
    models::{MovieId, MovieRecord, OmdbSearchResponse, SearchStub},
    services::providers::MovieProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const MOVIE_TYPE: &str = "movie";

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// Issues one OMDb request and returns the raw body of a 2xx response
    async fn request(&self, params: &[(&str, &str)]) -> AppResult<String> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("apikey", self.api_key.as_str()), ("type", MOVIE_TYPE)])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.text().await?)
    }
}

/// Decodes an OMDb body, surfacing the in-band `Error` field as an error
fn parse_omdb<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, response = %body, "Failed to parse OMDb response");
        AppError::ExternalApi(format!("Failed to parse OMDb response: {}", e))
    })?;

    let Some(object) = value.as_object() else {
        tracing::error!(response = %body, "OMDb response is not a JSON object");
        return Err(AppError::ExternalApi(
            "Unexpected OMDb response shape: expected an object".to_string(),
        ));
    };

    if let Some(error) = object.get("Error").and_then(serde_json::Value::as_str) {
        return Err(AppError::ExternalApi(format!("Movie API error: {}", error)));
    }

    if object.get("Response").and_then(serde_json::Value::as_str) == Some("False") {
        return Err(AppError::ExternalApi(
            "Movie API error: request was not successful".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::ExternalApi(format!("Unexpected OMDb response shape: {}", e)))
}

#[async_trait::async_trait]
impl MovieProvider for OmdbProvider {
    async fn search_by_keyword(&self, query: &str) -> AppResult<Vec<SearchStub>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let body = self.request(&[("s", query)]).await?;
        let response: OmdbSearchResponse = parse_omdb(&body)?;

        tracing::info!(
            query = %query,
            results = response.search.len(),
            provider = "omdb",
            "Keyword search completed"
        );

        Ok(response.search)
    }

    async fn fetch_by_title(&self, title: &str) -> AppResult<MovieRecord> {
        let body = self.request(&[("t", title)]).await?;
        let movie: MovieRecord = parse_omdb(&body)?;

        tracing::debug!(title = %title, imdb_id = %movie.id, "Title lookup completed");

        Ok(movie)
    }

    async fn fetch_by_id(&self, id: &MovieId) -> AppResult<MovieRecord> {
        let body = self.request(&[("i", id.as_str())]).await?;
        let movie: MovieRecord = parse_omdb(&body)?;

        tracing::debug!(imdb_id = %id, "Identifier lookup completed");

        Ok(movie)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
