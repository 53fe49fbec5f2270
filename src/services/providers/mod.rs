//! Movie metadata provider abstraction
//!
//! A provider answers the three query shapes the watchlist needs: keyword
//! search returning abbreviated stubs, and full lookups by exact title or by
//! identifier. All three are restricted to movies.
use futures::future::join_all;
use tracing::instrument;

use crate::{
    error::AppResult,
    models::{MovieId, MovieRecord, SearchStub},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for movie metadata providers
///
/// Implementations must report application-level errors carried inside a
/// successful HTTP response as `Err`, the same as transport failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Coarse keyword search
    ///
    /// Returns lightweight stubs which may lack everything but a title.
    async fn search_by_keyword(&self, query: &str) -> AppResult<Vec<SearchStub>>;

    /// Full metadata for the best match of an exact title
    async fn fetch_by_title(&self, title: &str) -> AppResult<MovieRecord>;

    /// Full metadata for an identifier
    async fn fetch_by_id(&self, id: &MovieId) -> AppResult<MovieRecord>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Enriches every stub with a title lookup, concurrently
///
/// All lookups are awaited together; the result keeps stub order and drops
/// every lookup that failed.
#[instrument(skip_all, fields(provider = provider.name(), stubs = stubs.len()))]
pub async fn fetch_by_titles(provider: &dyn MovieProvider, stubs: &[SearchStub]) -> Vec<MovieRecord> {
    let lookups = stubs.iter().map(|stub| async move {
        provider
            .fetch_by_title(&stub.title)
            .await
            .map_err(|e| {
                tracing::error!(title = %stub.title, error = %e, "Enrichment lookup failed");
                e
            })
            .ok()
    });

    collect_settled(join_all(lookups).await)
}

/// Fetches full metadata for every identifier, concurrently
///
/// Same settle-then-collect behavior as [`fetch_by_titles`].
#[instrument(skip_all, fields(provider = provider.name(), ids = ids.len()))]
pub async fn fetch_by_ids(provider: &dyn MovieProvider, ids: &[MovieId]) -> Vec<MovieRecord> {
    let lookups = ids.iter().map(|id| async move {
        provider
            .fetch_by_id(id)
            .await
            .map_err(|e| {
                tracing::error!(imdb_id = %id, error = %e, "Detail lookup failed");
                e
            })
            .ok()
    });

    collect_settled(join_all(lookups).await)
}

fn collect_settled(settled: Vec<Option<MovieRecord>>) -> Vec<MovieRecord> {
    let attempted = settled.len();
    let movies: Vec<MovieRecord> = settled.into_iter().flatten().collect();

    if movies.len() < attempted {
        tracing::warn!(
            success_count = movies.len(),
            error_count = attempted - movies.len(),
            "Partial movie fetch failure"
        );
    }

    movies
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{MovieId, MovieRecord, SearchStub};

    pub fn movie(id: &str, title: &str) -> MovieRecord {
        MovieRecord {
            id: MovieId::new(id),
            title: title.to_string(),
            poster: Some(format!("https://img.example/{}.jpg", id)),
            rating: Some("7.5".to_string()),
            runtime: Some("120 min".to_string()),
            genre: Some("Action".to_string()),
            plot: Some(format!("The plot of {}.", title)),
        }
    }

    pub fn stub(title: &str) -> SearchStub {
        SearchStub {
            title: title.to_string(),
            year: None,
            id: None,
            kind: Some("movie".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{movie, stub};
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_fetch_by_titles_keeps_order_and_drops_failures() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_fetch_by_title()
            .returning(|title| match title {
                "Batman" => Ok(movie("tt0096895", "Batman")),
                "Batman Begins" => Ok(movie("tt0372784", "Batman Begins")),
                _ => Err(AppError::ExternalApi("Movie not found!".to_string())),
            });

        let stubs = vec![stub("Batman"), stub("Batman: Unknown"), stub("Batman Begins")];
        let movies = fetch_by_titles(&provider, &stubs).await;

        let ids: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["tt0096895", "tt0372784"]);
    }

    #[tokio::test]
    async fn test_fetch_by_ids_issues_one_lookup_per_id() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_fetch_by_id()
            .times(2)
            .returning(|id| Ok(movie(id.as_str(), "Some Movie")));

        let ids = vec![MovieId::new("tt0096895"), MovieId::new("tt0372784")];
        let movies = fetch_by_ids(&provider, &ids).await;

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, ids[0]);
        assert_eq!(movies[1].id, ids[1]);
    }

    #[tokio::test]
    async fn test_fetch_by_ids_all_failing_yields_empty() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_fetch_by_id()
            .returning(|_| Err(AppError::ExternalApi("Incorrect IMDb ID.".to_string())));

        let movies = fetch_by_ids(&provider, &[MovieId::new("tt0000000")]).await;
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_issues_no_requests() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider.expect_fetch_by_id().never();

        let movies = fetch_by_ids(&provider, &[]).await;
        assert!(movies.is_empty());
    }
}
