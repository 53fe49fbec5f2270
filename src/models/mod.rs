use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

mod watchlist;

pub use watchlist::WatchlistEntry;

/// IMDB identifier of a movie (e.g., "tt0372784")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Full movie metadata as returned by an OMDb `t=` or `i=` lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    #[serde(rename = "imdbID")]
    pub id: MovieId,
    #[serde(rename = "Title")]
    pub title: String,
    /// Poster URL, or the sentinel "N/A"
    #[serde(rename = "Poster", default, deserialize_with = "empty_as_none")]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default, deserialize_with = "empty_as_none")]
    pub rating: Option<String>,
    #[serde(rename = "Runtime", default, deserialize_with = "empty_as_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default, deserialize_with = "empty_as_none")]
    pub genre: Option<String>,
    #[serde(rename = "Plot", default, deserialize_with = "empty_as_none")]
    pub plot: Option<String>,
}

/// Abbreviated hit from an OMDb `s=` keyword search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchStub {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub id: Option<MovieId>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
}

/// Body of an OMDb keyword search
#[derive(Debug, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchStub>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
