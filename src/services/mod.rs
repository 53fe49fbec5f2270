pub mod providers;
pub mod render;
pub mod search;
pub mod watchlist;

pub use search::{SearchOrchestrator, SearchOutcome, SearchResults};
pub use watchlist::{MutationOutcome, WatchlistEvent, WatchlistService};
