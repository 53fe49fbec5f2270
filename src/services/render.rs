use crate::{
    db::WatchlistStore,
    models::{MovieId, MovieRecord},
};

const POSTER_SENTINEL: &str = "N/A";
const MISSING_FIELD: &str = "N/A";
const MISSING_PLOT: &str = "No plot available.";

/// Which page a movie is being rendered onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Search results: items get an "add" control
    Search,
    /// Watchlist page: items get a "remove" control
    Watchlist,
}

/// Watchlist control rendered next to a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Add,
    /// Static label for a movie already on the watchlist
    Added,
    Remove,
}

/// A movie placed into a container together with its control
#[derive(Debug, Clone, PartialEq)]
pub struct MovieItem {
    pub record: MovieRecord,
    pub control: Control,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Movie(MovieItem),
    NoResults,
    EmptyWatchlist,
}

/// Target element that rendered fragments are appended to
///
/// Appending never clears; callers clear once before a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    fragments: Vec<Fragment>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Replaces the whole content with a single placeholder
    pub fn show_placeholder(&mut self, placeholder: Fragment) {
        self.fragments.clear();
        self.fragments.push(placeholder);
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn movies(&self) -> impl Iterator<Item = &MovieItem> {
        self.fragments.iter().filter_map(|fragment| match fragment {
            Fragment::Movie(item) => Some(item),
            _ => None,
        })
    }

    pub fn movies_mut(&mut self) -> impl Iterator<Item = &mut MovieItem> {
        self.fragments.iter_mut().filter_map(|fragment| match fragment {
            Fragment::Movie(item) => Some(item),
            _ => None,
        })
    }
}

/// Maps movie records to HTML fragments
#[derive(Debug, Clone)]
pub struct Renderer {
    fallback_poster: String,
}

impl Renderer {
    pub fn new(fallback_poster: impl Into<String>) -> Self {
        Self {
            fallback_poster: fallback_poster.into(),
        }
    }

    /// Renders one movie into `container`
    ///
    /// In search mode the store is consulted for this item right now, so a
    /// movie already on the watchlist gets the static "Added" label.
    pub async fn render_movie(
        &self,
        record: MovieRecord,
        mode: PageMode,
        store: &dyn WatchlistStore,
        container: &mut Container,
    ) {
        let control = control_for(&record.id, mode, store).await;
        container.append(Fragment::Movie(MovieItem { record, control }));
    }

    /// Re-derives every search item's control from the store
    ///
    /// Controls held in a container are only as fresh as the render that
    /// produced them; the watchlist may have changed since.
    pub async fn refresh_controls(&self, container: &mut Container, store: &dyn WatchlistStore) {
        for item in container.movies_mut() {
            if item.control != Control::Remove {
                item.control = control_for(&item.record.id, PageMode::Search, store).await;
            }
        }
    }

    /// Renders a batch in order
    pub async fn render_movies(
        &self,
        records: Vec<MovieRecord>,
        mode: PageMode,
        store: &dyn WatchlistStore,
        container: &mut Container,
    ) {
        for record in records {
            self.render_movie(record, mode, store, container).await;
        }
    }

    pub fn poster_src<'a>(&'a self, poster: Option<&'a str>) -> &'a str {
        match poster {
            Some(url) if url != POSTER_SENTINEL => url,
            _ => &self.fallback_poster,
        }
    }

    pub fn container_html(&self, container: &Container) -> String {
        container
            .fragments()
            .iter()
            .map(|fragment| self.fragment_html(fragment))
            .collect()
    }

    pub fn fragment_html(&self, fragment: &Fragment) -> String {
        match fragment {
            Fragment::Movie(item) => self.movie_html(item),
            Fragment::NoResults => no_results_html(),
            Fragment::EmptyWatchlist => empty_watchlist_html(),
        }
    }

    pub fn movie_html(&self, item: &MovieItem) -> String {
        let movie = &item.record;
        let title = escape(&movie.title);
        let poster = escape(self.poster_src(movie.poster.as_deref()));
        let fallback = escape(&self.fallback_poster);

        format!(
            r#"
<div class="movie-item">
  <img class="movie-poster"
    src="{poster}"
    onerror="this.src='{fallback}'; this.onerror=null;"
    alt="{title} poster"/>
  <div class="movie-details">
    <div class="movie-row-1">
      <h3>{title}</h3>
      <i class="fa fa-star"></i>
      <h4 class="rating">{rating}</h4>
    </div>
    <div class="movie-row-2">
      <h4>{runtime}</h4>
      <h4>{genre}</h4>
      <div class="watchlist-container">
        {control}
      </div>
    </div>
    <p class="movie-summary">{plot}</p>
  </div>
</div>
"#,
            rating = escape(movie.rating.as_deref().unwrap_or(MISSING_FIELD)),
            runtime = escape(movie.runtime.as_deref().unwrap_or(MISSING_FIELD)),
            genre = escape(movie.genre.as_deref().unwrap_or(MISSING_FIELD)),
            plot = escape(movie.plot.as_deref().unwrap_or(MISSING_PLOT)),
            control = control_html(&movie.id, &movie.title, item.control),
        )
    }
}

async fn control_for(id: &MovieId, mode: PageMode, store: &dyn WatchlistStore) -> Control {
    match mode {
        PageMode::Watchlist => Control::Remove,
        PageMode::Search => match store.contains(id).await {
            Ok(true) => Control::Added,
            Ok(false) => Control::Add,
            Err(e) => {
                tracing::warn!(imdb_id = %id, error = %e, "Watchlist lookup failed during render");
                Control::Add
            }
        },
    }
}

pub fn control_html(id: &MovieId, title: &str, control: Control) -> String {
    let id = escape(id.as_str());
    let title = escape(title);

    match control {
        Control::Add => format!(
            r##"<a href="#" class="watchlist-control"><i class="fa-solid fa-circle-plus" data-imdbid="{id}" data-title="{title}"></i><h4 data-imdbid="{id}" data-title="{title}">Watchlist</h4></a>"##
        ),
        Control::Added => added_label_html_escaped(&id, &title),
        Control::Remove => format!(
            r##"<a href="#" class="watchlist-control"><i class="fa-solid fa-circle-minus" data-imdbid="{id}" data-title="{title}" data-remove="#"></i><h4 data-imdbid="{id}" data-title="{title}" data-remove="#">Remove</h4></a>"##
        ),
    }
}

/// Static label that replaces an "add" control once the movie is saved
pub fn added_label_html(id: &MovieId, title: &str) -> String {
    added_label_html_escaped(&escape(id.as_str()), &escape(title))
}

fn added_label_html_escaped(id: &str, title: &str) -> String {
    format!(r#"<h4 class="movie-selected" data-imdbid="{id}" data-title="{title}">Added</h4>"#)
}

pub fn no_results_html() -> String {
    r#"
<section class="no-film">
  <div class="start-exploring try-again">
    <i class="fa fa-face-frown"></i>
    <h2>Oops we can't find movies with that name...</h2>
    <h3>Try searching for others</h3>
  </div>
</section>
"#
    .to_string()
}

pub fn empty_watchlist_html() -> String {
    r#"
<section class="no-film">
  <div class="start-exploring empty-watchlist">
    <h2>Your watchlist is looking a little empty...</h2>
    <div class="add-movies-container">
      <i class="fa fa-circle-plus"></i>
      <a href="/" class="watchlist-link">Let's add some movies!</a>
    </div>
  </div>
</section>
"#
    .to_string()
}

/// Escapes text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryWatchlistStore;
    use crate::models::WatchlistEntry;
    use crate::services::providers::test_support::movie;

    const FALLBACK: &str = "./poster-unavailable.png";

    fn renderer() -> Renderer {
        Renderer::new(FALLBACK)
    }

    #[test]
    fn test_poster_src_uses_record_url() {
        let renderer = renderer();
        assert_eq!(
            renderer.poster_src(Some("https://img.example/x.jpg")),
            "https://img.example/x.jpg"
        );
    }

    #[test]
    fn test_poster_src_falls_back_on_sentinel_or_missing() {
        let renderer = renderer();
        assert_eq!(renderer.poster_src(Some("N/A")), FALLBACK);
        assert_eq!(renderer.poster_src(None), FALLBACK);
    }

    #[test]
    fn test_movie_html_includes_load_failure_fallback() {
        let item = MovieItem {
            record: movie("tt0372784", "Batman Begins"),
            control: Control::Add,
        };
        let html = renderer().movie_html(&item);

        assert!(html.contains(r#"src="https://img.example/tt0372784.jpg""#));
        assert!(html.contains("this.src='./poster-unavailable.png'; this.onerror=null;"));
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let mut record = movie("tt0000001", "Obscure Short");
        record.rating = None;
        record.runtime = None;
        record.genre = None;
        record.plot = None;
        let html = renderer().movie_html(&MovieItem {
            record,
            control: Control::Add,
        });

        assert!(html.contains(r#"<h4 class="rating">N/A</h4>"#));
        assert!(html.contains("<h4>N/A</h4>"));
        assert!(html.contains(r#"<p class="movie-summary">No plot available.</p>"#));
    }

    #[test]
    fn test_add_control_binds_id_and_title() {
        let html = control_html(&MovieId::new("tt0372784"), "Batman Begins", Control::Add);
        assert!(html.contains(r#"data-imdbid="tt0372784" data-title="Batman Begins""#));
        assert!(html.contains("Watchlist"));
        assert!(!html.contains("data-remove"));
    }

    #[test]
    fn test_remove_control_carries_remove_marker() {
        let html = control_html(&MovieId::new("tt0372784"), "Batman Begins", Control::Remove);
        assert!(html.contains(r##"data-remove="#""##));
        assert!(html.contains("Remove"));
    }

    #[test]
    fn test_added_label() {
        let html = added_label_html(&MovieId::new("tt0372784"), "Batman Begins");
        assert_eq!(
            html,
            r#"<h4 class="movie-selected" data-imdbid="tt0372784" data-title="Batman Begins">Added</h4>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let item = MovieItem {
            record: movie("tt0000002", r#"<script>alert("x")</script>"#),
            control: Control::Add,
        };
        let html = renderer().movie_html(&item);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
    }

    #[tokio::test]
    async fn test_render_movie_search_mode_checks_store_per_item() {
        let store = InMemoryWatchlistStore::with_entries(vec![WatchlistEntry::new(
            MovieId::new("tt0372784"),
            "Batman Begins",
        )]);
        let mut container = Container::new();

        renderer()
            .render_movies(
                vec![movie("tt0096895", "Batman"), movie("tt0372784", "Batman Begins")],
                PageMode::Search,
                &store,
                &mut container,
            )
            .await;

        let controls: Vec<Control> = container.movies().map(|item| item.control).collect();
        assert_eq!(controls, vec![Control::Add, Control::Added]);
    }

    #[tokio::test]
    async fn test_render_movie_watchlist_mode_uses_remove() {
        let store = InMemoryWatchlistStore::new();
        let mut container = Container::new();

        renderer()
            .render_movie(
                movie("tt0096895", "Batman"),
                PageMode::Watchlist,
                &store,
                &mut container,
            )
            .await;

        assert_eq!(container.movies().next().unwrap().control, Control::Remove);
    }

    #[tokio::test]
    async fn test_render_appends_without_clearing() {
        let store = InMemoryWatchlistStore::new();
        let mut container = Container::new();
        container.append(Fragment::Movie(MovieItem {
            record: movie("tt0096895", "Batman"),
            control: Control::Add,
        }));

        renderer()
            .render_movie(
                movie("tt0372784", "Batman Begins"),
                PageMode::Search,
                &store,
                &mut container,
            )
            .await;

        assert_eq!(container.fragments().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_controls_follows_store_changes() {
        let store = InMemoryWatchlistStore::with_entries(vec![WatchlistEntry::new(
            MovieId::new("tt0096895"),
            "Batman",
        )]);
        let renderer = renderer();
        let mut container = Container::new();
        renderer
            .render_movies(
                vec![movie("tt0096895", "Batman"), movie("tt0372784", "Batman Begins")],
                PageMode::Search,
                &store,
                &mut container,
            )
            .await;

        store.remove(&MovieId::new("tt0096895")).await.unwrap();
        store
            .set(WatchlistEntry::new(MovieId::new("tt0372784"), "Batman Begins"))
            .await
            .unwrap();
        renderer.refresh_controls(&mut container, &store).await;

        let controls: Vec<Control> = container.movies().map(|item| item.control).collect();
        assert_eq!(controls, vec![Control::Add, Control::Added]);
    }

    #[test]
    fn test_placeholder_replaces_content() {
        let mut container = Container::new();
        container.append(Fragment::Movie(MovieItem {
            record: movie("tt0096895", "Batman"),
            control: Control::Add,
        }));

        container.show_placeholder(Fragment::NoResults);

        assert_eq!(container.fragments(), &[Fragment::NoResults]);
        assert!(renderer().container_html(&container).contains("can't find movies"));
    }
}
