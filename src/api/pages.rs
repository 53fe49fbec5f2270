/// Page the shell is being built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Search,
    Watchlist,
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Movie Watchlist</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
</head>
<body>
"#;

const SEARCH_HEADER: &str = r#"<header>
  <h1>Find your film</h1>
  <a href="/watchlist" class="header-link">My Watchlist</a>
</header>
<div class="search-container">
  <input id="search-bar" type="text" placeholder="Search for a movie" autocomplete="off">
  <button id="search-btn" type="button">Search</button>
</div>
<main class="movie-container">
"#;

const WATCHLIST_HEADER: &str = r#"<header>
  <h1>My Watchlist</h1>
  <a href="/" class="header-link">Search for movies</a>
</header>
<main id="watchlist-page">
"#;

/// Wires search submission and the delegated watchlist click listener
const SCRIPT: &str = r#"</main>
<script>
  const movieContainer = document.querySelector(".movie-container");
  const watchlistPage = document.getElementById("watchlist-page");
  const searchBar = document.getElementById("search-bar");
  const searchBtn = document.getElementById("search-btn");

  async function performSearch() {
    const query = searchBar?.value?.trim();
    if (!query) return;
    try {
      const response = await fetch("/search?q=" + encodeURIComponent(query));
      if (response.ok) movieContainer.innerHTML = await response.text();
    } catch (error) {
      console.error("Search error:", error);
    }
  }

  searchBtn?.addEventListener("click", performSearch);
  searchBar?.addEventListener("keydown", (e) => {
    if (e.key === "Enter") performSearch();
  });

  document.addEventListener("click", async (e) => {
    const { imdbid, title, remove } = e.target.dataset;
    if (!imdbid) return;
    e.preventDefault();

    const response = await fetch("/watchlist/events", {
      method: "POST",
      headers: { "content-type": "application/json" },
      body: JSON.stringify({ imdb_id: imdbid, title, remove: remove !== undefined }),
    });
    if (!response.ok) return;

    const outcome = await response.json();
    if (outcome.swap === "control") {
      e.target.closest(".watchlist-container").innerHTML = outcome.html;
    } else if (outcome.swap === "page" && watchlistPage) {
      watchlistPage.innerHTML = outcome.html;
    }
  });
</script>
</body>
</html>
"#;

/// Full HTML document around an already-rendered container
pub fn shell(page: Page, container_html: &str) -> String {
    let header = match page {
        Page::Search => SEARCH_HEADER,
        Page::Watchlist => WATCHLIST_HEADER,
    };

    let mut html = String::with_capacity(
        HEAD.len() + header.len() + container_html.len() + SCRIPT.len(),
    );
    html.push_str(HEAD);
    html.push_str(header);
    html.push_str(container_html);
    html.push_str(SCRIPT);
    html
}
