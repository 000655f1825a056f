//! Derived catalog views.
//!
//! Every function here is a pure view over a fetched collection: it borrows
//! the movies, never reorders or mutates the source, and applies caps only
//! after filtering and sorting. Sorts are stable, so ties keep input order.

use crate::core::normalize::cmp_desc_unknown_last;
use crate::models::movie::Movie;
use chrono::Datelike;
use serde::Serialize;
use std::sync::Arc;

/// Cap for language, new-release, trending and series shelves.
pub const SHELF_LIMIT: usize = 8;

/// Cap for the top-rated shelf.
pub const TOP_RATED_LIMIT: usize = 5;

/// Rating a movie must exceed to trend.
pub const TRENDING_MIN_RATING: f64 = 7.5;

/// Rating a movie must exceed to be featured.
pub const FEATURED_MIN_RATING: f64 = 8.0;

/// Languages shown on the dashboard, in display order.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "english", "french", "spanish", "hindi", "german", "japanese", "korean", "mandarin",
    "italian", "telugu",
];

/// Sort order for a results grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Keep server order.
    Relevance,
    Rating,
    Year,
}

impl std::str::FromStr for SortKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(SortKey::Relevance),
            "rating" => Ok(SortKey::Rating),
            "year" => Ok(SortKey::Year),
            other => Err(crate::Error::validation(format!("Unknown sort order: {}", other))),
        }
    }
}

/// Current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Movies spoken in `language`, first 8 in input order.
pub fn by_language<'a>(movies: &'a [Movie], language: &str) -> Vec<&'a Movie> {
    let wanted = language.to_lowercase();
    movies
        .iter()
        .filter(|m| {
            m.language_tags()
                .iter()
                .any(|lang| lang.to_lowercase() == wanted)
        })
        .take(SHELF_LIMIT)
        .collect()
}

/// Movies whose type matches `kind`, ignoring case.
pub fn by_type<'a>(movies: &'a [Movie], kind: &str) -> Vec<&'a Movie> {
    movies
        .iter()
        .filter(|m| {
            m.kind
                .as_deref()
                .map(|k| k.to_lowercase() == kind.to_lowercase())
                .unwrap_or(false)
        })
        .collect()
}

/// Movies whose raw genre string contains `genre`, ignoring case.
///
/// Looser than [`by_language`]: "drama" also matches "Docudrama".
pub fn by_genre_substring<'a>(movies: &'a [Movie], genre: &str) -> Vec<&'a Movie> {
    let needle = genre.to_lowercase();
    movies
        .iter()
        .filter(|m| {
            m.genres
                .as_deref()
                .map(|g| g.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}

/// Releases from last year onward, newest first, capped at 8.
pub fn new_releases(movies: &[Movie], current_year: i32) -> Vec<&Movie> {
    let mut recent: Vec<&Movie> = movies
        .iter()
        .filter(|m| m.year().map(|y| y >= current_year - 1).unwrap_or(false))
        .collect();
    sort_by_year_desc(&mut recent);
    recent.truncate(SHELF_LIMIT);
    recent
}

/// Well-rated movies, newest first, capped at 8.
pub fn trending(movies: &[Movie]) -> Vec<&Movie> {
    let mut hot: Vec<&Movie> = movies
        .iter()
        .filter(|m| exceeds(m, TRENDING_MIN_RATING))
        .collect();
    sort_by_year_desc(&mut hot);
    hot.truncate(SHELF_LIMIT);
    hot
}

/// Highest rated movies, capped at 5.
pub fn top_rated(movies: &[Movie]) -> Vec<&Movie> {
    let mut all: Vec<&Movie> = movies.iter().collect();
    sort_by_rating_desc(&mut all);
    all.truncate(TOP_RATED_LIMIT);
    all
}

/// Highest rated series, capped at 8.
pub fn popular_series(movies: &[Movie]) -> Vec<&Movie> {
    let mut series = by_type(movies, "series");
    sort_by_rating_desc(&mut series);
    series.truncate(SHELF_LIMIT);
    series
}

/// First movie rated above 8, for a hero section.
pub fn featured(movies: &[Movie]) -> Option<&Movie> {
    movies.iter().find(|m| exceeds(m, FEATURED_MIN_RATING))
}

/// First movie matching a genre substring.
pub fn featured_by_genre<'a>(movies: &'a [Movie], genre: &str) -> Option<&'a Movie> {
    by_genre_substring(movies, genre).into_iter().next()
}

/// Sort a results grid.
pub fn sort_by(movies: &[Movie], key: SortKey) -> Vec<&Movie> {
    let mut sorted: Vec<&Movie> = movies.iter().collect();
    match key {
        SortKey::Relevance => {}
        SortKey::Rating => sort_by_rating_desc(&mut sorted),
        SortKey::Year => sort_by_year_desc(&mut sorted),
    }
    sorted
}

fn exceeds(movie: &Movie, threshold: f64) -> bool {
    movie.rating().map(|r| r > threshold).unwrap_or(false)
}

fn sort_by_year_desc(movies: &mut [&Movie]) {
    movies.sort_by(|a, b| cmp_desc_unknown_last(a.year(), b.year()));
}

fn sort_by_rating_desc(movies: &mut [&Movie]) {
    movies.sort_by(|a, b| cmp_desc_unknown_last(a.rating(), b.rating()));
}

/// A named language shelf.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageShelf {
    pub language: String,
    pub movies: Vec<Movie>,
}

/// Every dashboard shelf computed from one collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogViews {
    pub featured: Option<Movie>,
    pub action_featured: Option<Movie>,
    pub drama_featured: Option<Movie>,
    pub top_rated: Vec<Movie>,
    pub popular_series: Vec<Movie>,
    pub new_releases: Vec<Movie>,
    pub trending: Vec<Movie>,
    pub languages: Vec<LanguageShelf>,
}

impl CatalogViews {
    /// Compute every shelf from `movies`.
    pub fn build<S: AsRef<str>>(movies: &[Movie], current_year: i32, languages: &[S]) -> Self {
        let owned = |views: Vec<&Movie>| views.into_iter().cloned().collect::<Vec<_>>();

        Self {
            featured: featured(movies).cloned(),
            action_featured: featured_by_genre(movies, "action").cloned(),
            drama_featured: featured_by_genre(movies, "drama").cloned(),
            top_rated: owned(top_rated(movies)),
            popular_series: owned(popular_series(movies)),
            new_releases: owned(new_releases(movies, current_year)),
            trending: owned(trending(movies)),
            languages: languages
                .iter()
                .map(|lang| LanguageShelf {
                    language: lang.as_ref().to_string(),
                    movies: owned(by_language(movies, lang.as_ref())),
                })
                .collect(),
        }
    }
}

/// Memoizes [`CatalogViews`] per collection identity and year.
///
/// Views are rebuilt only when a different `Arc` or a different current
/// year is handed in.
#[derive(Debug)]
pub struct ViewCache {
    languages: Vec<String>,
    source: Option<(Arc<Vec<Movie>>, i32)>,
    views: Arc<CatalogViews>,
    builds: usize,
}

impl ViewCache {
    /// Create a cache for the given language shelves.
    pub fn new(languages: Vec<String>) -> Self {
        Self {
            languages,
            source: None,
            views: Arc::new(CatalogViews::default()),
            builds: 0,
        }
    }

    /// Views for `movies`, recomputed only if the collection or year changed.
    pub fn get(&mut self, movies: &Arc<Vec<Movie>>, current_year: i32) -> Arc<CatalogViews> {
        let fresh = self
            .source
            .as_ref()
            .map(|(src, year)| Arc::ptr_eq(src, movies) && *year == current_year)
            .unwrap_or(false);

        if !fresh {
            tracing::debug!("Rebuilding catalog views for {} movies", movies.len());
            self.views = Arc::new(CatalogViews::build(movies, current_year, &self.languages));
            self.source = Some((Arc::clone(movies), current_year));
            self.builds += 1;
        }

        Arc::clone(&self.views)
    }

    /// Number of times views were rebuilt.
    pub fn builds(&self) -> usize {
        self.builds
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::{LooseNumber, MovieId};

    fn movie(id: i64, year: &str, rating: f64) -> Movie {
        Movie {
            id: MovieId::Numeric(id),
            title: format!("Movie {}", id),
            year: Some(LooseNumber::from(year)),
            rating: Some(LooseNumber::from(rating)),
            ..Default::default()
        }
    }

    fn ids(movies: &[&Movie]) -> Vec<i64> {
        movies
            .iter()
            .map(|m| match m.id {
                MovieId::Numeric(n) => n,
                MovieId::Text(_) => -1,
            })
            .collect()
    }

    #[test]
    fn test_new_releases_sorts_before_capping() {
        let mut movies: Vec<Movie> = (0..10).map(|i| movie(i, "2025", 5.0)).collect();
        movies.push(movie(100, "2026", 5.0));
        movies.push(movie(101, "2024", 9.0));

        let result = new_releases(&movies, 2026);
        assert_eq!(result.len(), 8);
        assert_eq!(ids(&result)[0], 100);
        assert!(!ids(&result).contains(&101));
    }

    #[test]
    fn test_trending_threshold_is_strict() {
        let movies = vec![movie(1, "2000", 7.5), movie(2, "2001", 7.6), movie(3, "2010", 9.0)];
        assert_eq!(ids(&trending(&movies)), vec![3, 2]);
    }

    #[test]
    fn test_top_rated_unknown_last() {
        let mut unknown = movie(9, "2000", 0.0);
        unknown.rating = Some(LooseNumber::from("n/a"));
        let movies = vec![unknown, movie(1, "2000", 6.0), movie(2, "2000", 8.0)];
        assert_eq!(ids(&top_rated(&movies)), vec![2, 1, 9]);
    }

    #[test]
    fn test_featured_requires_rating_above_eight() {
        let movies = vec![movie(1, "2000", 8.0), movie(2, "2000", 8.2)];
        assert_eq!(featured(&movies).map(|m| m.id.clone()), Some(MovieId::Numeric(2)));
        assert!(featured(&movies[..1]).is_none());
    }

    #[test]
    fn test_genre_substring_is_loose() {
        let mut doc = movie(1, "2000", 5.0);
        doc.genres = Some("Docudrama".to_string());
        let mut action = movie(2, "2000", 5.0);
        action.genres = Some("Action|Drama".to_string());
        let movies = vec![doc, action];

        assert_eq!(ids(&by_genre_substring(&movies, "DRAMA")), vec![1, 2]);
        assert_eq!(
            featured_by_genre(&movies, "action").map(|m| m.id.clone()),
            Some(MovieId::Numeric(2))
        );
    }

    #[test]
    fn test_view_cache_reuses_same_collection() {
        let movies = Arc::new(vec![movie(1, "2025", 9.0)]);
        let mut cache = ViewCache::default();

        let first = cache.get(&movies, 2025);
        let second = cache.get(&movies, 2025);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.builds(), 1);

        let replaced = Arc::new(vec![movie(1, "2025", 9.0)]);
        cache.get(&replaced, 2025);
        assert_eq!(cache.builds(), 2);
    }

    #[test]
    fn test_view_cache_rebuilds_when_year_changes() {
        let movies = Arc::new(vec![movie(1, "2025", 9.0)]);
        let mut cache = ViewCache::default();

        assert_eq!(cache.get(&movies, 2026).new_releases.len(), 1);
        assert_eq!(cache.get(&movies, 2030).new_releases.len(), 0);
        assert_eq!(cache.builds(), 2);

        cache.get(&movies, 2030);
        assert_eq!(cache.builds(), 2);
    }
}
