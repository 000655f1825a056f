//! Integration tests for the derived catalog views.
//!
//! Tests cover:
//! - Shelf invariants over a mixed, messy collection
//! - Language exact-token matching
//! - Popular series ordering and caps
//! - View memoization per collection identity
//! - Deserializing API payloads with loosely typed fields

use cinestream::core::derive::{
    by_language, new_releases, popular_series, sort_by, top_rated, trending, CatalogViews,
    SortKey, ViewCache, SHELF_LIMIT, TOP_RATED_LIMIT,
};
use cinestream::models::movie::{LooseNumber, Movie, MovieId};
use std::sync::Arc;

const YEAR: i32 = 2024;

// ========== TEST FIXTURES ==========

fn movie(id: i64, year: Option<LooseNumber>, rating: Option<LooseNumber>) -> Movie {
    Movie {
        id: MovieId::Numeric(id),
        title: format!("Movie {}", id),
        year,
        rating,
        ..Default::default()
    }
}

fn num(n: f64) -> Option<LooseNumber> {
    Some(LooseNumber::from(n))
}

fn text(s: &str) -> Option<LooseNumber> {
    Some(LooseNumber::from(s))
}

/// Twenty movies with a mix of numeric, textual and missing fields.
fn messy_catalog() -> Vec<Movie> {
    let mut movies = Vec::new();
    for i in 0..20 {
        let year = match i % 4 {
            0 => num(2015.0 + i as f64),
            1 => text(&format!("{}", 2020 + i % 6)),
            2 => None,
            _ => text("n/a"),
        };
        let rating = match i % 3 {
            0 => num((i % 10) as f64 + 0.5),
            1 => text(&format!("{}.2/10", i % 10)),
            _ => None,
        };
        let mut m = movie(i, year, rating);
        m.languages = Some(match i % 3 {
            0 => "English, French".to_string(),
            1 => "english-dubbed".to_string(),
            _ => "Hindi,ENGLISH".to_string(),
        });
        m.kind = Some(if i % 2 == 0 { "Series" } else { "movie" }.to_string());
        movies.push(m);
    }
    movies
}

fn ids(movies: &[&Movie]) -> Vec<MovieId> {
    movies.iter().map(|m| m.id.clone()).collect()
}

// ========== SHELF INVARIANT TESTS ==========

#[test]
fn test_new_releases_invariants() {
    let movies = messy_catalog();
    let shelf = new_releases(&movies, YEAR);

    assert!(shelf.len() <= SHELF_LIMIT);
    assert!(!shelf.is_empty());
    for m in &shelf {
        assert!(m.year().unwrap() >= YEAR - 1);
    }
    for pair in shelf.windows(2) {
        assert!(pair[0].year() >= pair[1].year());
    }
}

#[test]
fn test_top_rated_invariants() {
    let movies = messy_catalog();
    let shelf = top_rated(&movies);

    assert_eq!(shelf.len(), TOP_RATED_LIMIT);
    for pair in shelf.windows(2) {
        assert!(pair[0].rating().unwrap() >= pair[1].rating().unwrap());
    }
    for m in &shelf {
        assert!(movies.iter().any(|src| std::ptr::eq(src, *m)));
    }
}

#[test]
fn test_trending_invariants() {
    let movies = messy_catalog();
    let shelf = trending(&movies);

    assert!(shelf.len() <= SHELF_LIMIT);
    for m in &shelf {
        assert!(m.rating().unwrap() > 7.5);
    }
}

#[test]
fn test_derivations_leave_source_untouched() {
    let movies = messy_catalog();
    let before = movies.clone();

    let _ = CatalogViews::build(&movies, YEAR, &["english"]);
    let _ = sort_by(&movies, SortKey::Rating);

    assert_eq!(movies, before);
}

// ========== LANGUAGE TESTS ==========

#[test]
fn test_by_language_exact_token() {
    let movies = messy_catalog();
    let english = by_language(&movies, "english");

    assert!(english.len() <= SHELF_LIMIT);
    for m in &english {
        let tokens: Vec<String> = m.language_tags().iter().map(|t| t.to_lowercase()).collect();
        assert!(tokens.contains(&"english".to_string()));
    }
    // "english-dubbed" is a different token.
    assert!(english.iter().all(|m| m.id != MovieId::Numeric(1)));
}

#[test]
fn test_by_language_keeps_input_order() {
    let movies = messy_catalog();
    let english = ids(&by_language(&movies, "ENGLISH"));
    let expected: Vec<MovieId> = movies
        .iter()
        .filter(|m| matches!(m.id, MovieId::Numeric(n) if n % 3 != 1))
        .take(SHELF_LIMIT)
        .map(|m| m.id.clone())
        .collect();
    assert_eq!(english, expected);
}

// ========== SERIES TESTS ==========

#[test]
fn test_popular_series_sorted_and_capped() {
    let movies = messy_catalog();
    let shelf = popular_series(&movies);

    assert!(shelf.len() <= SHELF_LIMIT);
    assert!(shelf.iter().all(|m| m.is_series()));

    // Rated series come first, in descending order.
    let rated: Vec<f64> = shelf.iter().filter_map(|m| m.rating()).collect();
    for pair in rated.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
    let first_unrated = shelf.iter().position(|m| m.rating().is_none());
    if let Some(pos) = first_unrated {
        assert!(shelf[pos..].iter().all(|m| m.rating().is_none()));
    }
}

// ========== MEMOIZATION TESTS ==========

#[test]
fn test_view_cache_rebuilds_on_identity_change() {
    let mut cache = ViewCache::default();
    let first = Arc::new(messy_catalog());
    let copy = Arc::new(messy_catalog());

    let a = cache.get(&first, YEAR);
    let b = cache.get(&first, YEAR);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.builds(), 1);

    // Equal contents, different collection.
    let c = cache.get(&copy, YEAR);
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.builds(), 2);
}

#[test]
fn test_view_cache_language_shelves() {
    let mut cache = ViewCache::new(vec!["hindi".to_string(), "korean".to_string()]);
    let views = cache.get(&Arc::new(messy_catalog()), YEAR);

    assert_eq!(views.languages.len(), 2);
    assert_eq!(views.languages[0].language, "hindi");
    assert!(!views.languages[0].movies.is_empty());
    assert!(views.languages[1].movies.is_empty());
}

// ========== PAYLOAD TESTS ==========

#[test]
fn test_views_from_api_payload() {
    let json = r#"[
        {"id": "a1", "title": "Dune", "year": "2024", "rating": 8.4, "genres": "Sci-fi|Drama", "languages": "English", "type": "movie"},
        {"id": "a2", "title": "Shogun", "year": 2024, "rating": "9.1", "genres": "Drama", "languages": "English, Japanese", "type": "series"},
        {"id": "a3", "title": "Old", "year": 1999, "rating": null, "genres": "Action", "languages": "French"}
    ]"#;
    let movies: Vec<Movie> = serde_json::from_str(json).unwrap();
    let views = CatalogViews::build(&movies, YEAR, &["english", "japanese"]);

    assert_eq!(views.featured.as_ref().unwrap().title, "Dune");
    assert_eq!(views.action_featured.as_ref().unwrap().title, "Old");
    assert_eq!(views.drama_featured.as_ref().unwrap().title, "Dune");
    assert_eq!(views.top_rated[0].title, "Shogun");
    assert_eq!(views.top_rated.last().unwrap().title, "Old");
    assert_eq!(views.popular_series.len(), 1);
    assert_eq!(views.new_releases.len(), 2);
    assert_eq!(views.trending.len(), 2);
    assert_eq!(views.languages[0].movies.len(), 2);
    assert_eq!(views.languages[1].movies[0].title, "Shogun");
}
