//! Dashboard filter criteria.

use serde::Serialize;

/// Upper bound sent with every filtered query.
pub const MAX_RATING: f64 = 10.0;

/// Genres offered by the dashboard.
pub const GENRE_OPTIONS: &[&str] = &["Action", "Sci-fi", "Comedy", "Drama", "Thriller", "Romance"];

/// User-chosen filter criteria.
///
/// Genres behave as an insertion-ordered set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub genres: Vec<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    /// Minimum rating threshold.
    pub rating: f64,
}

impl FilterCriteria {
    /// Add `genre` if absent, remove it if present.
    pub fn toggle_genre(&mut self, genre: &str) {
        if let Some(pos) = self.genres.iter().position(|g| g == genre) {
            self.genres.remove(pos);
        } else {
            self.genres.push(genre.to_string());
        }
    }

    /// Show a single genre, or every genre for "All".
    pub fn select_genre(&mut self, genre: &str) {
        self.genres.clear();
        if !genre.eq_ignore_ascii_case("all") {
            self.genres.push(genre.to_string());
        }
    }

    /// Restore defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Snapshot these criteria as query parameters.
    pub fn to_query(&self) -> FilterQuery {
        FilterQuery {
            genres: self.genres.join(","),
            year_from: self.year_from.map(|y| y.to_string()).unwrap_or_default(),
            year_to: self.year_to.map(|y| y.to_string()).unwrap_or_default(),
            min_rating: self.rating,
            max_rating: MAX_RATING,
        }
    }
}

/// Query parameters for `/api/movies/filtermovies`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    /// Genres joined by `,`.
    pub genres: String,
    /// Empty when unset.
    pub year_from: String,
    /// Empty when unset.
    pub year_to: String,
    pub min_rating: f64,
    pub max_rating: f64,
}

impl FilterQuery {
    /// Encode as a URL query string.
    pub fn to_query_string(&self) -> String {
        format!(
            "genres={}&yearFrom={}&yearTo={}&minRating={}&maxRating={}",
            urlencoding::encode(&self.genres),
            urlencoding::encode(&self.year_from),
            urlencoding::encode(&self.year_to),
            self.min_rating,
            self.max_rating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_genre() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_genre("Action");
        criteria.toggle_genre("Drama");
        assert_eq!(criteria.genres, vec!["Action", "Drama"]);

        criteria.toggle_genre("Action");
        assert_eq!(criteria.genres, vec!["Drama"]);
    }

    #[test]
    fn test_select_all_clears() {
        let mut criteria = FilterCriteria::default();
        criteria.select_genre("Comedy");
        assert_eq!(criteria.genres, vec!["Comedy"]);
        criteria.select_genre("All");
        assert!(criteria.genres.is_empty());
    }

    #[test]
    fn test_query_snapshot() {
        let criteria = FilterCriteria {
            genres: vec!["Action".to_string(), "Sci-fi".to_string()],
            year_from: Some(2010),
            year_to: None,
            rating: 6.5,
        };
        let query = criteria.to_query();
        assert_eq!(query.genres, "Action,Sci-fi");
        assert_eq!(query.year_from, "2010");
        assert_eq!(query.year_to, "");
        assert_eq!(query.max_rating, 10.0);
        assert_eq!(
            query.to_query_string(),
            "genres=Action%2CSci-fi&yearFrom=2010&yearTo=&minRating=6.5&maxRating=10"
        );
    }
}
