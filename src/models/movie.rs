//! Movie-related data models.

use crate::core::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder shown when a movie has no poster.
pub const POSTER_PLACEHOLDER: &str = "/movieimgplaceholder";

/// Movie identifier.
///
/// The API hands ids out either as JSON numbers or as strings, and the
/// watchlist persists them back in the same form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieId::Numeric(n) => write!(f, "{}", n),
            MovieId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for MovieId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(n) => MovieId::Numeric(n),
            Err(_) => MovieId::Text(s.to_string()),
        })
    }
}

impl Default for MovieId {
    fn default() -> Self {
        MovieId::Numeric(0)
    }
}

impl From<i64> for MovieId {
    fn from(n: i64) -> Self {
        MovieId::Numeric(n)
    }
}

impl From<&str> for MovieId {
    fn from(s: &str) -> Self {
        MovieId::Text(s.to_string())
    }
}

/// A number that may arrive as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl fmt::Display for LooseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseNumber::Number(n) => write!(f, "{}", n),
            LooseNumber::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for LooseNumber {
    fn from(n: f64) -> Self {
        LooseNumber::Number(n)
    }
}

impl From<&str> for LooseNumber {
    fn from(s: &str) -> Self {
        LooseNumber::Text(s.to_string())
    }
}

/// A catalog entry as served by the API.
///
/// Fields are kept in their wire form; parsed views are available through
/// the accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Unique identifier.
    pub id: MovieId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Release year.
    #[serde(default)]
    pub year: Option<LooseNumber>,
    /// Score on a 0-10 scale.
    #[serde(default)]
    pub rating: Option<LooseNumber>,
    /// Genre tags joined by `,`, `|` or `/`.
    #[serde(default)]
    pub genres: Option<String>,
    /// Spoken languages joined by `,`.
    #[serde(default)]
    pub languages: Option<String>,
    /// Category discriminator ("movie", "series", ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub duration: Option<LooseNumber>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub backdrop_url: Option<String>,
    /// Certification (e.g., "PG-13").
    #[serde(default)]
    pub age_rating: Option<String>,
    #[serde(default)]
    pub votes: Option<LooseNumber>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub writers: Option<String>,
    #[serde(default)]
    pub revenue: Option<LooseNumber>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl Movie {
    /// Parsed release year, `None` when unknown.
    pub fn year(&self) -> Option<i32> {
        self.year.as_ref().and_then(normalize::parse_year)
    }

    /// Parsed rating, `None` when unknown.
    pub fn rating(&self) -> Option<f64> {
        self.rating.as_ref().and_then(normalize::parse_rating)
    }

    /// Genre tags in source order.
    pub fn genre_tags(&self) -> Vec<String> {
        self.genres
            .as_deref()
            .map(normalize::split_tags)
            .unwrap_or_default()
    }

    /// Language tags in source order.
    pub fn language_tags(&self) -> Vec<String> {
        self.languages
            .as_deref()
            .map(normalize::split_languages)
            .unwrap_or_default()
    }

    /// Synopsis, falling back to the description.
    pub fn summary(&self) -> Option<&str> {
        self.synopsis
            .as_deref()
            .or(self.description.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Poster URL, falling back to the placeholder image.
    pub fn poster(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(POSTER_PLACEHOLDER)
    }

    /// Whether the movie is a series rather than a film.
    pub fn is_series(&self) -> bool {
        self.kind
            .as_deref()
            .map(|k| k.eq_ignore_ascii_case("series"))
            .unwrap_or(false)
    }
}
