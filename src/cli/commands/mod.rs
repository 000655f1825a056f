//! CLI command implementations.

pub mod auth;
pub mod browse;
pub mod dashboard;
pub mod doctor;
pub mod movie;
pub mod users;
pub mod watchlist;

use crate::core::notify::{Level, Notification};
use crate::core::session::Session;
use crate::models::config::Config;
use crate::models::movie::{Movie, MovieId};
use crate::services::api::CatalogClient;
use crate::services::store::FileStore;
use crate::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Local store shared by the session and the watchlist.
pub fn open_store(config: &Config) -> FileStore {
    FileStore::in_dir(&config.storage.data_dir)
}

/// API client carrying the stored token, if any.
pub fn client(config: &Config, store: &FileStore) -> Result<CatalogClient> {
    let client = CatalogClient::new(&config.api)?;
    match Session::new(store).token()? {
        Some(token) => Ok(client.with_token(token)),
        None => Ok(client),
    }
}

/// API client for calls that need a login.
pub fn authed_client(config: &Config, store: &FileStore) -> Result<CatalogClient> {
    let token = Session::new(store).require_token()?;
    Ok(CatalogClient::new(&config.api)?.with_token(token))
}

/// Spinner shown while waiting on the API.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a notification the way the dashboard shows toasts.
pub fn print_notification(note: &Notification) {
    match note.level {
        Level::Success => println!("{} {}", "✅".green(), note.message.green()),
        Level::Error => println!("{} {}", "❌".red(), note.message.red()),
    }
}

/// Print movies as an aligned table.
pub fn print_movie_table(movies: &[&Movie]) {
    println!(
        "{:<26} {:<36} {:<6} {:<6} {}",
        "ID".bold(),
        "Title".bold(),
        "Year".bold(),
        "Rating".bold(),
        "Genres".bold()
    );
    println!("{}", "-".repeat(90));

    for movie in movies {
        println!(
            "{:<26} {:<36} {:<6} {:<6} {}",
            movie.id.to_string(),
            truncate(&movie.title, 35),
            movie.year().map(|y| y.to_string()).unwrap_or_else(|| "-".into()),
            movie
                .rating()
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".into()),
            movie.genre_tags().join(", ")
        );
    }
}

/// One-line description of a movie.
pub fn movie_line(movie: &Movie) -> String {
    let year = movie.year().map(|y| format!(" ({})", y)).unwrap_or_default();
    let rating = movie
        .rating()
        .map(|r| format!(" ★ {:.1}", r))
        .unwrap_or_default();
    format!("{}{}{}", movie.title, year, rating.yellow())
}

/// Movie id as typed on the command line; digits become a numeric id.
pub fn parse_id(raw: &str) -> MovieId {
    raw.parse().unwrap_or_default()
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Heat", 10), "Heat");
        assert_eq!(truncate("The Lord of the Rings", 10), "The Lor...");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), MovieId::Numeric(42));
        assert_eq!(parse_id(" tt0113277 "), MovieId::Text("tt0113277".to_string()));
    }

    #[test]
    fn test_movie_line_without_year() {
        colored::control::set_override(false);
        let movie = Movie {
            title: "Untitled".to_string(),
            ..Default::default()
        };
        assert_eq!(movie_line(&movie), "Untitled");
    }
}
