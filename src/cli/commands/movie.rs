//! Movie details command.

use super::{client, open_store, parse_id, print_json, spinner};
use crate::core::watchlist::{WatchToggle, Watchlist};
use crate::models::config::Config;
use crate::models::movie::Movie;
use crate::Result;
use colored::Colorize;

/// Show one movie, optionally toggling its watchlist entry.
///
/// The watchlist entry is keyed by the id as typed, so `watchlist toggle 42`
/// and `movie 42 --toggle-watchlist` address the same entry whatever form
/// the server echoes the id back in.
pub async fn show(config: &Config, id: &str, toggle_watchlist: bool, format: &str) -> Result<()> {
    let id = parse_id(id);
    let store = open_store(config);
    let client = client(config, &store)?;

    let pb = spinner("Loading movie...");
    let result = client.get_movie(&id).await;
    pb.finish_and_clear();
    let movie = result?;

    let watchlist = Watchlist::new(&store);
    let mut toggle = WatchToggle::seed(&watchlist, id)?;
    if toggle_watchlist {
        toggle.toggle(&watchlist)?;
    }

    if format == "json" {
        return print_json(&movie);
    }

    print_details(&movie, toggle.is_on());
    if toggle_watchlist {
        println!();
        println!("{} {}", "✅".green(), toggle.message().green());
    }
    Ok(())
}

fn print_details(movie: &Movie, in_watchlist: bool) {
    println!("{}", movie.title.bold().cyan());

    let mut facts = Vec::new();
    if let Some(year) = movie.year() {
        facts.push(year.to_string());
    }
    if let Some(ref duration) = movie.duration {
        facts.push(format!("{} min", duration));
    }
    if let Some(ref age) = movie.age_rating {
        facts.push(age.clone());
    }
    if let Some(ref kind) = movie.kind {
        facts.push(kind.clone());
    }
    if !facts.is_empty() {
        println!("{}", facts.join(" · ").dimmed());
    }
    println!();

    if let Some(rating) = movie.rating() {
        let votes = movie
            .votes
            .as_ref()
            .map(|v| format!(" ({} votes)", v))
            .unwrap_or_default();
        println!("  {} {}{}", "Rating:".bold(), format!("★ {:.1}", rating).yellow(), votes);
    }
    print_field("Genres:", &movie.genre_tags().join(", "));
    print_field("Languages:", &movie.language_tags().join(", "));
    print_field("Director:", movie.director.as_deref().unwrap_or_default());
    print_field("Writers:", movie.writers.as_deref().unwrap_or_default());
    print_field("Released:", movie.release_date.as_deref().unwrap_or_default());
    if let Some(ref revenue) = movie.revenue {
        print_field("Revenue:", &revenue.to_string());
    }
    print_field("Poster:", movie.poster());
    println!(
        "  {} {}",
        "Watchlist:".bold(),
        if in_watchlist {
            "saved".green()
        } else {
            "not saved".normal()
        }
    );

    if let Some(summary) = movie.summary() {
        println!();
        println!("{}", summary);
    }
}

fn print_field(label: &str, value: &str) {
    if !value.is_empty() {
        println!("  {} {}", label.bold(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::StorageConfig;
    use crate::models::movie::MovieId;
    use crate::services::testing::serve_once;
    use tempfile::TempDir;

    fn config(base_url: &str, dir: &TempDir) -> Config {
        let mut config = Config {
            storage: StorageConfig {
                data_dir: dir.path().to_path_buf(),
            },
            ..Default::default()
        };
        config.api.base_url = base_url.to_string();
        config
    }

    // ========== WATCHLIST TOGGLE TESTS ==========

    #[tokio::test]
    async fn test_toggle_uses_typed_id() {
        let dir = TempDir::new().unwrap();
        let body = r#"{"success":true,"data":{"id":"42","title":"Heat"}}"#;

        let (url, server) = serve_once("200 OK", body).await;
        show(&config(&url, &dir), "42", true, "json").await.unwrap();
        assert!(server.await.unwrap().starts_with("GET /api/movies/42 "));

        let watchlist = Watchlist::new(open_store(&config(&url, &dir)));
        assert_eq!(watchlist.ids().unwrap(), vec![MovieId::Numeric(42)]);

        let (url, _server) = serve_once("200 OK", body).await;
        show(&config(&url, &dir), "42", true, "json").await.unwrap();
        assert!(watchlist.ids().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_movie_leaves_watchlist_alone() {
        let dir = TempDir::new().unwrap();
        let (url, _server) = serve_once("404 Not Found", r#"{"message":"Movie not found"}"#).await;

        let err = show(&config(&url, &dir), "7", true, "json").await.unwrap_err();
        assert_eq!(err.to_string(), "Movie not found");

        let watchlist = Watchlist::new(open_store(&config(&url, &dir)));
        assert!(watchlist.ids().unwrap().is_empty());
    }
}
