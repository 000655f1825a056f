//! Watchlist commands.

use super::{client, movie_line, open_store, parse_id, spinner};
use crate::core::watchlist::{WatchToggle, Watchlist};
use crate::models::config::Config;
use crate::Result;
use colored::Colorize;

/// List saved movies, oldest first.
pub async fn list(config: &Config, details: bool) -> Result<()> {
    let store = open_store(config);
    let ids = Watchlist::new(&store).ids()?;

    println!("{}", "🎬 Watchlist".bold().cyan());
    println!();

    if ids.is_empty() {
        println!("Your watchlist is empty.");
        return Ok(());
    }

    if !details {
        for id in &ids {
            println!("  {}", id);
        }
        return Ok(());
    }

    let client = client(config, &store)?;
    let pb = spinner("Loading titles...");
    let mut lines = Vec::with_capacity(ids.len());
    for id in &ids {
        match client.get_movie(id).await {
            Ok(movie) => lines.push(format!("{:<26} {}", id.to_string(), movie_line(&movie))),
            Err(e) => {
                tracing::debug!("Could not load {}: {}", id, e);
                lines.push(format!("{:<26} {}", id.to_string(), "(unavailable)".dimmed()));
            }
        }
    }
    pb.finish_and_clear();

    for line in lines {
        println!("  {}", line);
    }
    Ok(())
}

/// Add or remove a movie.
pub async fn toggle(config: &Config, id: &str) -> Result<()> {
    let id = parse_id(id);
    let store = open_store(config);
    let watchlist = Watchlist::new(&store);

    let mut toggle = WatchToggle::seed(&watchlist, id)?;
    toggle.toggle(&watchlist)?;
    println!("{} {}", "✅".green(), toggle.message().green());
    Ok(())
}

/// Report whether a movie is saved.
pub async fn contains(config: &Config, id: &str) -> Result<()> {
    let id = parse_id(id);
    let store = open_store(config);

    if Watchlist::new(&store).contains(&id)? {
        println!("{} is in your watchlist", id);
    } else {
        println!("{} is not in your watchlist", id);
    }
    Ok(())
}
