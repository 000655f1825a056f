//! Dashboard command.
//!
//! The one-shot mode fetches once with the default filters and prints every
//! shelf. The interactive mode reads filter commands from stdin and lets the
//! coordinator debounce them, reprinting shelves whenever a new collection
//! arrives.

use super::{client, movie_line, open_store, print_json, print_notification, spinner};
use crate::core::coordinator::FetchCoordinator;
use crate::core::derive::{current_year, CatalogViews, ViewCache};
use crate::core::notify::{Level, Notifier};
use crate::models::config::Config;
use crate::models::filter::{FilterCriteria, GENRE_OPTIONS, MAX_RATING};
use crate::models::movie::Movie;
use crate::{Error, Result};
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Fetch with the default filters and print every shelf.
pub async fn show(config: &Config, format: &str) -> Result<()> {
    let store = open_store(config);
    let source = Arc::new(client(config, &store)?);
    let (notifier, mut notes) = Notifier::channel();

    let pb = spinner("Fetching movies...");
    let coordinator =
        FetchCoordinator::with_debounce(source, FilterCriteria::default(), notifier, Duration::ZERO);
    coordinator.wait_idle().await;
    let movies = coordinator.collection();
    coordinator.shutdown().await;
    pb.finish_and_clear();

    while let Ok(note) = notes.try_recv() {
        if note.level == Level::Error {
            return Err(Error::other(note.message));
        }
    }

    let mut cache = ViewCache::new(config.catalog.languages.clone());
    let views = cache.get(&movies, current_year());

    if format == "json" {
        return print_json(views.as_ref());
    }

    print_views(&views);
    Ok(())
}

/// Drive the coordinator from stdin until `quit` or end of input.
pub async fn interactive(config: &Config) -> Result<()> {
    let store = open_store(config);
    let source = Arc::new(client(config, &store)?);
    let (notifier, mut notes) = Notifier::channel();

    let mut coordinator = FetchCoordinator::with_debounce(
        source,
        FilterCriteria::default(),
        notifier,
        config.catalog.debounce(),
    );
    let mut changes = coordinator.subscribe();
    let mut cache = ViewCache::new(config.catalog.languages.clone());
    let year = current_year();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(Input::Help)) => print_help(),
                    Ok(Some(Input::Show)) => {
                        print_views(&cache.get(&coordinator.collection(), year));
                    }
                    Ok(Some(Input::Change(change))) => {
                        coordinator.update(|c| change.apply(c));
                        println!("{} {}", "Filters:".bold(), describe(coordinator.criteria()));
                    }
                    Ok(None) => {}
                    Err(e) => println!("{} {}", "❌".red(), e.to_string().red()),
                }
            }
            Ok(()) = changes.changed() => {
                let movies = changes.borrow_and_update().clone();
                print_views(&cache.get(&movies, year));
            }
            Some(note) = notes.recv() => print_notification(&note),
        }
    }

    coordinator.shutdown().await;
    Ok(())
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Change(FilterChange),
    Show,
    Help,
    Quit,
}

/// A filter edit.
#[derive(Debug, Clone, PartialEq)]
enum FilterChange {
    ToggleGenre(String),
    OnlyGenre(String),
    YearFrom(Option<i32>),
    YearTo(Option<i32>),
    Rating(f64),
    Reset,
}

impl FilterChange {
    fn apply(&self, criteria: &mut FilterCriteria) {
        match self {
            FilterChange::ToggleGenre(genre) => criteria.toggle_genre(genre),
            FilterChange::OnlyGenre(genre) => criteria.select_genre(genre),
            FilterChange::YearFrom(year) => criteria.year_from = *year,
            FilterChange::YearTo(year) => criteria.year_to = *year,
            FilterChange::Rating(rating) => criteria.rating = *rating,
            FilterChange::Reset => criteria.reset(),
        }
    }
}

fn parse_input(line: &str) -> Result<Option<Input>> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.collect::<Vec<_>>().join(" ");

    let input = match command.to_lowercase().as_str() {
        "genre" | "g" => Input::Change(FilterChange::ToggleGenre(genre_name(&arg)?)),
        "only" => Input::Change(FilterChange::OnlyGenre(genre_name(&arg)?)),
        "from" => Input::Change(FilterChange::YearFrom(parse_year(&arg)?)),
        "to" => Input::Change(FilterChange::YearTo(parse_year(&arg)?)),
        "rating" | "r" => Input::Change(FilterChange::Rating(parse_rating(&arg)?)),
        "reset" => Input::Change(FilterChange::Reset),
        "show" | "s" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(Error::validation(format!("Unknown command: {}", other))),
    };
    Ok(Some(input))
}

/// Canonical spelling of a genre option; unknown names pass through.
fn genre_name(arg: &str) -> Result<String> {
    if arg.is_empty() {
        return Err(Error::validation("Missing genre name"));
    }
    Ok(GENRE_OPTIONS
        .iter()
        .find(|g| g.eq_ignore_ascii_case(arg))
        .map(|g| g.to_string())
        .unwrap_or_else(|| arg.to_string()))
}

/// `-` or an empty argument clears the bound.
fn parse_year(arg: &str) -> Result<Option<i32>> {
    if arg.is_empty() || arg == "-" {
        return Ok(None);
    }
    arg.parse()
        .map(Some)
        .map_err(|_| Error::validation(format!("Invalid year: {}", arg)))
}

fn parse_rating(arg: &str) -> Result<f64> {
    match arg.parse::<f64>() {
        Ok(r) if (0.0..=MAX_RATING).contains(&r) => Ok(r),
        _ => Err(Error::validation(format!(
            "Rating must be between 0 and {}",
            MAX_RATING
        ))),
    }
}

fn describe(criteria: &FilterCriteria) -> String {
    let genres = if criteria.genres.is_empty() {
        "All".to_string()
    } else {
        criteria.genres.join(", ")
    };
    let bound = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_else(|| "-".into());
    format!(
        "genres={} years={}..{} rating>={}",
        genres,
        bound(criteria.year_from),
        bound(criteria.year_to),
        criteria.rating
    )
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  genre <name>   toggle a genre ({})", GENRE_OPTIONS.join(", "));
    println!("  only <name>    show one genre, or `only all`");
    println!("  from <year|->  earliest year");
    println!("  to <year|->    latest year");
    println!("  rating <n>     minimum rating (0-10)");
    println!("  reset          clear all filters");
    println!("  show           print shelves again");
    println!("  quit");
    println!();
}

fn print_views(views: &CatalogViews) {
    println!();
    match views.featured {
        Some(ref movie) => println!("{} {}", "⭐ Featured:".bold().yellow(), movie_line(movie)),
        None => println!("{} {}", "⭐ Featured:".bold().yellow(), "No movies available".dimmed()),
    }
    if let Some(ref movie) = views.action_featured {
        println!("{} {}", "💥 Action:".bold(), movie_line(movie));
    }
    if let Some(ref movie) = views.drama_featured {
        println!("{} {}", "🎭 Drama:".bold(), movie_line(movie));
    }

    print_shelf("Top Rated", &views.top_rated);
    print_shelf("Popular Series", &views.popular_series);
    print_shelf("New Releases", &views.new_releases);
    print_shelf("Trending", &views.trending);
    for shelf in &views.languages {
        print_shelf(&capitalize(&shelf.language), &shelf.movies);
    }
    println!();
}

fn print_shelf(title: &str, movies: &[Movie]) {
    if movies.is_empty() {
        return;
    }
    println!();
    println!("{}", title.bold().cyan());
    for (i, movie) in movies.iter().enumerate() {
        println!("  {}. {}", i + 1, movie_line(movie));
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genre_commands() {
        assert_eq!(
            parse_input("genre sci-fi").unwrap(),
            Some(Input::Change(FilterChange::ToggleGenre("Sci-fi".to_string())))
        );
        assert_eq!(
            parse_input("only All").unwrap(),
            Some(Input::Change(FilterChange::OnlyGenre("All".to_string())))
        );
        assert!(parse_input("genre").is_err());
    }

    #[test]
    fn test_parse_bounds() {
        assert_eq!(
            parse_input("from 2010").unwrap(),
            Some(Input::Change(FilterChange::YearFrom(Some(2010))))
        );
        assert_eq!(
            parse_input("to -").unwrap(),
            Some(Input::Change(FilterChange::YearTo(None)))
        );
        assert!(parse_input("from soon").is_err());
        assert!(parse_input("rating 11").is_err());
        assert_eq!(
            parse_input("r 7.5").unwrap(),
            Some(Input::Change(FilterChange::Rating(7.5)))
        );
    }

    #[test]
    fn test_parse_control() {
        assert_eq!(parse_input("   ").unwrap(), None);
        assert_eq!(parse_input("quit").unwrap(), Some(Input::Quit));
        assert_eq!(parse_input("SHOW").unwrap(), Some(Input::Show));
        assert!(parse_input("dance").is_err());
    }

    #[test]
    fn test_change_apply() {
        let mut criteria = FilterCriteria::default();
        FilterChange::ToggleGenre("Drama".to_string()).apply(&mut criteria);
        FilterChange::YearFrom(Some(2000)).apply(&mut criteria);
        FilterChange::Rating(6.0).apply(&mut criteria);
        assert_eq!(describe(&criteria), "genres=Drama years=2000..- rating>=6");

        FilterChange::Reset.apply(&mut criteria);
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("english"), "English");
        assert_eq!(capitalize(""), "");
    }
}
