//! Browse command: a filtered, sorted results grid.

use super::{client, open_store, print_json, print_movie_table, spinner};
use crate::core::derive::{sort_by, SortKey};
use crate::models::config::Config;
use crate::models::filter::{FilterCriteria, MAX_RATING};
use crate::{Error, Result};
use colored::Colorize;

/// Fetch and print the movies matching a filter.
pub async fn browse(
    config: &Config,
    criteria: FilterCriteria,
    sort: &str,
    format: &str,
) -> Result<()> {
    let sort: SortKey = sort.parse()?;
    if !(0.0..=MAX_RATING).contains(&criteria.rating) {
        return Err(Error::validation(format!(
            "Rating must be between 0 and {}",
            MAX_RATING
        )));
    }

    let store = open_store(config);
    let client = client(config, &store)?;
    let query = criteria.to_query();
    tracing::debug!("Browsing with {}", query.to_query_string());

    let pb = spinner("Fetching movies...");
    let result = client.get_filtered_movies(&query).await;
    pb.finish_and_clear();

    let movies = result?;
    let sorted = sort_by(&movies, sort);

    if format == "json" {
        return print_json(&sorted);
    }

    if sorted.is_empty() {
        println!("No movies match these filters.");
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} movies:", sorted.len()).bold().cyan()
    );
    println!();
    print_movie_table(&sorted);
    Ok(())
}
