//! Readiness checks for the catalog client.
//!
//! `cinestream doctor` runs these before anything touches the network in
//! anger: the data directory must be writable for the session and
//! watchlist, a stored login must still decode, and the catalog API must
//! answer. A missing login is not a failure; browsing works anonymously.

mod api;
mod session;
mod storage;

use crate::models::config::Config;
use colored::Colorize;
use std::fmt;

/// How a single check came out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// Failed, with what the user should do about it.
    Failed { hint: &'static str },
}

/// One line of the doctor report.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub message: String,
    pub outcome: Outcome,
}

impl CheckResult {
    pub fn passed(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            message: message.into(),
            outcome: Outcome::Passed,
        }
    }

    pub fn failed(name: &'static str, message: impl Into<String>, hint: &'static str) -> Self {
        Self {
            name,
            message: message.into(),
            outcome: Outcome::Failed { hint },
        }
    }

    pub fn is_passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self.outcome {
            Outcome::Passed => None,
            Outcome::Failed { hint } => Some(hint),
        }
    }
}

/// Results of every check, in the order they ran.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub results: Vec<CheckResult>,
}

impl Report {
    /// True when the client can log in, browse and keep a watchlist.
    pub fn is_ready(&self) -> bool {
        self.results.iter().all(CheckResult::is_passed)
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_passed()).count()
    }

    /// Print one line per check, with a hint under each failure.
    pub fn print(&self) {
        for result in &self.results {
            let tag = if result.is_passed() {
                "✓".green()
            } else {
                "✗".red()
            };
            println!("{} {:<12} {}", tag, result.name.bold(), result.message);
            if let Some(hint) = result.hint() {
                println!("  {} {}", "hint:".yellow(), hint);
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} checks passed",
            self.passed_count(),
            self.results.len()
        )
    }
}

/// Check storage, then the stored session, then the catalog API.
pub async fn run(config: &Config) -> Report {
    let results = vec![
        storage::check(&config.storage.data_dir),
        session::check(&config.storage.data_dir),
        api::check(&config.api).await,
    ];
    tracing::debug!("Preflight finished: {} checks", results.len());
    Report { results }
}
