//! Doctor command: run the preflight checks on demand.

use crate::models::config::Config;
use crate::preflight;
use crate::{Error, Result};
use colored::Colorize;

/// Run every preflight check and report.
pub async fn doctor(config: &Config) -> Result<()> {
    println!("{}", "Checking cinestream setup...".bold());
    println!();

    let report = preflight::run(config).await;
    report.print();
    println!();

    if report.is_ready() {
        println!("{}", format!("Ready to browse: {}", report).green());
        Ok(())
    } else {
        Err(Error::other(format!(
            "{}. Follow the hints above and run `cinestream doctor` again.",
            report
        )))
    }
}
