//! Register, login, logout and verify commands.

use super::{open_store, spinner};
use crate::core::auth::{self, LoginForm, RegisterForm};
use crate::core::session::{Landing, Session};
use crate::models::config::Config;
use crate::services::api::{CatalogClient, Verification};
use crate::{Error, Result};
use colored::Colorize;

/// Create an account.
pub async fn register(config: &Config, form: RegisterForm) -> Result<()> {
    let client = CatalogClient::new(&config.api)?;

    let pb = spinner("Creating account...");
    let result = auth::register(&client, &form).await;
    pb.finish_and_clear();

    let message = result?;
    println!(
        "{} {}",
        "✅".green(),
        message
            .as_deref()
            .unwrap_or("Registration successful. Check your email to verify your account.")
            .green()
    );
    Ok(())
}

/// Log in and store the session.
pub async fn login(config: &Config, form: LoginForm) -> Result<()> {
    let client = CatalogClient::new(&config.api)?;
    let store = open_store(config);
    let session = Session::new(&store);

    let pb = spinner("Logging in...");
    let result = auth::login(&client, &session, &form).await;
    pb.finish_and_clear();

    let outcome = result?;
    println!(
        "{} {}",
        "✅".green(),
        outcome.message.as_deref().unwrap_or("Login successful").green()
    );
    match outcome.landing {
        Landing::AdminConsole => {
            println!("Signed in as administrator. Try: cinestream users list")
        }
        Landing::UserDashboard => println!("Try: cinestream dashboard"),
    }
    Ok(())
}

/// Forget the stored session.
pub async fn logout(config: &Config) -> Result<()> {
    let store = open_store(config);
    Session::new(&store).clear()?;
    println!("{}", "Logged out".green());
    Ok(())
}

/// Confirm an email address.
pub async fn verify(config: &Config, token: &str) -> Result<()> {
    let client = CatalogClient::new(&config.api)?;

    let pb = spinner("Verifying email...");
    let result = client.verify(token).await;
    pb.finish_and_clear();

    match result? {
        Verification::Verified(message) => {
            let message = if message.is_empty() {
                "Email verified".to_string()
            } else {
                message
            };
            println!("{} {}", "✅".green(), message.green());
            Ok(())
        }
        Verification::Expired => {
            println!(
                "{}",
                "⚠️  Verification link expired. Log in again to receive a new one.".yellow()
            );
            Ok(())
        }
        Verification::Rejected(message) => Err(Error::Application(message)),
    }
}
