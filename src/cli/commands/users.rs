//! Admin console commands.

use super::{authed_client, open_store, print_json, spinner};
use crate::core::users::{initials, UserQuery};
use crate::models::api::UpdateUserRequest;
use crate::models::config::Config;
use crate::models::user::{Role, User, UserId, UserStatus};
use crate::{Error, Result};
use colored::{ColoredString, Colorize};

/// List user accounts matching the console filters.
pub async fn list(config: &Config, query: UserQuery, format: &str) -> Result<()> {
    let store = open_store(config);
    let client = authed_client(config, &store)?;

    let pb = spinner("Loading users...");
    let result = client.get_users().await;
    pb.finish_and_clear();

    let users = result?;
    let shown = query.apply(&users);

    if format == "json" {
        return print_json(&shown);
    }

    println!("{}", "👥 Users".bold().cyan());
    println!();

    if shown.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!(
        "{:<4} {:<24} {:<30} {:<14} {}",
        "".bold(),
        "Name".bold(),
        "Email".bold(),
        "Role".bold(),
        "Status".bold()
    );
    println!("{}", "-".repeat(84));

    for user in &shown {
        println!(
            "{:<4} {:<24} {:<30} {:<14} {}",
            initials(&user.name),
            user.name,
            user.email,
            user.role.label(),
            status_badge(user)
        );
    }

    println!();
    println!("Showing {} of {} users", shown.len(), users.len());
    Ok(())
}

/// Update a user account.
pub async fn update(
    config: &Config,
    id: &str,
    active: Option<bool>,
    role: Option<Role>,
    lock_until: Option<String>,
) -> Result<()> {
    let request = UpdateUserRequest {
        lock_until,
        is_active: active,
        role: role.map(|r| r.to_string()),
    };
    if request.is_empty() {
        return Err(Error::validation(
            "Nothing to update. Pass --activate, --deactivate, --role or --lock-until",
        ));
    }

    let store = open_store(config);
    let client = authed_client(config, &store)?;
    let id: UserId = super::parse_id(id);

    let pb = spinner("Updating user...");
    let result = client.update_user(&id, &request).await;
    pb.finish_and_clear();

    let message = result?;
    println!(
        "{} {}",
        "✅".green(),
        message.as_deref().unwrap_or("User updated").green()
    );
    Ok(())
}

fn status_badge(user: &User) -> ColoredString {
    let status = UserStatus::of(user);
    let label = status.to_string();
    match status {
        UserStatus::Active => label.green(),
        UserStatus::Inactive => label.dimmed(),
        UserStatus::Locked => label.red(),
        UserStatus::Pending => label.yellow(),
    }
}
