//! Cinestream CLI
//!
//! A command-line client for the movie catalog: auth, dashboard shelves,
//! filtered browsing, a local watchlist and the admin console.

use clap::Parser;
use cinestream::cli::{
    args::{Cli, Commands, UsersAction, WatchlistAction},
    commands::{auth, browse, dashboard, doctor, movie, users, watchlist},
};
use cinestream::core::auth::{LoginForm, RegisterForm};
use cinestream::core::users::UserQuery;
use cinestream::models::config::load_config;
use cinestream::models::filter::FilterCriteria;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = load_config();
    tracing::debug!("Using API at {}", config.api.base_url);

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
            agree_to_terms,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password,
                agree_to_terms,
            };
            auth::register(&config, form).await?;
        }

        Commands::Login {
            email,
            password,
            remember_me,
        } => {
            let form = LoginForm {
                email,
                password,
                remember_me,
            };
            auth::login(&config, form).await?;
        }

        Commands::Logout => {
            auth::logout(&config).await?;
        }

        Commands::Verify { token } => {
            auth::verify(&config, &token).await?;
        }

        Commands::Dashboard {
            interactive,
            format,
        } => {
            if interactive {
                dashboard::interactive(&config).await?;
            } else {
                dashboard::show(&config, &format).await?;
            }
        }

        Commands::Browse {
            genre,
            year_from,
            year_to,
            min_rating,
            sort,
            format,
        } => {
            let mut criteria = FilterCriteria {
                year_from,
                year_to,
                rating: min_rating,
                ..Default::default()
            };
            for g in genre.iter().map(|g| g.trim()).filter(|g| !g.is_empty()) {
                criteria.toggle_genre(g);
            }
            browse::browse(&config, criteria, &sort, &format).await?;
        }

        Commands::Movie {
            id,
            toggle_watchlist,
            format,
        } => {
            movie::show(&config, &id, toggle_watchlist, &format).await?;
        }

        Commands::Watchlist { action } => match action {
            WatchlistAction::List { details } => {
                watchlist::list(&config, details).await?;
            }
            WatchlistAction::Toggle { id } => {
                watchlist::toggle(&config, &id).await?;
            }
            WatchlistAction::Contains { id } => {
                watchlist::contains(&config, &id).await?;
            }
        },

        Commands::Users { action } => match action {
            UsersAction::List {
                search,
                role,
                status,
                format,
            } => {
                let query = UserQuery {
                    search,
                    role: role.as_deref().map(str::parse).transpose()?,
                    status: status.as_deref().map(str::parse).transpose()?,
                };
                users::list(&config, query, &format).await?;
            }
            UsersAction::Update {
                id,
                activate,
                deactivate,
                role,
                lock_until,
            } => {
                let active = match (activate, deactivate) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
                let role = role.as_deref().map(str::parse).transpose()?;
                users::update(&config, &id, active, role, lock_until).await?;
            }
        },

        Commands::Doctor => {
            doctor::doctor(&config).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("cinestream=debug")
    } else {
        EnvFilter::new("cinestream=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
