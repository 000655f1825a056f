//! Command line argument definitions.

use clap::{Parser, Subcommand};

/// Cinestream - Browse a movie catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "cinestream")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(long)]
        password: String,

        /// Password again
        #[arg(long)]
        confirm_password: String,

        /// Agree to the terms of service
        #[arg(long)]
        agree_to_terms: bool,
    },

    /// Log in and store the session
    Login {
        /// Email address
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Keep the session for a week
        #[arg(long)]
        remember_me: bool,
    },

    /// Forget the stored session
    Logout,

    /// Confirm an email address with the token from the verification mail
    Verify {
        /// Verification token
        #[arg(value_name = "TOKEN")]
        token: String,
    },

    /// Show the dashboard shelves
    Dashboard {
        /// Read filter commands from stdin and refetch as they change
        #[arg(short, long)]
        interactive: bool,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Browse movies matching a filter
    Browse {
        /// Genre to include (repeat or comma-separate for several)
        #[arg(short, long, value_delimiter = ',')]
        genre: Vec<String>,

        /// Earliest release year
        #[arg(long)]
        year_from: Option<i32>,

        /// Latest release year
        #[arg(long)]
        year_to: Option<i32>,

        /// Minimum rating (0-10)
        #[arg(short, long, default_value_t = 0.0)]
        min_rating: f64,

        /// Sort order: relevance, rating, year
        #[arg(short, long, default_value = "relevance")]
        sort: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show details of a single movie
    Movie {
        /// Movie ID
        #[arg(value_name = "ID")]
        id: String,

        /// Add to or remove from the watchlist, keyed by the ID as typed
        #[arg(long)]
        toggle_watchlist: bool,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Manage the local watchlist
    Watchlist {
        #[command(subcommand)]
        action: WatchlistAction,
    },

    /// Administer user accounts (admin only)
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Check API, session and storage
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum WatchlistAction {
    /// List saved movies
    List {
        /// Fetch titles from the API
        #[arg(long)]
        details: bool,
    },

    /// Add a movie if absent, remove it if present
    Toggle {
        /// Movie ID
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Check whether a movie is saved
    Contains {
        /// Movie ID
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersAction {
    /// List user accounts
    List {
        /// Match name or email
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by role: admin, user
        #[arg(long)]
        role: Option<String>,

        /// Filter by status: active, inactive, locked, pending
        #[arg(long)]
        status: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Update a user account
    Update {
        /// User ID
        #[arg(value_name = "ID")]
        id: String,

        /// Activate the account
        #[arg(long, conflicts_with = "deactivate")]
        activate: bool,

        /// Deactivate the account
        #[arg(long)]
        deactivate: bool,

        /// New role: admin, user
        #[arg(long)]
        role: Option<String>,

        /// Lock until this timestamp (RFC 3339)
        #[arg(long)]
        lock_until: Option<String>,
    },
}
