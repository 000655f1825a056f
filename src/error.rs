//! Error types for the catalog client.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the catalog client.
#[derive(Error, Debug)]
pub enum Error {
    // Request errors
    #[error("No response from server. Please try again later. ({0})")]
    Transport(String),

    #[error("{}", status_message(*.status, .message.as_deref()))]
    Status { status: u16, message: Option<String> },

    #[error("{0}")]
    Application(String),

    // Session errors
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Not logged in. Run `cinestream login` first")]
    NotAuthenticated,

    // Form errors
    #[error("{0}")]
    Validation(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Movie not found: {0}")]
    MovieNotFound(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

fn status_message(status: u16, message: Option<&str>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => msg.to_string(),
        _ => format!("Error: {}", status),
    }
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a client-side validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }

    /// Whether the request never reached the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Whether the server answered with `success: false`.
    pub fn is_application(&self) -> bool {
        matches!(self, Error::Application(_))
    }
}
