//! Cinestream Library
//!
//! Client for a movie-streaming catalog: dashboard shelves derived from the
//! fetched collection, debounced filter fetching, a local watchlist and the
//! REST calls behind the auth and admin screens.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;

pub use error::{Error, Result};
