//! Core business logic modules.

pub mod auth;
pub mod coordinator;
pub mod derive;
pub mod normalize;
pub mod notify;
pub mod session;
pub mod users;
pub mod watchlist;
