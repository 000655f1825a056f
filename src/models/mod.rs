//! Data models shared across the client.

pub mod api;
pub mod config;
pub mod filter;
pub mod movie;
pub mod user;
