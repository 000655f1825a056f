//! External service integrations.

pub mod api;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
