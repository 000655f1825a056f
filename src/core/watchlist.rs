//! Watchlist persisted in local storage.
//!
//! The watchlist is a JSON array of movie ids under a fixed key. Every
//! mutation reads the current array, changes it and writes it back at once;
//! there is no batching and no cross-process locking.

use crate::models::movie::MovieId;
use crate::services::store::KeyValueStore;
use crate::Result;

/// Storage key holding the watchlist.
pub const WATCHLIST_KEY: &str = "watchlist";

/// Watchlist over a key-value store.
#[derive(Debug)]
pub struct Watchlist<S> {
    store: S,
}

impl<S: KeyValueStore> Watchlist<S> {
    /// Create a watchlist over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persisted ids, in insertion order.
    pub fn ids(&self) -> Result<Vec<MovieId>> {
        let Some(raw) = self.store.get(WATCHLIST_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Option<Vec<MovieId>>>(&raw) {
            Ok(ids) => Ok(ids.unwrap_or_default()),
            Err(e) => {
                tracing::warn!("Unreadable watchlist, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Whether `id` is on the watchlist.
    pub fn contains(&self, id: &MovieId) -> Result<bool> {
        Ok(self.ids()?.contains(id))
    }

    /// Flip membership of `id` and persist. Returns the new membership.
    pub fn toggle(&self, id: &MovieId) -> Result<bool> {
        let mut ids = self.ids()?;
        let present = ids.contains(id);

        if present {
            ids.retain(|existing| existing != id);
        } else {
            ids.push(id.clone());
        }

        self.store
            .set(WATCHLIST_KEY, &serde_json::to_string(&ids)?)?;

        tracing::info!(
            "{} {} watchlist",
            if present { "Removed from" } else { "Added to" },
            id
        );
        Ok(!present)
    }
}

/// Watch toggle state for one displayed movie.
///
/// Seeded once from the store; it does not follow changes made elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchToggle {
    id: MovieId,
    in_watchlist: bool,
}

impl WatchToggle {
    /// Read the initial state for `id`.
    pub fn seed<S: KeyValueStore>(watchlist: &Watchlist<S>, id: MovieId) -> Result<Self> {
        let in_watchlist = watchlist.contains(&id)?;
        Ok(Self { id, in_watchlist })
    }

    /// Movie this toggle belongs to.
    pub fn id(&self) -> &MovieId {
        &self.id
    }

    /// Current displayed state.
    pub fn is_on(&self) -> bool {
        self.in_watchlist
    }

    /// Toggle through the store and adopt its answer.
    pub fn toggle<S: KeyValueStore>(&mut self, watchlist: &Watchlist<S>) -> Result<bool> {
        self.in_watchlist = watchlist.toggle(&self.id)?;
        Ok(self.in_watchlist)
    }

    /// Message shown after a toggle.
    pub fn message(&self) -> &'static str {
        if self.in_watchlist {
            "Added to watchlist"
        } else {
            "Removed from watchlist"
        }
    }
}
