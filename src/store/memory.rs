//! In-memory deck store.

use rustc_hash::FxHashMap;

use super::DeckStore;
use crate::core::DeckError;
use crate::deck::DeckState;

/// Deck store backed by a hash map.
///
/// ## Example
///
/// ```
/// use overpower_deck::deck::DeckState;
/// use overpower_deck::store::{DeckStore, MemoryDeckStore};
///
/// let mut store = MemoryDeckStore::new();
/// store.save_deck("deck-1", &DeckState::new()).unwrap();
/// assert!(store.load_deck("deck-1").is_ok());
/// assert!(store.load_deck("deck-2").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryDeckStore {
    decks: FxHashMap<String, DeckState>,
}

impl MemoryDeckStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Drop a stored deck. Returns it if it existed.
    pub fn remove(&mut self, deck_id: &str) -> Option<DeckState> {
        self.decks.remove(deck_id)
    }
}

impl DeckStore for MemoryDeckStore {
    fn load_deck(&self, deck_id: &str) -> Result<DeckState, DeckError> {
        self.decks
            .get(deck_id)
            .cloned()
            .ok_or_else(|| DeckError::DeckNotFound(deck_id.to_string()))
    }

    fn save_deck(&mut self, deck_id: &str, deck: &DeckState) -> Result<(), DeckError> {
        self.decks.insert(deck_id.to_string(), deck.clone());
        Ok(())
    }
}
