//! Deck persistence seam.
//!
//! The engine never stores decks itself. Hosts implement `DeckStore` over
//! whatever backend they use; `MemoryDeckStore` covers tests and tools.
//! `save_validated` is the only save path the engine offers: it computes
//! legality first, writes back the self-healed references, then saves.

pub mod memory;

pub use memory::MemoryDeckStore;

use tracing::debug;

use crate::cards::CatalogProvider;
use crate::core::{DeckError, RulesConfig};
use crate::deck::DeckState;
use crate::rules::{compute_legality, ValidationReport};

/// Load and save decks by id.
pub trait DeckStore {
    /// Load a deck. Fails with `DeckError::DeckNotFound` if absent.
    fn load_deck(&self, deck_id: &str) -> Result<DeckState, DeckError>;

    /// Save a deck, replacing any previous version.
    fn save_deck(&mut self, deck_id: &str, deck: &DeckState) -> Result<(), DeckError>;
}

/// Validate a deck, apply the healed references, and save it.
///
/// Invalid decks are saved too; the report tells the caller what is wrong.
pub fn save_validated<S, C>(
    store: &mut S,
    deck_id: &str,
    deck: &DeckState,
    catalog: &C,
    config: &RulesConfig,
) -> Result<ValidationReport, DeckError>
where
    S: DeckStore + ?Sized,
    C: CatalogProvider + ?Sized,
{
    let report = compute_legality(deck, catalog, config);
    let mut healed = deck.clone();
    report.apply_healing(&mut healed);
    store.save_deck(deck_id, &healed)?;
    debug!(deck_id, is_valid = report.is_valid, "saved deck");
    Ok(report)
}
