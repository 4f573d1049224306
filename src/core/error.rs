//! Error type for the editing boundary, catalog loading and deck storage.
//!
//! Only malformed requests and I/O-shaped failures are errors. A refused add
//! (category cap reached) is an ordinary outcome, and legality problems are
//! reported through `ValidationReport`, never through `DeckError`.

use thiserror::Error;

use crate::cards::{CardId, CardType};

/// Errors returned by deck edits, catalog loading and deck stores.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("unknown card type \"{0}\"")]
    UnknownCardType(String),

    #[error("missing card id")]
    MissingCardId,

    #[error("no {card_type} card with id \"{card_id}\" in the catalog")]
    UnknownCard { card_type: CardType, card_id: CardId },

    #[error("{card_type} card \"{card_id}\" is not in the deck")]
    NotInDeck { card_type: CardType, card_id: CardId },

    #[error("deck entry {index} out of range (deck has {len} entries)")]
    EntryOutOfRange { index: usize, len: usize },

    #[error("deck entry {index} is a {found} card, expected {expected}")]
    WrongEntryType {
        index: usize,
        expected: CardType,
        found: CardType,
    },

    #[error("card \"{card_id}\" registered twice as {card_type}")]
    DuplicateCard { card_type: CardType, card_id: CardId },

    #[error("deck \"{0}\" not found")]
    DeckNotFound(String),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeckError {
    /// True for rejections of a malformed edit request.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DeckError::UnknownCardType(_)
                | DeckError::MissingCardId
                | DeckError::UnknownCard { .. }
                | DeckError::NotInDeck { .. }
                | DeckError::EntryOutOfRange { .. }
                | DeckError::WrongEntryType { .. }
        )
    }
}
