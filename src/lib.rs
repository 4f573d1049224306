//! # overpower-deck
//!
//! Deck legality and validation engine for the Overpower card game.
//!
//! ## Design Principles
//!
//! 1. **Value In, Value Out**: Decks are plain values. Every edit borrows a
//!    deck and returns a new one; O(1) clones via `im-rs` make this cheap.
//!
//! 2. **Pure Rules**: Limits, stats, usability and legality are functions of
//!    `(deck, catalog, config)` with no hidden state, so every recompute on
//!    every edit gives the same answer.
//!
//! 3. **Configuration Over Convention**: Caps and sizes live in
//!    `RulesConfig`; the rule modules never hardcode them.
//!
//! ## Architecture
//!
//! - **Catalog seam**: `CatalogProvider` supplies immutable card records.
//!   `Catalog` is the in-memory implementation.
//!
//! - **Refusals are not errors**: an add that would break a cap returns
//!   `AddOutcome::Refused` with a reason. `DeckError` is for malformed
//!   requests, catalog loading and storage.
//!
//! - **Accumulating reports**: `ValidationReport` collects every violation;
//!   one bad entry never hides another.
//!
//! ## Modules
//!
//! - `core`: Rules configuration, errors, RNG
//! - `cards`: Card records and the catalog
//! - `deck`: Deck state, editing, KO tracking
//! - `rules`: Limits, stats, usability, legality
//! - `draw`: Sample hands
//! - `store`: Persistence seam

pub mod core;
pub mod cards;
pub mod deck;
pub mod rules;
pub mod draw;
pub mod store;

// Re-export commonly used types
pub use crate::core::{DeckError, DrawPileRule, DrawRng, DrawRngState, RulesConfig};

pub use crate::cards::{
    CardId, CardRecord, CardType, Catalog, CatalogProvider, CharacterStats, PowerType, Stat,
    StatRequirement,
};

pub use crate::deck::{
    add_card, is_card_disabled_for_add, remove_card, toggle_ko, AddCheck, AddOutcome, DeckCardEntry,
    DeckState, EditRequest, KoState,
};

pub use crate::rules::{
    aggregate_stats, compute_legality, evaluate_limit, is_power_card_usable, DeckRules, DeckStatus,
    LimitCategory, LimitResult, OpdKey, Rule, StatTotals, ValidationReport, Violation,
};

pub use crate::draw::{can_draw_hand, draw_hand, SampleHand};

pub use crate::store::{save_validated, DeckStore, MemoryDeckStore};
