//! Deck state and the editing operations on it.
//!
//! ## Key Types
//!
//! - `DeckState`: Ordered entries plus reserve / display mission metadata
//! - `DeckCardEntry`: One card line with its quantity and flags
//! - `AddOutcome`: Added, or refused with a reason
//!
//! All edits are value-in, value-out: they borrow a deck and return a new
//! one, so the caller decides whether to keep or discard it.

pub mod editor;
pub mod ko;
pub mod state;

pub use editor::{
    add_card, apply_add, is_card_disabled_for_add, remove_card, toggle_exclude_from_draw, AddCheck,
    AddOutcome, EditRequest, DUPLICATE_CHARACTER_REASON,
};
pub use ko::{ko_dimmed_entries, ko_state, toggle_ko, KoState};
pub use state::{DeckCardEntry, DeckState};
