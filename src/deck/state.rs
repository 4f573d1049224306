//! Deck state: the entity being edited.
//!
//! `DeckState` is an ordered list of `DeckCardEntry` plus the deck
//! metadata. Entries are stored in an `im::Vector`, so every edit can hand
//! back a new deck at O(1) clone cost while the caller keeps the old one
//! (undo stacks, optimistic UI).
//!
//! ## Invariants
//!
//! - No entry has quantity 0; an entry is removed when its last copy goes
//! - `is_ko` is only ever true on character entries
//! - `exclude_from_draw` is only ever true on training entries
//! - Copy counts saturate at `u32::MAX`; stored decks may carry any quantity

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardType};
use crate::core::DeckError;

/// One card line in a deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckCardEntry {
    pub card_id: CardId,

    #[serde(rename = "type")]
    pub card_type: CardType,

    pub quantity: u32,

    /// Knocked out (characters only).
    #[serde(default)]
    pub is_ko: bool,

    /// Pre-placed training card, left out of sample hands.
    #[serde(default)]
    pub exclude_from_draw: bool,
}

impl DeckCardEntry {
    /// Create an entry holding one copy.
    #[must_use]
    pub fn new(card_type: CardType, card_id: impl Into<CardId>) -> Self {
        Self {
            card_id: card_id.into(),
            card_type,
            quantity: 1,
            is_ko: false,
            exclude_from_draw: false,
        }
    }

    /// Set the quantity (builder pattern).
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Mark as knocked out (builder pattern).
    #[must_use]
    pub fn knocked_out(mut self) -> Self {
        self.is_ko = true;
        self
    }

    /// True for a character entry that is not KO'd.
    #[must_use]
    pub fn is_active_character(&self) -> bool {
        self.card_type == CardType::Character && !self.is_ko
    }

    /// True if this entry refers to the given card.
    #[must_use]
    pub fn is_card(&self, card_type: CardType, card_id: &CardId) -> bool {
        self.card_type == card_type && &self.card_id == card_id
    }

    fn normalize(mut self) -> Option<Self> {
        if self.quantity == 0 {
            return None;
        }
        self.is_ko &= self.card_type == CardType::Character;
        self.exclude_from_draw &= self.card_type == CardType::Training;
        Some(self)
    }
}

/// A deck under construction.
///
/// ## Example
///
/// ```
/// use overpower_deck::cards::CardType;
/// use overpower_deck::deck::{DeckCardEntry, DeckState};
///
/// let deck = DeckState::from_entries([
///     DeckCardEntry::new(CardType::Character, "c-1"),
///     DeckCardEntry::new(CardType::Power, "p-5").with_quantity(3),
///     DeckCardEntry::new(CardType::Power, "p-6").with_quantity(0),
/// ]);
///
/// // Zero-quantity lines never exist
/// assert_eq!(deck.len(), 2);
/// assert_eq!(deck.count_by_type(CardType::Power), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DeckStateData", into = "DeckStateData")]
pub struct DeckState {
    entries: Vector<DeckCardEntry>,

    /// Designated reserve character.
    pub reserve_character_id: Option<CardId>,

    /// Mission shown as the deck's cover card.
    pub display_mission_card_id: Option<CardId>,

    /// Built for a limited format.
    pub is_limited: bool,
}

impl DeckState {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deck from stored entries.
    ///
    /// Zero-quantity entries are dropped and stray KO / exclude flags on the
    /// wrong card types are cleared. Everything else is kept as given, legal
    /// or not.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = DeckCardEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .filter_map(DeckCardEntry::normalize)
                .collect(),
            ..Self::default()
        }
    }

    /// Set the reserve character without checking it (builder pattern).
    #[must_use]
    pub fn with_reserve_character(mut self, id: impl Into<CardId>) -> Self {
        self.reserve_character_id = Some(id.into());
        self
    }

    /// Set the display mission without checking it (builder pattern).
    #[must_use]
    pub fn with_display_mission(mut self, id: impl Into<CardId>) -> Self {
        self.display_mission_card_id = Some(id.into());
        self
    }

    /// Mark as a limited-format deck (builder pattern).
    #[must_use]
    pub fn limited(mut self, is_limited: bool) -> Self {
        self.is_limited = is_limited;
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DeckCardEntry> {
        self.entries.get(index)
    }

    /// Iterate over entries in deck order.
    pub fn entries(&self) -> impl Iterator<Item = &DeckCardEntry> {
        self.entries.iter()
    }

    /// Index of the entry for a card.
    #[must_use]
    pub fn position(&self, card_type: CardType, card_id: &CardId) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.is_card(card_type, card_id))
    }

    /// True if the deck holds the card.
    #[must_use]
    pub fn contains(&self, card_type: CardType, card_id: &CardId) -> bool {
        self.position(card_type, card_id).is_some()
    }

    /// Copies of a card in the deck.
    #[must_use]
    pub fn quantity_of(&self, card_type: CardType, card_id: &CardId) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.is_card(card_type, card_id))
            .map(|e| e.quantity)
            .fold(0, u32::saturating_add)
    }

    /// Total copies of a card type.
    #[must_use]
    pub fn count_by_type(&self, card_type: CardType) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.card_type == card_type)
            .map(|e| e.quantity)
            .fold(0, u32::saturating_add)
    }

    /// Characters in the deck, KO'd or not.
    #[must_use]
    pub fn character_count(&self) -> u32 {
        self.count_by_type(CardType::Character)
    }

    /// Character entries, KO'd or not.
    pub fn characters(&self) -> impl Iterator<Item = &DeckCardEntry> {
        self.entries
            .iter()
            .filter(|e| e.card_type == CardType::Character)
    }

    /// Total cards across all entries.
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| e.quantity)
            .fold(0, u32::saturating_add)
    }

    /// Cards in the draw pile (everything but characters, locations, missions).
    #[must_use]
    pub fn draw_pile_count(&self) -> u32 {
        self.entries
            .iter()
            .filter(|e| !e.card_type.is_pre_placed())
            .map(|e| e.quantity)
            .fold(0, u32::saturating_add)
    }

    /// Designate a reserve character already in the deck.
    pub fn set_reserve_character(&mut self, id: Option<CardId>) -> Result<(), DeckError> {
        if let Some(id) = &id {
            if !self.contains(CardType::Character, id) {
                return Err(DeckError::NotInDeck {
                    card_type: CardType::Character,
                    card_id: id.clone(),
                });
            }
        }
        self.reserve_character_id = id;
        Ok(())
    }

    /// Choose the display mission from missions already in the deck.
    pub fn set_display_mission(&mut self, id: Option<CardId>) -> Result<(), DeckError> {
        if let Some(id) = &id {
            if !self.contains(CardType::Mission, id) {
                return Err(DeckError::NotInDeck {
                    card_type: CardType::Mission,
                    card_id: id.clone(),
                });
            }
        }
        self.display_mission_card_id = id;
        Ok(())
    }

    /// Add one copy, creating the entry if needed. Returns the entry index.
    pub(crate) fn increment(&mut self, card_type: CardType, card_id: &CardId) -> usize {
        match self.position(card_type, card_id) {
            Some(index) => {
                if let Some(entry) = self.entries.get_mut(index) {
                    entry.quantity = entry.quantity.saturating_add(1);
                }
                index
            }
            None => {
                self.entries
                    .push_back(DeckCardEntry::new(card_type, card_id.clone()));
                self.entries.len() - 1
            }
        }
    }

    /// Remove one copy, dropping the entry at zero.
    ///
    /// Returns false if the card is not in the deck.
    pub(crate) fn decrement(&mut self, card_type: CardType, card_id: &CardId) -> bool {
        let Some(index) = self.position(card_type, card_id) else {
            return false;
        };
        let emptied = match self.entries.get_mut(index) {
            Some(entry) => {
                entry.quantity -= 1;
                entry.quantity == 0
            }
            None => return false,
        };
        if emptied {
            self.entries.remove(index);
        }
        true
    }

    /// Mutable entry access for flag toggles.
    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut DeckCardEntry> {
        self.entries.get_mut(index)
    }
}

/// Serialized form of `DeckState`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct DeckStateData {
    cards: Vec<DeckCardEntry>,
    reserve_character: Option<CardId>,
    display_mission: Option<CardId>,
    is_limited: bool,
}

impl From<DeckStateData> for DeckState {
    fn from(data: DeckStateData) -> Self {
        let mut deck = DeckState::from_entries(data.cards);
        deck.reserve_character_id = data.reserve_character;
        deck.display_mission_card_id = data.display_mission;
        deck.is_limited = data.is_limited;
        deck
    }
}

impl From<DeckState> for DeckStateData {
    fn from(deck: DeckState) -> Self {
        Self {
            cards: deck.entries.into_iter().collect(),
            reserve_character: deck.reserve_character_id,
            display_mission: deck.display_mission_card_id,
            is_limited: deck.is_limited,
        }
    }
}
