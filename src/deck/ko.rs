//! KO / active-character tracking.
//!
//! Each character entry is either `Active` or `KnockedOut`. Toggling flips
//! one entry and nothing else: a KO'd character keeps its slot and its
//! quantity, but drops out of stat sums and usability checks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::{DeckCardEntry, DeckState};
use crate::cards::{CardType, CatalogProvider};
use crate::core::DeckError;
use crate::rules::opd::normalize;
use crate::rules::usability::{active_characters, is_card_usable};

/// State of one character entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KoState {
    Active,
    KnockedOut,
}

impl KoState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            KoState::Active => KoState::KnockedOut,
            KoState::KnockedOut => KoState::Active,
        }
    }
}

/// KO state of the character entry at `index`.
pub fn ko_state(deck: &DeckState, index: usize) -> Result<KoState, DeckError> {
    let entry = character_entry(deck, index)?;
    Ok(if entry.is_ko {
        KoState::KnockedOut
    } else {
        KoState::Active
    })
}

/// Flip the KO flag of the character entry at `index`.
///
/// Returns a new deck; the input is untouched. Fails if `index` is out of
/// range or not a character entry.
///
/// ## Example
///
/// ```
/// use overpower_deck::cards::CardType;
/// use overpower_deck::deck::{toggle_ko, DeckCardEntry, DeckState};
///
/// let deck = DeckState::from_entries([DeckCardEntry::new(CardType::Character, "c-1")]);
/// let ko = toggle_ko(&deck, 0).unwrap();
/// assert!(ko.get(0).unwrap().is_ko);
/// assert_eq!(ko.character_count(), 1);
///
/// let back = toggle_ko(&ko, 0).unwrap();
/// assert_eq!(back, deck);
/// ```
pub fn toggle_ko(deck: &DeckState, index: usize) -> Result<DeckState, DeckError> {
    character_entry(deck, index)?;
    let mut next = deck.clone();
    if let Some(entry) = next.entry_mut(index) {
        entry.is_ko = !entry.is_ko;
        debug!(card_id = %entry.card_id, is_ko = entry.is_ko, "toggled character KO");
    }
    Ok(next)
}

fn character_entry(deck: &DeckState, index: usize) -> Result<&DeckCardEntry, DeckError> {
    let entry = deck.get(index).ok_or(DeckError::EntryOutOfRange {
        index,
        len: deck.len(),
    })?;
    if entry.card_type != CardType::Character {
        return Err(DeckError::WrongEntryType {
            index,
            expected: CardType::Character,
            found: entry.card_type,
        });
    }
    Ok(entry)
}

/// Indices of entries the active team cannot currently use.
///
/// Empty unless at least one character is KO'd. Otherwise dims:
/// - the KO'd characters themselves
/// - specials and advanced-universe cards tied to a KO'd character that has
///   no active printing left
/// - teamwork and ally cards once a single active character remains in a
///   multi-character deck
/// - power and universe cards whose requirement no active character meets
pub fn ko_dimmed_entries<C>(deck: &DeckState, catalog: &C) -> Vec<usize>
where
    C: CatalogProvider + ?Sized,
{
    if !deck.characters().any(|e| e.is_ko) {
        return Vec::new();
    }

    let active = active_characters(deck, catalog);
    let active_names: Vec<String> = active.iter().map(|c| normalize(c.name())).collect();
    let ko_names: Vec<String> = deck
        .characters()
        .filter(|e| e.is_ko)
        .filter_map(|e| catalog.card_by_id(CardType::Character, &e.card_id))
        .map(|r| normalize(&r.name))
        .filter(|name| !active_names.contains(name))
        .collect();
    let lone_survivor = deck.character_count() > 1 && active.len() == 1;

    deck.entries()
        .enumerate()
        .filter(|(_, entry)| {
            if entry.card_type == CardType::Character {
                return entry.is_ko;
            }
            let Some(record) = catalog.card_by_id(entry.card_type, &entry.card_id) else {
                return false;
            };
            let orphaned = matches!(entry.card_type, CardType::Special | CardType::AdvancedUniverse)
                && record
                    .required_character()
                    .map_or(false, |name| ko_names.contains(&normalize(name)));
            let teamwork = lone_survivor
                && matches!(entry.card_type, CardType::Teamwork | CardType::AllyUniverse);
            let unusable = (entry.card_type == CardType::Power || entry.card_type.is_universe())
                && !is_card_usable(record, &active);
            orphaned || teamwork || unusable
        })
        .map(|(index, _)| index)
        .collect()
}
