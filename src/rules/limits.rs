//! Per-category limit evaluators.
//!
//! Each `LimitCategory` counts the copies of its members in a deck and
//! compares the count to a cap read from `RulesConfig`. A category is
//! `reached` once the count meets the cap; from then on every catalog row of
//! the category that is not already in the deck is reported as disabled.
//!
//! One-per-deck categories are keyed by `OpdKey`, so every printing of a
//! named card shares one bucket.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::opd::OpdKey;
use crate::cards::{CardId, CardRecord, CardType, CatalogProvider};
use crate::core::RulesConfig;
use crate::deck::DeckState;

/// A capped group of cards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitCategory {
    Character,
    Location,
    Mission,
    Cataclysm,
    Assist,
    Ambush,
    Fortification,
    /// Every printing sharing a one-per-deck key.
    OnePerDeck(OpdKey),
}

impl LimitCategory {
    /// The fixed categories, without one-per-deck buckets.
    pub const FIXED: [LimitCategory; 7] = [
        LimitCategory::Character,
        LimitCategory::Location,
        LimitCategory::Mission,
        LimitCategory::Cataclysm,
        LimitCategory::Assist,
        LimitCategory::Ambush,
        LimitCategory::Fortification,
    ];

    /// Cap for this category.
    #[must_use]
    pub fn cap(&self, config: &RulesConfig) -> u32 {
        match self {
            LimitCategory::Character => config.max_characters,
            LimitCategory::Location => config.max_locations,
            LimitCategory::Mission => config.max_missions,
            LimitCategory::Cataclysm => config.max_cataclysm,
            LimitCategory::Assist => config.max_assist,
            LimitCategory::Ambush => config.max_ambush,
            LimitCategory::Fortification => config.max_fortification,
            LimitCategory::OnePerDeck(_) => config.one_per_deck_cap,
        }
    }

    /// True if the record counts toward this category.
    #[must_use]
    pub fn includes(&self, record: &CardRecord) -> bool {
        match self {
            LimitCategory::Character => record.card_type == CardType::Character,
            LimitCategory::Location => record.card_type == CardType::Location,
            LimitCategory::Mission => record.card_type == CardType::Mission,
            LimitCategory::Cataclysm => record.is_cataclysm,
            LimitCategory::Assist => record.is_assist,
            LimitCategory::Ambush => record.is_ambush,
            LimitCategory::Fortification => record.is_fortification,
            LimitCategory::OnePerDeck(key) => OpdKey::for_record(record).as_ref() == Some(key),
        }
    }

    /// Card types whose catalog rows can belong to this category.
    fn member_types(&self) -> &'static [CardType] {
        match self {
            LimitCategory::Character => &[CardType::Character],
            LimitCategory::Location => &[CardType::Location],
            LimitCategory::Mission => &[CardType::Mission],
            _ => &CardType::ALL,
        }
    }

    /// Message shown on controls disabled by this category.
    #[must_use]
    pub fn reason(&self, cap: u32) -> String {
        match self {
            LimitCategory::Character => {
                format!("Deck already has {cap} {}", plural(cap, "character"))
            }
            LimitCategory::Location => {
                format!("Deck already has {cap} {}", plural(cap, "location"))
            }
            LimitCategory::Mission => format!("Deck already has {cap} {}", plural(cap, "mission")),
            LimitCategory::OnePerDeck(key) => {
                format!("\"{}\" is limited to {cap} per deck", key.label())
            }
            special => format!("Only {cap} {special} card allowed per deck"),
        }
    }
}

impl fmt::Display for LimitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitCategory::Character => f.write_str("Character"),
            LimitCategory::Location => f.write_str("Location"),
            LimitCategory::Mission => f.write_str("Mission"),
            LimitCategory::Cataclysm => f.write_str("Cataclysm"),
            LimitCategory::Assist => f.write_str("Assist"),
            LimitCategory::Ambush => f.write_str("Ambush"),
            LimitCategory::Fortification => f.write_str("Fortification"),
            LimitCategory::OnePerDeck(key) => write!(f, "One Per Deck ({key})"),
        }
    }
}

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// A catalog row that may not be added.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisabledRow {
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub card_id: CardId,
}

/// Count against cap for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitResult {
    pub category: LimitCategory,
    pub count: u32,
    pub cap: u32,
    pub reached: bool,
    /// Why rows are disabled, when `reached`.
    pub reason: Option<String>,
    /// Catalog rows of the category not in the deck, when `reached`.
    pub disabled: Vec<DisabledRow>,
}

impl LimitResult {
    /// True if the count is above the cap.
    #[must_use]
    pub fn exceeded(&self) -> bool {
        self.count > self.cap
    }

    /// True if one more copy would go over the cap.
    #[must_use]
    pub fn refuses_another(&self) -> bool {
        self.count.saturating_add(1) > self.cap
    }
}

/// Limit categories a record belongs to, primary category first.
#[must_use]
pub fn applicable_limits(record: &CardRecord) -> SmallVec<[LimitCategory; 4]> {
    let mut limits = SmallVec::new();
    match record.card_type {
        CardType::Character => limits.push(LimitCategory::Character),
        CardType::Location => limits.push(LimitCategory::Location),
        CardType::Mission => limits.push(LimitCategory::Mission),
        _ => {}
    }
    if let Some(key) = OpdKey::for_record(record) {
        limits.push(LimitCategory::OnePerDeck(key));
    }
    let flags = [
        (record.is_cataclysm, LimitCategory::Cataclysm),
        (record.is_assist, LimitCategory::Assist),
        (record.is_ambush, LimitCategory::Ambush),
        (record.is_fortification, LimitCategory::Fortification),
    ];
    for (set, category) in flags {
        if set {
            limits.push(category);
        }
    }
    limits
}

/// Copies in the deck counting toward a category.
///
/// Structural categories count by entry type, so catalog misses still hold
/// their slot. Flag and one-per-deck categories need the record.
pub fn category_count<C>(deck: &DeckState, catalog: &C, category: &LimitCategory) -> u32
where
    C: CatalogProvider + ?Sized,
{
    match category {
        LimitCategory::Character => deck.count_by_type(CardType::Character),
        LimitCategory::Location => deck.count_by_type(CardType::Location),
        LimitCategory::Mission => deck.count_by_type(CardType::Mission),
        _ => deck
            .entries()
            .filter(|e| {
                catalog
                    .card_by_id(e.card_type, &e.card_id)
                    .map_or(false, |record| category.includes(record))
            })
            .map(|e| e.quantity)
            .fold(0, u32::saturating_add),
    }
}

/// Evaluate one category against the deck.
///
/// ## Example
///
/// ```
/// use overpower_deck::cards::{Catalog, CardRecord, CardType};
/// use overpower_deck::core::RulesConfig;
/// use overpower_deck::deck::{DeckCardEntry, DeckState};
/// use overpower_deck::rules::{evaluate_limit, LimitCategory};
///
/// let catalog = Catalog::from_records([
///     CardRecord::new("l-1", CardType::Location, "Barsoom"),
///     CardRecord::new("l-2", CardType::Location, "Pellucidar"),
/// ])
/// .unwrap();
/// let deck = DeckState::from_entries([DeckCardEntry::new(CardType::Location, "l-1")]);
///
/// let limit = evaluate_limit(&deck, &catalog, &RulesConfig::default(), &LimitCategory::Location);
/// assert!(limit.reached);
/// assert_eq!(limit.disabled.len(), 1);
/// assert_eq!(limit.disabled[0].card_id.as_str(), "l-2");
/// ```
pub fn evaluate_limit<C>(
    deck: &DeckState,
    catalog: &C,
    config: &RulesConfig,
    category: &LimitCategory,
) -> LimitResult
where
    C: CatalogProvider + ?Sized,
{
    let count = category_count(deck, catalog, category);
    let cap = category.cap(config);
    let reached = count >= cap;

    let (reason, disabled) = if reached {
        let disabled = category
            .member_types()
            .iter()
            .flat_map(|&t| catalog.cards_by_type(t))
            .filter(|record| category.includes(record))
            .filter(|record| !deck.contains(record.card_type, &record.id))
            .map(|record| DisabledRow {
                card_type: record.card_type,
                card_id: record.id.clone(),
            })
            .collect();
        (Some(category.reason(cap)), disabled)
    } else {
        (None, Vec::new())
    };

    LimitResult {
        category: category.clone(),
        count,
        cap,
        reached,
        reason,
        disabled,
    }
}

/// One-per-deck buckets present in the deck, in first-seen order, with
/// their copy counts.
pub fn opd_buckets<C>(deck: &DeckState, catalog: &C) -> Vec<(OpdKey, u32)>
where
    C: CatalogProvider + ?Sized,
{
    let mut buckets: Vec<(OpdKey, u32)> = Vec::new();
    let mut index: FxHashMap<OpdKey, usize> = FxHashMap::default();
    for entry in deck.entries() {
        let Some(key) = catalog
            .card_by_id(entry.card_type, &entry.card_id)
            .and_then(OpdKey::for_record)
        else {
            continue;
        };
        match index.get(&key) {
            Some(&i) => buckets[i].1 = buckets[i].1.saturating_add(entry.quantity),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push((key, entry.quantity));
            }
        }
    }
    buckets
}

/// Evaluate every fixed category and every one-per-deck bucket in the deck.
pub fn evaluate_all_limits<C>(
    deck: &DeckState,
    catalog: &C,
    config: &RulesConfig,
) -> Vec<LimitResult>
where
    C: CatalogProvider + ?Sized,
{
    LimitCategory::FIXED
        .into_iter()
        .chain(
            opd_buckets(deck, catalog)
                .into_iter()
                .map(|(key, _)| LimitCategory::OnePerDeck(key)),
        )
        .map(|category| evaluate_limit(deck, catalog, config, &category))
        .collect()
}
