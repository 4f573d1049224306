//! Power-card usability.
//!
//! A power card (or a universe card's `to_use` requirement) is usable when
//! at least one character meets its value in the matching stat. Any-Power
//! and Multi-Power read a character's highest stat.
//!
//! ## Stat overrides
//!
//! A few characters are ruled to count a stat as 8 for playing cards,
//! whatever their printed value. `STAT_OVERRIDES` lists them; it is data,
//! and the printed card text is never parsed to extend it.

use smallvec::SmallVec;

use super::opd::normalize;
use crate::cards::{
    CardId, CardRecord, CardType, CatalogProvider, CharacterStats, Stat, StatRequirement,
};
use crate::deck::DeckState;

/// A rules-as-written stat override for one named character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatOverride {
    /// Character name, matched against every printing of the character.
    pub character: &'static str,
    pub stat: Stat,
    pub value: u32,
}

/// Characters whose stat counts as a fixed value for card usability.
pub const STAT_OVERRIDES: &[StatOverride] = &[
    StatOverride {
        character: "John Carter",
        stat: Stat::BruteForce,
        value: 8,
    },
    StatOverride {
        character: "Time Traveler",
        stat: Stat::Intelligence,
        value: 8,
    },
];

/// A character taking part in usability checks.
#[derive(Clone, Copy, Debug)]
pub struct ActiveCharacter<'a> {
    /// Index of the deck entry.
    pub index: usize,
    pub record: &'a CardRecord,
}

impl<'a> ActiveCharacter<'a> {
    #[must_use]
    pub fn id(&self) -> &'a CardId {
        &self.record.id
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.record.name
    }

    /// Stats as printed.
    #[must_use]
    pub fn printed_stats(&self) -> CharacterStats {
        self.record.stats.unwrap_or_default()
    }

    /// Stats after overrides.
    #[must_use]
    pub fn effective_stats(&self) -> CharacterStats {
        effective_stats(self.record)
    }
}

/// Characters of a deck; at most 4 in a legal deck.
pub type Roster<'a> = SmallVec<[ActiveCharacter<'a>; 4]>;

/// Stats of a character record after applying `STAT_OVERRIDES`.
#[must_use]
pub fn effective_stats(record: &CardRecord) -> CharacterStats {
    let mut stats = record.stats.unwrap_or_default();
    let name = normalize(&record.name);
    for rule in STAT_OVERRIDES {
        if name.contains(&normalize(rule.character)) {
            let slot = stats.get_mut(rule.stat);
            *slot = (*slot).max(rule.value);
        }
    }
    stats
}

/// True if any character meets the requirement.
#[must_use]
pub fn meets_requirement(requirement: StatRequirement, characters: &[ActiveCharacter<'_>]) -> bool {
    characters.iter().any(|c| {
        c.effective_stats().for_power_type(requirement.power_type) >= requirement.value
    })
}

/// True if any active character can play this power card.
///
/// Returns false for records without a printed power value.
#[must_use]
pub fn is_power_card_usable(card: &CardRecord, active: &[ActiveCharacter<'_>]) -> bool {
    match card.power {
        Some(requirement) => meets_requirement(requirement, active),
        None => false,
    }
}

/// True if the characters can play the card.
///
/// Cards without a stat requirement are always usable.
#[must_use]
pub fn is_card_usable(card: &CardRecord, characters: &[ActiveCharacter<'_>]) -> bool {
    card.usability_requirement()
        .map_or(true, |requirement| meets_requirement(requirement, characters))
}

/// Every character in the deck that resolves in the catalog, KO'd or not.
pub fn roster<'a, C>(deck: &DeckState, catalog: &'a C) -> Roster<'a>
where
    C: CatalogProvider + ?Sized,
{
    collect_characters(deck, catalog, |_| true)
}

/// Characters that are not KO'd.
pub fn active_characters<'a, C>(deck: &DeckState, catalog: &'a C) -> Roster<'a>
where
    C: CatalogProvider + ?Sized,
{
    collect_characters(deck, catalog, |ko| !ko)
}

fn collect_characters<'a, C>(
    deck: &DeckState,
    catalog: &'a C,
    keep: impl Fn(bool) -> bool,
) -> Roster<'a>
where
    C: CatalogProvider + ?Sized,
{
    deck.entries()
        .enumerate()
        .filter(|(_, e)| e.card_type == CardType::Character && keep(e.is_ko))
        .filter_map(|(index, e)| {
            catalog
                .card_by_id(CardType::Character, &e.card_id)
                .map(|record| ActiveCharacter { index, record })
        })
        .collect()
}
