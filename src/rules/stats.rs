//! Stat, threat and icon aggregation.
//!
//! `aggregate_stats` sums the printed stats and threat of active characters.
//! KO'd characters still hold their slot but contribute nothing here.
//! `roster_threat` is the legality view of threat: every character counts,
//! KO'd or not, plus location threat.

use serde::{Deserialize, Serialize};

use super::opd::normalize;
use super::usability::{active_characters, effective_stats};
use crate::cards::{CardRecord, CardType, CatalogProvider, CharacterStats, PowerType, Stat};
use crate::deck::DeckState;

/// Threat a character carries while designated as the reserve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReserveThreat {
    pub character: &'static str,
    pub threat: u32,
}

/// Characters whose threat changes when they are the reserve.
pub const RESERVE_THREAT_ADJUSTMENTS: &[ReserveThreat] = &[
    ReserveThreat {
        character: "Victory Harben",
        threat: 20,
    },
    ReserveThreat {
        character: "Carson of Venus",
        threat: 19,
    },
    ReserveThreat {
        character: "Morgan Le Fay",
        threat: 20,
    },
];

/// Summed stats and threat of the active characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatTotals {
    pub energy: u32,
    pub combat: u32,
    pub brute_force: u32,
    pub intelligence: u32,
    pub threat_total: u32,
}

impl StatTotals {
    /// True if every field is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    fn add(&mut self, stats: CharacterStats, threat: u32, copies: u32) {
        let scaled = |value: u32| value.saturating_mul(copies);
        self.energy = self.energy.saturating_add(scaled(stats.energy));
        self.combat = self.combat.saturating_add(scaled(stats.combat));
        self.brute_force = self.brute_force.saturating_add(scaled(stats.brute_force));
        self.intelligence = self.intelligence.saturating_add(scaled(stats.intelligence));
        self.threat_total = self.threat_total.saturating_add(scaled(threat));
    }
}

/// Stat icons printed across the deck, per stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconTotals {
    pub energy: u32,
    pub combat: u32,
    pub brute_force: u32,
    pub intelligence: u32,
}

impl IconTotals {
    #[must_use]
    pub const fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Energy => self.energy,
            Stat::Combat => self.combat,
            Stat::BruteForce => self.brute_force,
            Stat::Intelligence => self.intelligence,
        }
    }

    fn add(&mut self, stat: Stat, amount: u32) {
        let slot = match stat {
            Stat::Energy => &mut self.energy,
            Stat::Combat => &mut self.combat,
            Stat::BruteForce => &mut self.brute_force,
            Stat::Intelligence => &mut self.intelligence,
        };
        *slot = slot.saturating_add(amount);
    }
}

/// Threat of a character, taking the reserve table into account.
#[must_use]
pub fn character_threat(record: &CardRecord, is_reserve: bool) -> u32 {
    if is_reserve {
        let name = normalize(&record.name);
        if let Some(adjusted) = RESERVE_THREAT_ADJUSTMENTS
            .iter()
            .find(|r| normalize(r.character) == name)
        {
            return adjusted.threat;
        }
    }
    record.threat_level
}

/// Sum the stats and threat of every active character.
///
/// Entries missing from the catalog are skipped. An empty active set yields
/// all zeroes.
///
/// ## Example
///
/// ```
/// use overpower_deck::cards::{Catalog, CardRecord, CardType, CharacterStats};
/// use overpower_deck::deck::{DeckCardEntry, DeckState};
/// use overpower_deck::rules::aggregate_stats;
///
/// let catalog = Catalog::from_records([
///     CardRecord::character("c-1", "Tarzan", CharacterStats::new(3, 7, 6, 4), 18),
///     CardRecord::character("c-2", "Jane Porter", CharacterStats::new(3, 5, 2, 6), 16),
/// ])
/// .unwrap();
/// let deck = DeckState::from_entries([
///     DeckCardEntry::new(CardType::Character, "c-1"),
///     DeckCardEntry::new(CardType::Character, "c-2").knocked_out(),
/// ]);
///
/// let totals = aggregate_stats(&deck, &catalog);
/// assert_eq!(totals.combat, 7);
/// assert_eq!(totals.threat_total, 18);
/// ```
pub fn aggregate_stats<C>(deck: &DeckState, catalog: &C) -> StatTotals
where
    C: CatalogProvider + ?Sized,
{
    let mut totals = StatTotals::default();
    for entry in deck.entries().filter(|e| e.is_active_character()) {
        let Some(record) = catalog.card_by_id(CardType::Character, &entry.card_id) else {
            continue;
        };
        let is_reserve = deck.reserve_character_id.as_ref() == Some(&entry.card_id);
        let stats = record.stats.unwrap_or_default();
        totals.add(stats, character_threat(record, is_reserve), entry.quantity);
    }
    totals
}

/// Threat of the full roster plus locations, KO state ignored.
pub fn roster_threat<C>(deck: &DeckState, catalog: &C) -> u32
where
    C: CatalogProvider + ?Sized,
{
    deck.entries()
        .filter_map(|entry| {
            let record = catalog.card_by_id(entry.card_type, &entry.card_id)?;
            let per_copy = match entry.card_type {
                CardType::Character => {
                    let is_reserve = deck.reserve_character_id.as_ref() == Some(&entry.card_id);
                    character_threat(record, is_reserve)
                }
                CardType::Location => record.threat_level,
                _ => return None,
            };
            Some(per_copy.saturating_mul(entry.quantity))
        })
        .fold(0, u32::saturating_add)
}

/// Count stat icons on specials, aspects, teamwork, ally and power cards.
///
/// Power cards count their own stat; Multi-Power counts all four and
/// Any-Power none.
pub fn icon_totals<C>(deck: &DeckState, catalog: &C) -> IconTotals
where
    C: CatalogProvider + ?Sized,
{
    let mut totals = IconTotals::default();
    for entry in deck.entries() {
        let Some(record) = catalog.card_by_id(entry.card_type, &entry.card_id) else {
            continue;
        };
        match entry.card_type {
            CardType::Special | CardType::Aspect | CardType::Teamwork | CardType::AllyUniverse => {
                for &icon in &record.icons {
                    totals.add(icon, entry.quantity);
                }
            }
            CardType::Power => match record.power.map(|p| p.power_type) {
                Some(PowerType::MultiPower) => {
                    for stat in Stat::ALL {
                        totals.add(stat, entry.quantity);
                    }
                }
                Some(power_type) => {
                    if let Some(stat) = power_type.stat() {
                        totals.add(stat, entry.quantity);
                    }
                }
                None => {}
            },
            _ => {}
        }
    }
    totals
}

/// Highest effective stat among active characters, per stat.
pub fn team_max<C>(deck: &DeckState, catalog: &C) -> CharacterStats
where
    C: CatalogProvider + ?Sized,
{
    let mut best = CharacterStats::default();
    for character in active_characters(deck, catalog) {
        let stats = effective_stats(character.record);
        for stat in Stat::ALL {
            let slot = best.get_mut(stat);
            *slot = (*slot).max(stats.get(stat));
        }
    }
    best
}
