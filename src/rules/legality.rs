//! Legality aggregation.
//!
//! `compute_legality` runs every limit evaluator, the stat aggregator and the
//! global deck rules, and folds the results into one `ValidationReport`.
//! Problems accumulate: a bad entry never hides problems elsewhere.
//!
//! Two kinds of findings are reported:
//! - **violations** block the deck from being valid
//! - **notes** are non-blocking; dangling reserve and display mission
//!   references land here and are cleared in the report

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::limits::{evaluate_all_limits, LimitCategory, LimitResult};
use super::opd::{character_identity, normalize};
use super::stats::{aggregate_stats, icon_totals, roster_threat, team_max, IconTotals, StatTotals};
use super::usability::{
    active_characters, is_card_usable, is_power_card_usable, roster, ActiveCharacter,
};
use crate::cards::{CardId, CardType, CatalogProvider, CharacterStats, ANY_MISSION};
use crate::core::RulesConfig;
use crate::deck::DeckState;

const ANGRY_MOB: &str = "angry mob";

/// Identifier of a deck rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    CharacterCount,
    DuplicateCharacter,
    AngryMobLimit,
    LocationCount,
    MissionCount,
    MissionSet,
    OnePerDeck,
    CataclysmLimit,
    AssistLimit,
    AmbushLimit,
    FortificationLimit,
    ThreatLevel,
    DeckSize,
    UnusablePower,
    UnusableUniverse,
    UnusableSpecial,
    UnusableEvent,
    CatalogMiss,
    ReserveCharacter,
    DisplayMission,
}

impl Rule {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Rule::CharacterCount => "character_count",
            Rule::DuplicateCharacter => "duplicate_character",
            Rule::AngryMobLimit => "angry_mob_limit",
            Rule::LocationCount => "location_count",
            Rule::MissionCount => "mission_count",
            Rule::MissionSet => "mission_set",
            Rule::OnePerDeck => "one_per_deck",
            Rule::CataclysmLimit => "cataclysm_limit",
            Rule::AssistLimit => "assist_limit",
            Rule::AmbushLimit => "ambush_limit",
            Rule::FortificationLimit => "fortification_limit",
            Rule::ThreatLevel => "threat_level",
            Rule::DeckSize => "deck_size",
            Rule::UnusablePower => "unusable_power",
            Rule::UnusableUniverse => "unusable_universe",
            Rule::UnusableSpecial => "unusable_special",
            Rule::UnusableEvent => "unusable_event",
            Rule::CatalogMiss => "catalog_miss",
            Rule::ReserveCharacter => "reserve_character",
            Rule::DisplayMission => "display_mission",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule broken by the deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    pub rule: Rule,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

/// Registration status shown next to the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckStatus {
    Legal,
    NotLegal,
    /// Built for a limited format; legality is still computed.
    Limited,
}

/// Everything the editor needs to render a deck's legality.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// No violations and a complete roster.
    pub is_valid: bool,
    /// Character count within the configured range.
    pub is_complete: bool,
    pub status: DeckStatus,
    /// Blocking findings.
    pub violations: Vec<Violation>,
    /// Non-blocking findings.
    pub notes: Vec<Violation>,
    /// Characters in the deck, KO'd included.
    pub character_count: u32,
    /// Active character sums.
    pub stats: StatTotals,
    /// Active character threat.
    pub threat_total: u32,
    /// Threat of the whole roster plus locations, as checked against the cap.
    pub roster_threat: u32,
    pub icon_totals: IconTotals,
    /// Highest effective stat per stat among active characters.
    pub team_max: CharacterStats,
    /// Power cards in the deck the active characters can play, in deck order.
    pub usable_power_card_ids: Vec<CardId>,
    pub limits: Vec<LimitResult>,
    /// Reserve after clearing a dangling reference.
    pub reserve_character_id: Option<CardId>,
    /// Display mission after clearing a dangling reference.
    pub display_mission_card_id: Option<CardId>,
}

impl ValidationReport {
    /// True if a violation of `rule` was reported.
    #[must_use]
    pub fn has_violation(&self, rule: Rule) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }

    /// True if a note for `rule` was reported.
    #[must_use]
    pub fn has_note(&self, rule: Rule) -> bool {
        self.notes.iter().any(|n| n.rule == rule)
    }

    /// Limit result for a category, if evaluated.
    #[must_use]
    pub fn limit(&self, category: &LimitCategory) -> Option<&LimitResult> {
        self.limits.iter().find(|l| &l.category == category)
    }

    /// Copy the self-healed references onto a deck.
    pub fn apply_healing(&self, deck: &mut DeckState) {
        deck.reserve_character_id = self.reserve_character_id.clone();
        deck.display_mission_card_id = self.display_mission_card_id.clone();
    }
}

/// Compute the legality report for a deck.
///
/// Pure and deterministic: the same deck, catalog and config always yield
/// an equal report.
///
/// ## Example
///
/// ```
/// use overpower_deck::cards::{Catalog, CardRecord, CharacterStats};
/// use overpower_deck::core::RulesConfig;
/// use overpower_deck::deck::DeckState;
/// use overpower_deck::rules::compute_legality;
///
/// let catalog = Catalog::from_records([
///     CardRecord::character("c-1", "Tarzan", CharacterStats::new(3, 7, 6, 4), 18),
/// ])
/// .unwrap();
///
/// let report = compute_legality(&DeckState::new(), &catalog, &RulesConfig::default());
/// assert!(!report.is_valid);
/// assert!(report.violations.is_empty());
/// assert!(!report.is_complete);
/// ```
pub fn compute_legality<C>(deck: &DeckState, catalog: &C, config: &RulesConfig) -> ValidationReport
where
    C: CatalogProvider + ?Sized,
{
    let mut violations = Vec::new();
    let mut notes = Vec::new();

    check_catalog_misses(deck, catalog, &mut violations);

    let full_roster = roster(deck, catalog);
    let character_count = deck.character_count();
    check_roster(character_count, &full_roster, config, &mut violations);

    let limits = evaluate_all_limits(deck, catalog, config);
    check_limits(&limits, config, &mut violations);
    check_missions(deck, catalog, config, &mut violations);

    let threat = roster_threat(deck, catalog);
    if threat > config.max_total_threat {
        violations.push(Violation::new(
            Rule::ThreatLevel,
            format!(
                "Deck threat level must be {} or less (found {threat})",
                config.max_total_threat
            ),
        ));
    }

    if let Some(rule) = config.draw_pile {
        let required = if deck.count_by_type(CardType::Event) > 0 {
            rule.min_cards_with_events
        } else {
            rule.min_cards
        };
        let pile = deck.draw_pile_count();
        if pile < required {
            violations.push(Violation::new(
                Rule::DeckSize,
                format!("Draw pile must have at least {required} cards (found {pile})"),
            ));
        }
    }

    check_usability(deck, catalog, &full_roster, &mut violations);

    let reserve_character_id = heal_reference(
        deck.reserve_character_id.as_ref(),
        deck,
        CardType::Character,
        Rule::ReserveCharacter,
        "Reserve character is no longer in the deck; choose a new reserve",
        &mut notes,
    );
    let display_mission_card_id = heal_reference(
        deck.display_mission_card_id.as_ref(),
        deck,
        CardType::Mission,
        Rule::DisplayMission,
        "Display mission is no longer in the deck; choose a new one",
        &mut notes,
    );

    let active = active_characters(deck, catalog);
    let usable_power_card_ids = deck
        .entries()
        .filter(|e| e.card_type == CardType::Power)
        .filter(|e| {
            catalog
                .card_by_id(CardType::Power, &e.card_id)
                .map_or(false, |record| is_power_card_usable(record, &active))
        })
        .map(|e| e.card_id.clone())
        .collect();

    let stats = aggregate_stats(deck, catalog);
    let is_complete = config.character_count_in_range(character_count);
    let is_valid = violations.is_empty() && is_complete;
    let status = if deck.is_limited {
        DeckStatus::Limited
    } else if is_valid {
        DeckStatus::Legal
    } else {
        DeckStatus::NotLegal
    };

    debug!(
        violations = violations.len(),
        notes = notes.len(),
        is_valid,
        "computed deck legality"
    );

    ValidationReport {
        is_valid,
        is_complete,
        status,
        violations,
        notes,
        character_count,
        stats,
        threat_total: stats.threat_total,
        roster_threat: threat,
        icon_totals: icon_totals(deck, catalog),
        team_max: team_max(deck, catalog),
        usable_power_card_ids,
        limits,
        reserve_character_id,
        display_mission_card_id,
    }
}

fn check_catalog_misses<C>(deck: &DeckState, catalog: &C, violations: &mut Vec<Violation>)
where
    C: CatalogProvider + ?Sized,
{
    for entry in deck.entries() {
        if catalog.card_by_id(entry.card_type, &entry.card_id).is_none() {
            warn!(
                card_type = %entry.card_type,
                card_id = %entry.card_id,
                "deck entry not in catalog"
            );
            violations.push(Violation::new(
                Rule::CatalogMiss,
                format!(
                    "{} card \"{}\" is no longer in the catalog; remove or replace it",
                    entry.card_type, entry.card_id
                ),
            ));
        }
    }
}

fn check_roster(
    character_count: u32,
    full_roster: &[ActiveCharacter<'_>],
    config: &RulesConfig,
    violations: &mut Vec<Violation>,
) {
    if character_count > config.max_characters {
        violations.push(Violation::new(
            Rule::CharacterCount,
            format!(
                "Deck may have at most {} characters (found {character_count})",
                config.max_characters
            ),
        ));
    } else if character_count > 0 && character_count < config.min_characters {
        violations.push(Violation::new(
            Rule::CharacterCount,
            format!(
                "Deck must have at least {} characters (found {character_count})",
                config.min_characters
            ),
        ));
    }

    let mut seen: Vec<String> = Vec::new();
    let mut reported: Vec<String> = Vec::new();
    for character in full_roster {
        let identity = character_identity(character.record);
        if seen.contains(&identity) && !reported.contains(&identity) {
            violations.push(Violation::new(
                Rule::DuplicateCharacter,
                format!("\"{}\" is in the deck more than once", character.name()),
            ));
            reported.push(identity.clone());
        }
        seen.push(identity);
    }

    let mobs = full_roster.iter().filter(|c| is_angry_mob(c.name())).count();
    if mobs > 1 {
        violations.push(Violation::new(
            Rule::AngryMobLimit,
            "Only one \"Angry Mob\" character is allowed per deck",
        ));
    }
}

fn check_limits(limits: &[LimitResult], config: &RulesConfig, violations: &mut Vec<Violation>) {
    for limit in limits.iter().filter(|l| l.exceeded()) {
        let (rule, message) = match &limit.category {
            // Reported by check_roster and check_missions
            LimitCategory::Character | LimitCategory::Mission => continue,
            LimitCategory::Location => (
                Rule::LocationCount,
                format!("Deck may have at most {} location (found {})", limit.cap, limit.count),
            ),
            LimitCategory::OnePerDeck(key) => (
                Rule::OnePerDeck,
                format!(
                    "\"{}\" is limited to {} per deck (found {})",
                    key.label(),
                    config.one_per_deck_cap,
                    limit.count
                ),
            ),
            category => {
                let rule = match category {
                    LimitCategory::Cataclysm => Rule::CataclysmLimit,
                    LimitCategory::Assist => Rule::AssistLimit,
                    LimitCategory::Ambush => Rule::AmbushLimit,
                    _ => Rule::FortificationLimit,
                };
                (
                    rule,
                    format!(
                        "Deck may have at most {} {category} card (found {})",
                        limit.cap, limit.count
                    ),
                )
            }
        };
        violations.push(Violation::new(rule, message));
    }
}

fn check_missions<C>(
    deck: &DeckState,
    catalog: &C,
    config: &RulesConfig,
    violations: &mut Vec<Violation>,
)
where
    C: CatalogProvider + ?Sized,
{
    let count = deck.count_by_type(CardType::Mission);
    if config.require_full_mission_set {
        if count != config.max_missions {
            violations.push(Violation::new(
                Rule::MissionCount,
                format!(
                    "Deck must have exactly {} mission cards (found {count})",
                    config.max_missions
                ),
            ));
            return;
        }
        let sets = mission_sets(deck, catalog);
        if sets.len() > 1 {
            violations.push(Violation::new(
                Rule::MissionSet,
                format!(
                    "All mission cards must be from the same mission set (found: {})",
                    sets.join(", ")
                ),
            ));
        }
    } else if count > config.max_missions {
        violations.push(Violation::new(
            Rule::MissionCount,
            format!(
                "Deck may have at most {} mission cards (found {count})",
                config.max_missions
            ),
        ));
    }
}

fn check_usability<C>(
    deck: &DeckState,
    catalog: &C,
    full_roster: &[ActiveCharacter<'_>],
    violations: &mut Vec<Violation>,
) where
    C: CatalogProvider + ?Sized,
{
    let sets = mission_sets(deck, catalog);
    let roster_names: Vec<String> = full_roster.iter().map(|c| normalize(c.name())).collect();
    let mobs: Vec<&String> = roster_names.iter().filter(|n| n.starts_with(ANGRY_MOB)).collect();

    for entry in deck.entries() {
        let Some(record) = catalog.card_by_id(entry.card_type, &entry.card_id) else {
            continue;
        };
        match entry.card_type {
            CardType::Power => {
                if let Some(power) = record.power {
                    if !is_power_card_usable(record, full_roster) {
                        violations.push(Violation::new(
                            Rule::UnusablePower,
                            format!(
                                "\"{}\" (Power Card) requires a character with {power}",
                                record.name
                            ),
                        ));
                    }
                }
            }
            t if t.is_universe() => {
                if let Some(requirement) = record.to_use {
                    if !is_card_usable(record, full_roster) {
                        violations.push(Violation::new(
                            Rule::UnusableUniverse,
                            format!(
                                "\"{}\" (Universe Card) requires a character with {requirement}",
                                record.name
                            ),
                        ));
                    }
                }
            }
            CardType::Special => {
                let Some(required) = record.required_character() else {
                    continue;
                };
                let wanted = normalize(required);
                let message = if wanted.starts_with(ANGRY_MOB) {
                    let subtype = wanted.split_once(':').map(|(_, s)| s.trim().to_string());
                    match subtype {
                        _ if mobs.is_empty() => Some(format!(
                            "\"{}\" requires an \"Angry Mob\" character in your team",
                            record.name
                        )),
                        Some(subtype) if !mobs.iter().any(|m| m.contains(&subtype)) => {
                            let shown = required.split_once(':').map_or("", |(_, s)| s.trim());
                            Some(format!(
                                "\"{}\" requires an \"Angry Mob: {shown}\" character in your team",
                                record.name
                            ))
                        }
                        _ => None,
                    }
                } else if !roster_names.contains(&wanted) {
                    Some(format!(
                        "\"{}\" requires character \"{required}\" in your team",
                        record.name
                    ))
                } else {
                    None
                };
                if let Some(message) = message {
                    violations.push(Violation::new(Rule::UnusableSpecial, message));
                }
            }
            CardType::Event => {
                let Some(set) = record.mission_set.as_deref() else {
                    continue;
                };
                if set == ANY_MISSION || sets.is_empty() {
                    continue;
                }
                if !sets.iter().any(|s| normalize(s) == normalize(set)) {
                    violations.push(Violation::new(
                        Rule::UnusableEvent,
                        format!(
                            "\"{}\" requires mission set \"{set}\" in your deck",
                            record.name
                        ),
                    ));
                }
            }
            _ => {}
        }
    }
}

/// Distinct mission sets of the deck's missions, in deck order.
fn mission_sets<C>(deck: &DeckState, catalog: &C) -> Vec<String>
where
    C: CatalogProvider + ?Sized,
{
    let mut sets: Vec<String> = Vec::new();
    for entry in deck.entries().filter(|e| e.card_type == CardType::Mission) {
        let set = catalog
            .card_by_id(CardType::Mission, &entry.card_id)
            .and_then(|r| r.mission_set.as_deref());
        if let Some(set) = set {
            if !sets.iter().any(|s| normalize(s) == normalize(set)) {
                sets.push(set.to_string());
            }
        }
    }
    sets
}

fn heal_reference(
    reference: Option<&CardId>,
    deck: &DeckState,
    card_type: CardType,
    rule: Rule,
    message: &str,
    notes: &mut Vec<Violation>,
) -> Option<CardId> {
    let id = reference?;
    if deck.contains(card_type, id) {
        return Some(id.clone());
    }
    debug!(%rule, card_id = %id, "clearing dangling deck reference");
    notes.push(Violation::new(rule, message));
    None
}

/// True for every "Angry Mob" printing.
#[must_use]
pub fn is_angry_mob(name: &str) -> bool {
    normalize(name).starts_with(ANGRY_MOB)
}
