//! Power-card usability and KO tests.

mod common;

use common::{catalog, four_characters, id};
use overpower_deck::cards::{CardType, CatalogProvider};
use overpower_deck::core::RulesConfig;
use overpower_deck::deck::{toggle_ko, DeckCardEntry, DeckState};
use overpower_deck::rules::{
    active_characters, aggregate_stats, compute_legality, is_power_card_usable, DeckRules, Rule,
    STAT_OVERRIDES,
};

fn usable(deck: &DeckState, power_id: &str) -> bool {
    let catalog = catalog();
    let card = catalog.card_by_id(CardType::Power, &id(power_id)).unwrap();
    let active = active_characters(deck, &catalog);
    is_power_card_usable(card, &active)
}

fn solo(character_id: &str) -> DeckState {
    DeckState::from_entries([DeckCardEntry::new(CardType::Character, character_id)])
}

// =============================================================================
// Stat Overrides
// =============================================================================

/// Test the override table holds exactly the two ruled characters.
#[test]
fn test_override_table_contents() {
    let names: Vec<_> = STAT_OVERRIDES.iter().map(|o| o.character).collect();
    assert_eq!(names, ["John Carter", "Time Traveler"]);
    assert!(STAT_OVERRIDES.iter().all(|o| o.value == 8));
}

/// Test a Brute Force 4 character off the table cannot use Brute Force 8.
#[test]
fn test_plain_brute_force_four() {
    assert!(!usable(&solo("c-korak"), "p-bf8"));
}

/// Test John Carter uses exactly Brute Force 8, not 9.
#[test]
fn test_john_carter_brute_force() {
    let deck = solo("c-carter");
    assert!(usable(&deck, "p-bf8"));
    assert!(!usable(&deck, "p-bf9"));
    // Intelligence is not overridden for him
    assert!(!usable(&deck, "p-i8"));
}

/// Test Time Traveler uses Intelligence 8 but not Brute Force 8.
#[test]
fn test_time_traveler_intelligence() {
    let deck = solo("c-traveler");
    assert!(usable(&deck, "p-i8"));
    assert!(!usable(&deck, "p-bf8"));
}

/// Test Any-Power reads the highest effective stat.
#[test]
fn test_any_power() {
    assert!(usable(&solo("c-tarzan"), "p-any6"));
    assert!(!usable(&solo("c-traveler"), "p-any6"));
}

// =============================================================================
// KO Tracking
// =============================================================================

/// Test KO'd characters drop out of usability.
#[test]
fn test_ko_removes_usability() {
    let deck = four_characters();
    assert!(usable(&deck, "p-bf8"));

    // John Carter is entry 2
    let ko = toggle_ko(&deck, 2).unwrap();
    assert!(!usable(&ko, "p-bf8"));

    let back = toggle_ko(&ko, 2).unwrap();
    assert!(usable(&back, "p-bf8"));
}

/// Test KO keeps the character slot but zeroes its stats.
#[test]
fn test_ko_keeps_slot() {
    let catalog = catalog();
    let rules = DeckRules::new(&catalog, RulesConfig::default());
    let deck = four_characters();
    let ko = rules.toggle_ko(&deck, 0).unwrap();

    assert_eq!(ko.character_count(), 4);
    assert_eq!(rules.aggregate_stats(&deck).threat_total, 71);
    assert_eq!(rules.aggregate_stats(&ko).threat_total, 53);
    assert_eq!(rules.aggregate_stats(&ko).combat, 15);

    // Slot still taken
    let outcome = rules
        .add_card(&ko, CardType::Character, &id("c-korak"))
        .unwrap();
    assert!(!outcome.is_added());
}

/// Test KO'ing everyone zeroes every stat.
#[test]
fn test_all_ko_is_zero() {
    let catalog = catalog();
    let mut deck = four_characters();
    for index in 0..4 {
        deck = toggle_ko(&deck, index).unwrap();
    }
    let totals = aggregate_stats(&deck, &catalog);
    assert!(totals.is_zero());
}

/// Test legality checks ignore KO while the usable list follows it.
#[test]
fn test_legality_ignores_ko() {
    let catalog = catalog();
    let mut entries: Vec<_> = four_characters().entries().cloned().collect();
    entries.push(DeckCardEntry::new(CardType::Power, "p-bf8"));
    let deck = toggle_ko(&DeckState::from_entries(entries), 2).unwrap();

    let report = compute_legality(&deck, &catalog, &RulesConfig::default());
    assert!(!report.has_violation(Rule::UnusablePower));
    assert!(report.usable_power_card_ids.is_empty());
    assert_eq!(report.roster_threat, 71);
}

/// Test KO dimming follows the active team.
#[test]
fn test_ko_dimming() {
    let catalog = catalog();
    let rules = DeckRules::new(&catalog, RulesConfig::default());
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-tarzan"),
        DeckCardEntry::new(CardType::Character, "c-jane"),
        DeckCardEntry::new(CardType::Special, "s-jungle"),
        DeckCardEntry::new(CardType::Teamwork, "tw-tag"),
        DeckCardEntry::new(CardType::Power, "p-c7"),
        DeckCardEntry::new(CardType::Power, "p-e5"),
    ]);
    assert!(rules.ko_dimmed_entries(&deck).is_empty());

    let ko = rules.toggle_ko(&deck, 0).unwrap();
    // Jane has Energy 3 and Combat 5
    assert_eq!(rules.ko_dimmed_entries(&ko), vec![0, 2, 3, 4, 5]);
}

/// Test the roster exposes printed and overridden stats side by side.
#[test]
fn test_active_character_views() {
    let catalog = catalog();
    let rules = DeckRules::new(&catalog, RulesConfig::default().with_max_total_threat(80));
    assert_eq!(rules.config().max_total_threat, 80);

    let deck = toggle_ko(&four_characters(), 0).unwrap();
    let active = active_characters(&deck, rules.catalog());
    let ids: Vec<_> = active.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, ["c-jane", "c-carter", "c-dejah"]);

    let carter = active.iter().find(|c| c.name() == "John Carter").unwrap();
    assert_eq!(carter.index, 2);
    assert_eq!(carter.printed_stats().brute_force, 4);
    assert_eq!(carter.effective_stats().brute_force, 8);
}
