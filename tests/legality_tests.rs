//! Legality report scenarios.

mod common;

use common::{catalog, four_characters, id};
use overpower_deck::cards::CardType;
use overpower_deck::core::RulesConfig;
use overpower_deck::deck::{DeckCardEntry, DeckState};
use overpower_deck::rules::{compute_legality, DeckRules, DeckStatus, LimitCategory, Rule};

// =============================================================================
// Character Count
// =============================================================================

/// Test an empty deck is incomplete but carries no violations.
#[test]
fn test_empty_deck_not_valid() {
    let catalog = catalog();
    let report = compute_legality(&DeckState::new(), &catalog, &RulesConfig::default());

    assert!(!report.is_valid);
    assert!(!report.is_complete);
    assert!(report.violations.is_empty());
    assert_eq!(report.character_count, 0);
    assert_eq!(report.status, DeckStatus::NotLegal);
}

/// Test adding characters one at a time until four are present.
#[test]
fn test_valid_once_four_characters_present() {
    let catalog = catalog();
    let rules = DeckRules::new(&catalog, RulesConfig::default().with_min_characters(4));

    let mut deck = DeckState::new();
    for (i, character) in ["c-tarzan", "c-jane", "c-carter", "c-dejah"].into_iter().enumerate() {
        assert!(!rules.validation_report(&deck).is_valid, "valid with {i} characters");
        deck = rules
            .add_card(&deck, CardType::Character, &id(character))
            .unwrap()
            .into_deck();
    }

    let report = rules.validation_report(&deck);
    assert!(report.is_valid, "{:?}", report.violations);
    assert_eq!(report.character_count, 4);
    assert_eq!(report.threat_total, 71);
}

/// Test the default range counts a single character as complete.
#[test]
fn test_single_character_complete_by_default() {
    let catalog = catalog();
    let deck = DeckState::from_entries([DeckCardEntry::new(CardType::Character, "c-jane")]);
    let report = compute_legality(&deck, &catalog, &RulesConfig::default());
    assert!(report.is_valid);
    assert!(report.is_complete);
}

/// Test a fifth character loaded from storage is reported.
#[test]
fn test_too_many_characters() {
    let catalog = catalog();
    let mut entries: Vec<_> = four_characters().entries().cloned().collect();
    entries.push(DeckCardEntry::new(CardType::Character, "c-korak"));
    let deck = DeckState::from_entries(entries);

    let report = compute_legality(&deck, &catalog, &RulesConfig::default());
    assert!(report.has_violation(Rule::CharacterCount));
    assert!(!report.is_complete);
}

// =============================================================================
// Locations and One-Per-Deck
// =============================================================================

/// Test a second location is refused and the limit reports reached.
#[test]
fn test_second_location_refused() {
    let catalog = catalog();
    let rules = DeckRules::new(&catalog, RulesConfig::default());
    let deck = DeckState::from_entries([DeckCardEntry::new(CardType::Location, "l-barsoom")]);

    let limit = rules.evaluate_limit(&deck, &LimitCategory::Location);
    assert!(limit.reached);
    assert_eq!(limit.count, 1);
    assert_eq!(limit.disabled.len(), 1);
    assert_eq!(limit.disabled[0].card_id, id("l-pellucidar"));

    let outcome = rules
        .add_card(&deck, CardType::Location, &id("l-pellucidar"))
        .unwrap();
    assert!(!outcome.is_added());
    assert_eq!(outcome.deck().count_by_type(CardType::Location), 1);
    assert!(outcome.reason().is_some());
}

/// Test two locations loaded from storage are a violation.
#[test]
fn test_location_count_violation() {
    let catalog = catalog();
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-jane"),
        DeckCardEntry::new(CardType::Location, "l-barsoom"),
        DeckCardEntry::new(CardType::Location, "l-pellucidar"),
    ]);
    let report = compute_legality(&deck, &catalog, &RulesConfig::default());
    assert!(report.has_violation(Rule::LocationCount));
    assert!(!report.is_valid);
}

/// Test two printings sharing key "K" cannot both be in the deck.
#[test]
fn test_opd_group_refuses_second_printing() {
    let catalog = catalog();
    let rules = DeckRules::new(&catalog, RulesConfig::default());
    let deck = rules
        .add_card(&DeckState::new(), CardType::Special, &id("s-grim"))
        .unwrap()
        .into_deck();

    let outcome = rules
        .add_card(&deck, CardType::Special, &id("s-grim-foil"))
        .unwrap();
    assert!(!outcome.is_added());
    assert!(outcome.reason().unwrap().contains('K'));
    assert!(!outcome.deck().contains(CardType::Special, &id("s-grim-foil")));

    let check = rules
        .is_card_disabled_for_add(&deck, CardType::Special, &id("s-grim-foil"))
        .unwrap();
    assert!(check.disabled);
    assert!(check.reason.unwrap().contains("\"K\""));
}

/// Test stored decks breaking one-per-deck are reported once per key.
#[test]
fn test_opd_violation_reported() {
    let catalog = catalog();
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-jane"),
        DeckCardEntry::new(CardType::Special, "s-grim"),
        DeckCardEntry::new(CardType::Special, "s-grim-foil"),
    ]);
    let report = compute_legality(&deck, &catalog, &RulesConfig::default());
    let opd: Vec<_> = report
        .violations
        .iter()
        .filter(|v| v.rule == Rule::OnePerDeck)
        .collect();
    assert_eq!(opd.len(), 1);
    assert!(opd[0].message.contains("\"K\""));
}

/// Test the single-copy special categories.
#[test]
fn test_special_category_limits() {
    let catalog = catalog();
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-jane"),
        DeckCardEntry::new(CardType::Special, "s-doom"),
        DeckCardEntry::new(CardType::Special, "s-ruin"),
        DeckCardEntry::new(CardType::Aspect, "a-wall"),
        DeckCardEntry::new(CardType::Aspect, "a-bastion"),
        DeckCardEntry::new(CardType::Special, "s-backup"),
    ]);
    let report = compute_legality(&deck, &catalog, &RulesConfig::default());
    assert!(report.has_violation(Rule::CataclysmLimit));
    assert!(report.has_violation(Rule::FortificationLimit));
    assert!(!report.has_violation(Rule::AssistLimit));
    assert!(!report.has_violation(Rule::AmbushLimit));
}

// =============================================================================
// Self-Healing References
// =============================================================================

/// Test removing the reserve character clears it on the next report.
#[test]
fn test_reserve_cleared_after_removal() {
    let catalog = catalog();
    let rules = DeckRules::new(&catalog, RulesConfig::default());
    let mut deck = four_characters();
    deck.set_reserve_character(Some(id("c-carter"))).unwrap();

    let before = rules.validation_report(&deck);
    assert_eq!(before.reserve_character_id, Some(id("c-carter")));
    assert!(before.notes.is_empty());

    let deck = rules
        .remove_card(&deck, CardType::Character, &id("c-carter"))
        .unwrap();
    let report = rules.validation_report(&deck);

    assert_eq!(report.reserve_character_id, None);
    assert!(report.has_note(Rule::ReserveCharacter));
    assert!(!report.has_violation(Rule::ReserveCharacter));
    assert!(report.is_valid);
}

/// Test the reserve threat table feeds the threat cap.
#[test]
fn test_reserve_threat_adjustment_counts() {
    let catalog = catalog();
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-victory"),
        DeckCardEntry::new(CardType::Character, "c-jane"),
        DeckCardEntry::new(CardType::Character, "c-carter"),
        DeckCardEntry::new(CardType::Character, "c-dejah"),
        DeckCardEntry::new(CardType::Location, "l-barsoom"),
    ]);
    let config = RulesConfig::default();

    // 18 + 16 + 19 + 18 + 3
    let plain = compute_legality(&deck, &catalog, &config);
    assert_eq!(plain.roster_threat, 74);
    assert!(!plain.has_violation(Rule::ThreatLevel));

    let reserve = deck.with_reserve_character("c-victory");
    let report = compute_legality(&reserve, &catalog, &config);
    assert_eq!(report.roster_threat, 76);
    assert!(!report.has_violation(Rule::ThreatLevel));

    let tight = config.with_max_total_threat(75);
    assert!(compute_legality(&reserve, &catalog, &tight).has_violation(Rule::ThreatLevel));
}

// =============================================================================
// Catalog Misses and Accumulation
// =============================================================================

/// Test an entry missing from the catalog blocks the deck but stays in it.
#[test]
fn test_catalog_miss_is_blocking() {
    let catalog = catalog();
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-jane"),
        DeckCardEntry::new(CardType::Power, "p-retired").with_quantity(2),
    ]);
    let report = compute_legality(&deck, &catalog, &RulesConfig::default());

    assert!(report.has_violation(Rule::CatalogMiss));
    assert!(!report.is_valid);
    assert!(deck.contains(CardType::Power, &id("p-retired")));
    // Excluded from stats
    assert_eq!(report.stats.threat_total, 16);
    assert!(report.usable_power_card_ids.is_empty());
}

/// Test one bad entry never hides the others.
#[test]
fn test_violations_accumulate() {
    let catalog = catalog();
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-jane"),
        DeckCardEntry::new(CardType::Special, "s-unknown"),
        DeckCardEntry::new(CardType::Location, "l-barsoom"),
        DeckCardEntry::new(CardType::Location, "l-pellucidar"),
        DeckCardEntry::new(CardType::Power, "p-bf9"),
        DeckCardEntry::new(CardType::Special, "s-jungle"),
    ]);
    let report = compute_legality(&deck, &catalog, &RulesConfig::default());

    for rule in [
        Rule::CatalogMiss,
        Rule::LocationCount,
        Rule::UnusablePower,
        Rule::UnusableSpecial,
    ] {
        assert!(report.has_violation(rule), "missing {rule}");
    }
}

/// Test the report is deterministic.
#[test]
fn test_report_is_idempotent() {
    let catalog = catalog();
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-tarzan").knocked_out(),
        DeckCardEntry::new(CardType::Character, "c-carter"),
        DeckCardEntry::new(CardType::Special, "s-grim"),
        DeckCardEntry::new(CardType::Special, "s-grim-foil"),
        DeckCardEntry::new(CardType::Power, "p-bf8").with_quantity(3),
        DeckCardEntry::new(CardType::Event, "e-storm"),
        DeckCardEntry::new(CardType::Mission, "m-apes"),
    ])
    .with_reserve_character("c-jane");
    let config = RulesConfig::tournament();

    let first = compute_legality(&deck, &catalog, &config);
    let second = compute_legality(&deck, &catalog, &config);
    assert_eq!(first, second);
}

// =============================================================================
// Derived Stats
// =============================================================================

/// Test icon totals, team maxima and usable power cards.
#[test]
fn test_derived_stats() {
    let catalog = catalog();
    let mut entries: Vec<_> = four_characters().entries().cloned().collect();
    entries.extend([
        DeckCardEntry::new(CardType::Special, "s-jungle").with_quantity(2),
        DeckCardEntry::new(CardType::Power, "p-bf8").with_quantity(2),
        DeckCardEntry::new(CardType::Power, "p-bf9"),
        DeckCardEntry::new(CardType::Power, "p-multi5"),
    ]);
    let deck = DeckState::from_entries(entries);
    let report = compute_legality(&deck, &catalog, &RulesConfig::default());

    assert_eq!(report.icon_totals.combat, 3);
    assert_eq!(report.icon_totals.brute_force, 6);
    assert_eq!(report.icon_totals.intelligence, 1);
    assert_eq!(report.icon_totals.energy, 1);
    // John Carter counts Brute Force as 8
    assert_eq!(report.team_max.brute_force, 8);
    assert_eq!(report.usable_power_card_ids, vec![id("p-bf8"), id("p-multi5")]);
    assert!(report.has_violation(Rule::UnusablePower));
}

/// Test the tournament preset requires a full draw pile.
#[test]
fn test_tournament_draw_pile() {
    let catalog = catalog();
    let config = RulesConfig::tournament();
    let mut entries: Vec<_> = four_characters().entries().cloned().collect();
    entries.extend([
        DeckCardEntry::new(CardType::Mission, "m-apes").with_quantity(4),
        DeckCardEntry::new(CardType::Mission, "m-return").with_quantity(3),
        DeckCardEntry::new(CardType::Power, "p-e5").with_quantity(51),
    ]);
    let deck = DeckState::from_entries(entries.clone());
    let report = compute_legality(&deck, &catalog, &config);
    assert!(report.is_valid, "{:?}", report.violations);

    entries.push(DeckCardEntry::new(CardType::Event, "e-stampede"));
    let with_event = DeckState::from_entries(entries);
    let report = compute_legality(&with_event, &catalog, &config);
    assert!(report.has_violation(Rule::DeckSize));
}

// =============================================================================
// Stored Quantities
// =============================================================================

/// Test huge stored quantities saturate instead of overflowing.
#[test]
fn test_huge_power_quantity() {
    let catalog = catalog();
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-jane"),
        DeckCardEntry::new(CardType::Power, "p-e5").with_quantity(u32::MAX),
        DeckCardEntry::new(CardType::Power, "p-c7").with_quantity(2),
    ]);

    assert_eq!(deck.draw_pile_count(), u32::MAX);
    assert_eq!(deck.total_cards(), u32::MAX);

    let report = compute_legality(&deck, &catalog, &RulesConfig::tournament());
    assert!(!report.has_violation(Rule::DeckSize));
    assert_eq!(report.icon_totals.energy, u32::MAX);
    assert_eq!(report.icon_totals.combat, 2);
}

/// Test a huge location quantity saturates roster threat and trips both caps.
#[test]
fn test_huge_location_quantity() {
    let catalog = catalog();
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-jane"),
        DeckCardEntry::new(CardType::Location, "l-barsoom").with_quantity(2_000_000_000),
    ]);

    let report = compute_legality(&deck, &catalog, &RulesConfig::default());
    assert_eq!(report.roster_threat, u32::MAX);
    assert!(report.has_violation(Rule::ThreatLevel));
    assert!(report.has_violation(Rule::LocationCount));
    assert_eq!(report.limit(&LimitCategory::Location).unwrap().count, 2_000_000_000);
}

/// Test a huge character quantity scales stats in one step.
#[test]
fn test_huge_character_quantity() {
    let catalog = catalog();
    let deck = DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-jane").with_quantity(3_000_000_000),
    ]);

    let report = compute_legality(&deck, &catalog, &RulesConfig::default());
    assert_eq!(report.character_count, 3_000_000_000);
    assert!(report.has_violation(Rule::CharacterCount));
    // Combat 5 and threat 16 per copy both saturate
    assert_eq!(report.stats.combat, u32::MAX);
    assert_eq!(report.threat_total, u32::MAX);
    assert_eq!(report.stats.energy, u32::MAX);
}
