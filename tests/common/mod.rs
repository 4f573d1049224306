//! Shared fixture catalog for integration tests.
//!
//! Any four of Tarzan, Jane Porter, John Carter and Dejah Thoris stay under
//! the 76 threat cap (71 total).

#![allow(dead_code)]

use overpower_deck::cards::{
    CardId, CardRecord, CardType, Catalog, CharacterStats, PowerType, Stat, StatRequirement,
    ANY_CHARACTER, ANY_MISSION,
};
use overpower_deck::deck::{DeckCardEntry, DeckState};

pub fn id(s: &str) -> CardId {
    CardId::new(s)
}

pub fn catalog() -> Catalog {
    Catalog::from_records(records()).expect("fixture catalog has unique ids")
}

pub fn records() -> Vec<CardRecord> {
    vec![
        // Characters
        CardRecord::character("c-tarzan", "Tarzan", CharacterStats::new(3, 7, 6, 4), 18),
        CardRecord::character("c-jane", "Jane Porter", CharacterStats::new(3, 5, 2, 6), 16),
        CardRecord::character("c-carter", "John Carter", CharacterStats::new(6, 7, 4, 3), 19),
        CardRecord::character("c-dejah", "Dejah Thoris", CharacterStats::new(6, 3, 2, 6), 18),
        CardRecord::character("c-korak", "Korak", CharacterStats::new(4, 6, 4, 3), 17),
        CardRecord::character("c-traveler", "Time Traveler", CharacterStats::new(2, 3, 2, 5), 17),
        CardRecord::character("c-victory", "Victory Harben", CharacterStats::new(4, 5, 3, 6), 18),
        CardRecord::character("c-tarzan-alt", "Tarzan", CharacterStats::new(3, 7, 6, 4), 18),
        // Locations
        CardRecord::new("l-barsoom", CardType::Location, "Barsoom").with_threat(3),
        CardRecord::new("l-pellucidar", CardType::Location, "Pellucidar").with_threat(2),
        // Missions
        CardRecord::new("m-apes", CardType::Mission, "Tarzan of the Apes")
            .with_mission_set("Tarzan"),
        CardRecord::new("m-return", CardType::Mission, "Return of Tarzan")
            .with_mission_set("Tarzan"),
        CardRecord::new("m-princess", CardType::Mission, "A Princess of Mars")
            .with_mission_set("Barsoom"),
        // Specials
        CardRecord::new("s-grim", CardType::Special, "Grim Resolve")
            .for_character(ANY_CHARACTER)
            .with_opd_group("K")
            .with_icons(&[Stat::Combat]),
        CardRecord::new("s-grim-foil", CardType::Special, "Grim Resolve (Foil)")
            .for_character(ANY_CHARACTER)
            .with_opd_group("K")
            .with_icons(&[Stat::Combat]),
        CardRecord::new("s-jungle", CardType::Special, "Lord of the Jungle")
            .for_character("Tarzan")
            .with_icons(&[Stat::BruteForce, Stat::Combat]),
        CardRecord::new("s-doom", CardType::Special, "Doom").cataclysm(),
        CardRecord::new("s-ruin", CardType::Special, "Ruin").cataclysm(),
        CardRecord::new("s-backup", CardType::Special, "Backup").assist(),
        CardRecord::new("s-trap", CardType::Special, "Trap").ambush(),
        // Aspects
        CardRecord::new("a-wall", CardType::Aspect, "Stone Wall").fortification(),
        CardRecord::new("a-bastion", CardType::Aspect, "Bastion").fortification(),
        // Events
        CardRecord::new("e-stampede", CardType::Event, "Jungle Stampede")
            .with_mission_set("Tarzan"),
        CardRecord::new("e-storm", CardType::Event, "Dust Storm").with_mission_set("Barsoom"),
        CardRecord::new("e-fate", CardType::Event, "Twist of Fate").with_mission_set(ANY_MISSION),
        // Universe
        CardRecord::new("u-rifle", CardType::BasicUniverse, "Radium Rifle")
            .with_to_use(StatRequirement::new(5, PowerType::Energy)),
        CardRecord::new("tw-tag", CardType::Teamwork, "Tag Team")
            .with_to_use(StatRequirement::new(4, PowerType::Combat)),
        CardRecord::new("t-jungle", CardType::Training, "Jungle Training")
            .with_to_use(StatRequirement::new(3, PowerType::AnyPower)),
        // Power
        CardRecord::power("p-e5", 5, PowerType::Energy),
        CardRecord::power("p-c7", 7, PowerType::Combat),
        CardRecord::power("p-bf8", 8, PowerType::BruteForce),
        CardRecord::power("p-bf9", 9, PowerType::BruteForce),
        CardRecord::power("p-i8", 8, PowerType::Intelligence),
        CardRecord::power("p-any6", 6, PowerType::AnyPower),
        CardRecord::power("p-multi5", 5, PowerType::MultiPower),
    ]
}

/// Tarzan, Jane Porter, John Carter, Dejah Thoris.
pub fn four_characters() -> DeckState {
    DeckState::from_entries([
        DeckCardEntry::new(CardType::Character, "c-tarzan"),
        DeckCardEntry::new(CardType::Character, "c-jane"),
        DeckCardEntry::new(CardType::Character, "c-carter"),
        DeckCardEntry::new(CardType::Character, "c-dejah"),
    ])
}

/// Every `(type, id)` in the fixture catalog, in catalog order.
pub fn all_cards() -> Vec<(CardType, CardId)> {
    catalog()
        .iter()
        .map(|r| (r.card_type, r.id.clone()))
        .collect()
}
