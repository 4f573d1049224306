//! One-per-deck keys.
//!
//! Variant printings of a named card (alternate art, reprints) carry
//! different ids but count as the same card for one-per-deck purposes. They
//! are grouped by an `OpdKey`: the card's explicit `opd_group` when the
//! catalog provides one, else its normalized display name qualified by type,
//! owning character and universe.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::cards::{CardRecord, CardType};

/// Normalized named-entity key for a one-per-deck bucket.
///
/// Equality and hashing use only the normalized form; `label` keeps the
/// catalog spelling for messages.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpdKey {
    key: String,
    label: String,
}

impl OpdKey {
    /// Key for a record, or `None` if it is not one-per-deck.
    #[must_use]
    pub fn for_record(record: &CardRecord) -> Option<Self> {
        if !record.is_one_per_deck() {
            return None;
        }

        if let Some(group) = record.opd_group.as_deref().filter(|g| !g.trim().is_empty()) {
            return Some(Self {
                key: normalize(group),
                label: group.trim().to_string(),
            });
        }

        let mut key = format!("{}:{}", record.card_type, normalize(&record.name));
        let mut label = record.name.trim().to_string();
        if record.card_type == CardType::Special {
            if let Some(character) = &record.character_name {
                key.push(':');
                key.push_str(&normalize(character));
                label = format!("{label} ({})", character.trim());
            }
        }
        if let Some(universe) = &record.universe {
            key.push(':');
            key.push_str(&normalize(universe));
        }
        Some(Self { key, label })
    }

    /// Normalized form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Catalog spelling, for messages.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for OpdKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for OpdKey {}

impl Hash for OpdKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for OpdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Identity of a character across printings.
#[must_use]
pub fn character_identity(record: &CardRecord) -> String {
    normalize(&record.name)
}

/// Trimmed, lowercased, single-spaced.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  The  Sword of\tMars "), "the sword of mars");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_not_one_per_deck() {
        let card = CardRecord::new("s1", CardType::Special, "Charge");
        assert!(OpdKey::for_record(&card).is_none());
    }

    #[test]
    fn test_explicit_group_wins() {
        let a = CardRecord::new("s1", CardType::Special, "Charge").with_opd_group("K");
        let b = CardRecord::new("s2", CardType::Special, "Charge (alt art)").with_opd_group(" k ");

        let ka = OpdKey::for_record(&a).unwrap();
        let kb = OpdKey::for_record(&b).unwrap();
        assert_eq!(ka, kb);
        assert_eq!(ka.label(), "K");
        assert_eq!(ka.to_string(), "K");
    }

    #[test]
    fn test_name_fallback_groups_printings() {
        let a = CardRecord::new("a1", CardType::Aspect, "Amaru").one_per_deck();
        let b = CardRecord::new("a2", CardType::Aspect, "amaru ").one_per_deck();
        assert_eq!(OpdKey::for_record(&a), OpdKey::for_record(&b));
    }

    #[test]
    fn test_name_fallback_scoped_by_type_and_character() {
        let aspect = CardRecord::new("a1", CardType::Aspect, "Fury").one_per_deck();
        let event = CardRecord::new("e1", CardType::Event, "Fury").one_per_deck();
        assert_ne!(OpdKey::for_record(&aspect), OpdKey::for_record(&event));

        let tarzan = CardRecord::new("s1", CardType::Special, "Fury")
            .for_character("Tarzan")
            .one_per_deck();
        let jane = CardRecord::new("s2", CardType::Special, "Fury")
            .for_character("Jane Porter")
            .one_per_deck();
        let tarzan_key = OpdKey::for_record(&tarzan).unwrap();
        assert_ne!(Some(tarzan_key.clone()), OpdKey::for_record(&jane));
        assert_eq!(tarzan_key.label(), "Fury (Tarzan)");
    }

    #[test]
    fn test_universe_separates_buckets() {
        let erb = CardRecord::new("a1", CardType::Aspect, "Gate")
            .with_universe("ERB")
            .one_per_deck();
        let other = CardRecord::new("a2", CardType::Aspect, "Gate")
            .with_universe("Marvel")
            .one_per_deck();
        assert_ne!(OpdKey::for_record(&erb), OpdKey::for_record(&other));
    }
}
