//! Deck construction rules configuration.
//!
//! Every numeric constant the limit evaluators and the legality aggregator
//! consult lives in `RulesConfig`. Hosts build one at startup:
//! - `RulesConfig::default()`: the editing rule set
//! - `RulesConfig::tournament()`: adds the completeness rules a deck must
//!   satisfy before it can be registered for play
//!
//! The engine never hardcodes caps - it reads them from here.

use serde::{Deserialize, Serialize};

use super::error::DeckError;

/// Draw pile size requirement.
///
/// Decks containing at least one event need a larger draw pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawPileRule {
    /// Minimum draw pile size without events.
    pub min_cards: u32,
    /// Minimum draw pile size when the deck contains an event.
    pub min_cards_with_events: u32,
}

impl Default for DrawPileRule {
    fn default() -> Self {
        Self {
            min_cards: 51,
            min_cards_with_events: 56,
        }
    }
}

/// Complete deck rules configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Fewest characters for a deck to count as complete.
    pub min_characters: u32,

    /// Most characters a deck may hold (KO'd characters still count).
    pub max_characters: u32,

    /// Most location cards.
    pub max_locations: u32,

    /// Most mission cards, counted by quantity.
    pub max_missions: u32,

    /// Require exactly `max_missions` missions, all from one mission set.
    pub require_full_mission_set: bool,

    /// Copies allowed per one-per-deck key.
    pub one_per_deck_cap: u32,

    /// Copies allowed across all Cataclysm specials.
    pub max_cataclysm: u32,

    /// Copies allowed across all Assist specials.
    pub max_assist: u32,

    /// Copies allowed across all Ambush specials.
    pub max_ambush: u32,

    /// Copies allowed across all Fortification aspects.
    pub max_fortification: u32,

    /// Highest legal roster threat.
    pub max_total_threat: u32,

    /// Draw pile minimum. `None` disables the check.
    pub draw_pile: Option<DrawPileRule>,

    /// Cards in a sample hand.
    pub hand_size: usize,

    /// Cards in a sample hand once an event has been drawn.
    pub hand_size_with_events: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_characters: 1,
            max_characters: 4,
            max_locations: 1,
            max_missions: 7,
            require_full_mission_set: false,
            one_per_deck_cap: 1,
            max_cataclysm: 1,
            max_assist: 1,
            max_ambush: 1,
            max_fortification: 1,
            max_total_threat: 76,
            draw_pile: None,
            hand_size: 8,
            hand_size_with_events: 9,
        }
    }
}

impl RulesConfig {
    /// Create the editing rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule set for registering a deck for play.
    ///
    /// Exactly 4 characters, a full mission pile from a single set, and a
    /// draw pile of 51 cards (56 with events).
    #[must_use]
    pub fn tournament() -> Self {
        Self::default()
            .with_min_characters(4)
            .with_full_mission_set()
            .with_draw_pile(DrawPileRule::default())
    }

    /// Load a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the minimum character count.
    #[must_use]
    pub fn with_min_characters(mut self, min: u32) -> Self {
        self.min_characters = min;
        self
    }

    /// Set the maximum character count.
    #[must_use]
    pub fn with_max_characters(mut self, max: u32) -> Self {
        self.max_characters = max;
        self
    }

    /// Set the maximum total threat.
    #[must_use]
    pub fn with_max_total_threat(mut self, max: u32) -> Self {
        self.max_total_threat = max;
        self
    }

    /// Require the mission pile to be full and from one set.
    #[must_use]
    pub fn with_full_mission_set(mut self) -> Self {
        self.require_full_mission_set = true;
        self
    }

    /// Enforce a draw pile minimum.
    #[must_use]
    pub fn with_draw_pile(mut self, rule: DrawPileRule) -> Self {
        self.draw_pile = Some(rule);
        self
    }

    /// True if `count` characters make a complete roster.
    #[must_use]
    pub fn character_count_in_range(&self, count: u32) -> bool {
        (self.min_characters..=self.max_characters).contains(&count)
    }
}
