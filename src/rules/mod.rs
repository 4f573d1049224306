//! Deck construction rules.
//!
//! Everything here is a pure function of a deck, a catalog and a
//! `RulesConfig`:
//! - `limits`: per-category count-vs-cap evaluators
//! - `stats`: active character sums, threat, icons
//! - `usability`: which power and universe cards a roster can play
//! - `legality`: the aggregate `ValidationReport`
//! - `opd`: one-per-deck keys shared by variant printings
//!
//! `DeckRules` binds a catalog and config for hosts that edit many decks.

pub mod engine;
pub mod legality;
pub mod limits;
pub mod opd;
pub mod stats;
pub mod usability;

pub use engine::DeckRules;
pub use legality::{compute_legality, is_angry_mob, DeckStatus, Rule, ValidationReport, Violation};
pub use limits::{
    applicable_limits, category_count, evaluate_all_limits, evaluate_limit, opd_buckets,
    DisabledRow, LimitCategory, LimitResult,
};
pub use opd::OpdKey;
pub use stats::{
    aggregate_stats, character_threat, icon_totals, roster_threat, team_max, IconTotals,
    ReserveThreat, StatTotals, RESERVE_THREAT_ADJUSTMENTS,
};
pub use usability::{
    active_characters, effective_stats, is_card_usable, is_power_card_usable, meets_requirement,
    roster, ActiveCharacter, Roster, StatOverride, STAT_OVERRIDES,
};
