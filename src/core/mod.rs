//! Core engine types: rules configuration, errors, RNG.
//!
//! Everything here is independent of card data. Rule modules read their
//! caps from `RulesConfig` rather than hardcoding them.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{DrawPileRule, RulesConfig};
pub use error::DeckError;
pub use rng::{DrawRng, DrawRngState};
