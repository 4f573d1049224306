//! Sample hands drawn from a deck's draw pile.

pub mod hand;

pub use hand::{can_draw_hand, draw_hand, draw_pile, PileCard, SampleHand};
