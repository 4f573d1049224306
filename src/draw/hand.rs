//! Sample hand drawing.
//!
//! The draw pile is every card outside the pre-placed ones (characters,
//! locations, missions), one slot per copy. Training cards marked
//! `exclude_from_draw` sit beside the pile instead.
//!
//! A hand is `hand_size` distinct pile slots. Drawing an event extends it to
//! `hand_size_with_events` when the pile has the cards.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardType};
use crate::core::{DrawRng, RulesConfig};
use crate::deck::{DeckCardEntry, DeckState};

/// One card in the draw pile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileCard {
    /// Index of the deck entry this copy comes from.
    pub entry_index: usize,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub card_id: CardId,
}

/// A drawn sample hand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleHand {
    pub cards: Vec<PileCard>,
    /// True if an event was drawn into the base hand.
    pub drew_event: bool,
}

impl SampleHand {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Expand the deck into its draw pile, in deck order.
///
/// One element per copy; `draw_hand` and `can_draw_hand` never expand.
#[must_use]
pub fn draw_pile(deck: &DeckState) -> Vec<PileCard> {
    deck.entries()
        .enumerate()
        .filter(|(_, e)| in_pile(e))
        .flat_map(|(entry_index, e)| (0..e.quantity).map(move |_| pile_card(entry_index, e)))
        .collect()
}

/// True if the pile holds a full hand.
#[must_use]
pub fn can_draw_hand(deck: &DeckState, config: &RulesConfig) -> bool {
    PileIndex::new(deck).len >= config.hand_size
}

/// Draw a sample hand.
///
/// A pile smaller than a hand yields the whole pile in random order.
///
/// ## Example
///
/// ```
/// use overpower_deck::cards::CardType;
/// use overpower_deck::core::{DrawRng, RulesConfig};
/// use overpower_deck::deck::{DeckCardEntry, DeckState};
/// use overpower_deck::draw::draw_hand;
///
/// let deck = DeckState::from_entries([DeckCardEntry::new(CardType::Power, "p-5").with_quantity(20)]);
/// let mut rng = DrawRng::new(11);
///
/// let hand = draw_hand(&deck, &RulesConfig::default(), &mut rng);
/// assert_eq!(hand.len(), 8);
/// ```
pub fn draw_hand(deck: &DeckState, config: &RulesConfig, rng: &mut DrawRng) -> SampleHand {
    let pile = PileIndex::new(deck);
    let extended = config.hand_size_with_events.max(config.hand_size);
    let order = rng.sample_indices(pile.len, extended);

    let base = order.len().min(config.hand_size);
    let drew_event = order[..base]
        .iter()
        .filter_map(|&slot| pile.card_at(slot))
        .any(|card| card.card_type == CardType::Event);
    let take = if drew_event { order.len() } else { base };

    SampleHand {
        cards: order[..take]
            .iter()
            .filter_map(|&slot| pile.card_at(slot))
            .collect(),
        drew_event,
    }
}

fn in_pile(entry: &DeckCardEntry) -> bool {
    !entry.card_type.is_pre_placed() && !entry.exclude_from_draw
}

fn pile_card(entry_index: usize, entry: &DeckCardEntry) -> PileCard {
    PileCard {
        entry_index,
        card_type: entry.card_type,
        card_id: entry.card_id.clone(),
    }
}

/// Pile entries with the first slot each one occupies.
struct PileIndex<'a> {
    starts: Vec<(usize, usize, &'a DeckCardEntry)>,
    len: usize,
}

impl<'a> PileIndex<'a> {
    fn new(deck: &'a DeckState) -> Self {
        let mut starts = Vec::new();
        let mut len = 0usize;
        for (entry_index, entry) in deck.entries().enumerate().filter(|(_, e)| in_pile(e)) {
            starts.push((len, entry_index, entry));
            len = len.saturating_add(usize::try_from(entry.quantity).unwrap_or(usize::MAX));
        }
        Self { starts, len }
    }

    fn card_at(&self, slot: usize) -> Option<PileCard> {
        if slot >= self.len {
            return None;
        }
        let after = self.starts.partition_point(|&(start, _, _)| start <= slot);
        let &(_, entry_index, entry) = self.starts.get(after.checked_sub(1)?)?;
        Some(pile_card(entry_index, entry))
    }
}
