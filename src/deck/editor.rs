//! Deck editing boundary.
//!
//! Every edit takes a deck by reference and hands back a new one; the
//! caller's deck is never touched. Malformed requests are `Err`. An add that
//! would break a category cap is not an error: it comes back as
//! `AddOutcome::Refused` with the unchanged deck and a reason the UI can
//! show on the disabled control.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::DeckState;
use crate::cards::{CardId, CardRecord, CardType, CatalogProvider};
use crate::core::{DeckError, RulesConfig};
use crate::rules::limits::{applicable_limits, evaluate_limit, LimitResult};
use crate::rules::opd::character_identity;

/// Reason shown when a second printing of a character is added.
pub const DUPLICATE_CHARACTER_REASON: &str = "This character is already in your deck";

/// An add or remove request as received from a host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditRequest {
    pub card_type: CardType,
    pub card_id: CardId,
}

impl EditRequest {
    /// Parse a raw request.
    ///
    /// Fails on an unknown card type or a blank card id.
    ///
    /// ## Example
    ///
    /// ```
    /// use overpower_deck::cards::CardType;
    /// use overpower_deck::deck::EditRequest;
    ///
    /// let request = EditRequest::parse("advanced-universe", "au-3").unwrap();
    /// assert_eq!(request.card_type, CardType::AdvancedUniverse);
    ///
    /// assert!(EditRequest::parse("power", "  ").is_err());
    /// ```
    pub fn parse(card_type: &str, card_id: &str) -> Result<Self, DeckError> {
        let card_type = card_type.parse::<CardType>()?;
        let card_id = card_id.trim();
        if card_id.is_empty() {
            return Err(DeckError::MissingCardId);
        }
        Ok(Self {
            card_type,
            card_id: CardId::new(card_id),
        })
    }
}

/// Result of an add.
#[derive(Clone, Debug, PartialEq)]
pub enum AddOutcome {
    /// One copy was added.
    Added {
        deck: DeckState,
        /// The card's primary limit after the add, if it has one.
        limit: Option<LimitResult>,
    },
    /// The add would break a cap; `deck` is the unchanged input.
    Refused {
        deck: DeckState,
        /// The limit that refused the add, if a category cap did.
        limit: Option<LimitResult>,
        reason: String,
    },
}

impl AddOutcome {
    #[must_use]
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }

    /// The deck after the request.
    #[must_use]
    pub fn deck(&self) -> &DeckState {
        match self {
            AddOutcome::Added { deck, .. } | AddOutcome::Refused { deck, .. } => deck,
        }
    }

    #[must_use]
    pub fn into_deck(self) -> DeckState {
        match self {
            AddOutcome::Added { deck, .. } | AddOutcome::Refused { deck, .. } => deck,
        }
    }

    #[must_use]
    pub fn limit(&self) -> Option<&LimitResult> {
        match self {
            AddOutcome::Added { limit, .. } | AddOutcome::Refused { limit, .. } => limit.as_ref(),
        }
    }

    /// Refusal reason, if refused.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            AddOutcome::Added { .. } => None,
            AddOutcome::Refused { reason, .. } => Some(reason),
        }
    }
}

/// Whether a catalog row can be added right now.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCheck {
    pub disabled: bool,
    pub reason: Option<String>,
}

impl AddCheck {
    fn enabled() -> Self {
        Self::default()
    }

    fn disabled(reason: impl Into<String>) -> Self {
        Self {
            disabled: true,
            reason: Some(reason.into()),
        }
    }
}

struct Refusal {
    reason: String,
    limit: Option<LimitResult>,
}

fn lookup<'a, C>(
    catalog: &'a C,
    card_type: CardType,
    card_id: &CardId,
) -> Result<&'a CardRecord, DeckError>
where
    C: CatalogProvider + ?Sized,
{
    if card_id.as_str().trim().is_empty() {
        return Err(DeckError::MissingCardId);
    }
    catalog
        .card_by_id(card_type, card_id)
        .ok_or_else(|| DeckError::UnknownCard {
            card_type,
            card_id: card_id.clone(),
        })
}

/// First rule that would refuse one more copy of `record`.
fn check_add<C>(
    deck: &DeckState,
    catalog: &C,
    config: &RulesConfig,
    record: &CardRecord,
) -> Option<Refusal>
where
    C: CatalogProvider + ?Sized,
{
    if record.card_type == CardType::Character {
        let identity = character_identity(record);
        let duplicate = deck.characters().any(|entry| {
            entry.card_id == record.id
                || catalog
                    .card_by_id(CardType::Character, &entry.card_id)
                    .map_or(false, |present| character_identity(present) == identity)
        });
        if duplicate {
            return Some(Refusal {
                reason: DUPLICATE_CHARACTER_REASON.to_string(),
                limit: None,
            });
        }
    }

    applicable_limits(record).iter().find_map(|category| {
        let limit = evaluate_limit(deck, catalog, config, category);
        if limit.refuses_another() {
            Some(Refusal {
                reason: limit
                    .reason
                    .clone()
                    .unwrap_or_else(|| category.reason(limit.cap)),
                limit: Some(limit),
            })
        } else {
            None
        }
    })
}

/// Can one more copy of the card be added?
pub fn is_card_disabled_for_add<C>(
    deck: &DeckState,
    catalog: &C,
    config: &RulesConfig,
    card_type: CardType,
    card_id: &CardId,
) -> Result<AddCheck, DeckError>
where
    C: CatalogProvider + ?Sized,
{
    let record = lookup(catalog, card_type, card_id)?;
    Ok(match check_add(deck, catalog, config, record) {
        Some(refusal) => AddCheck::disabled(refusal.reason),
        None => AddCheck::enabled(),
    })
}

/// Add one copy of a card.
///
/// The card must exist in the catalog. If a cap would be broken the deck
/// comes back unchanged inside `AddOutcome::Refused`.
///
/// ## Example
///
/// ```
/// use overpower_deck::cards::{Catalog, CardId, CardRecord, CardType};
/// use overpower_deck::core::RulesConfig;
/// use overpower_deck::deck::{add_card, DeckState};
///
/// let catalog = Catalog::from_records([
///     CardRecord::new("l-1", CardType::Location, "Barsoom"),
///     CardRecord::new("l-2", CardType::Location, "Pellucidar"),
/// ])
/// .unwrap();
/// let config = RulesConfig::default();
///
/// let deck = add_card(&DeckState::new(), &catalog, &config, CardType::Location, &CardId::new("l-1"))
///     .unwrap()
///     .into_deck();
/// let second = add_card(&deck, &catalog, &config, CardType::Location, &CardId::new("l-2")).unwrap();
///
/// assert!(!second.is_added());
/// assert_eq!(second.deck().count_by_type(CardType::Location), 1);
/// ```
pub fn add_card<C>(
    deck: &DeckState,
    catalog: &C,
    config: &RulesConfig,
    card_type: CardType,
    card_id: &CardId,
) -> Result<AddOutcome, DeckError>
where
    C: CatalogProvider + ?Sized,
{
    let record = lookup(catalog, card_type, card_id)?;

    if let Some(refusal) = check_add(deck, catalog, config, record) {
        debug!(%card_type, %card_id, reason = %refusal.reason, "refused add");
        return Ok(AddOutcome::Refused {
            deck: deck.clone(),
            limit: refusal.limit,
            reason: refusal.reason,
        });
    }

    let mut next = deck.clone();
    next.increment(card_type, card_id);
    let limit = applicable_limits(record)
        .first()
        .map(|category| evaluate_limit(&next, catalog, config, category));
    debug!(%card_type, %card_id, "added card");
    Ok(AddOutcome::Added { deck: next, limit })
}

/// Add a parsed request.
pub fn apply_add<C>(
    deck: &DeckState,
    catalog: &C,
    config: &RulesConfig,
    request: &EditRequest,
) -> Result<AddOutcome, DeckError>
where
    C: CatalogProvider + ?Sized,
{
    add_card(deck, catalog, config, request.card_type, &request.card_id)
}

/// Remove one copy of a card, dropping the entry at zero.
///
/// Catalog misses can be removed too. A dangling reserve or display mission
/// left behind is cleared by the next legality computation.
pub fn remove_card(
    deck: &DeckState,
    card_type: CardType,
    card_id: &CardId,
) -> Result<DeckState, DeckError> {
    if card_id.as_str().trim().is_empty() {
        return Err(DeckError::MissingCardId);
    }
    let mut next = deck.clone();
    if !next.decrement(card_type, card_id) {
        return Err(DeckError::NotInDeck {
            card_type,
            card_id: card_id.clone(),
        });
    }
    debug!(%card_type, %card_id, "removed card");
    Ok(next)
}

/// Flip `exclude_from_draw` on the training entry at `index`.
pub fn toggle_exclude_from_draw(deck: &DeckState, index: usize) -> Result<DeckState, DeckError> {
    let len = deck.len();
    let mut next = deck.clone();
    let entry = next
        .entry_mut(index)
        .ok_or(DeckError::EntryOutOfRange { index, len })?;
    if entry.card_type != CardType::Training {
        return Err(DeckError::WrongEntryType {
            index,
            expected: CardType::Training,
            found: entry.card_type,
        });
    }
    entry.exclude_from_draw = !entry.exclude_from_draw;
    Ok(next)
}
