//! `DeckRules`: the editing surface a host UI talks to.
//!
//! Binds a catalog and a rules configuration once, so callers pass only the
//! deck and the card they act on. Every method delegates to the free
//! functions in `deck` and `rules`; nothing here holds deck state.

use super::legality::{compute_legality, ValidationReport};
use super::limits::{evaluate_limit, LimitCategory, LimitResult};
use super::stats::{aggregate_stats, StatTotals};
use crate::cards::{CardId, CardType, CatalogProvider};
use crate::core::{DeckError, RulesConfig};
use crate::deck::{self, AddCheck, AddOutcome, DeckState, EditRequest};

/// Catalog and configuration bound together for editing.
///
/// ## Example
///
/// ```
/// use overpower_deck::cards::{Catalog, CardId, CardRecord, CardType, CharacterStats};
/// use overpower_deck::core::RulesConfig;
/// use overpower_deck::deck::DeckState;
/// use overpower_deck::rules::DeckRules;
///
/// let catalog = Catalog::from_records([
///     CardRecord::character("c-1", "Tarzan", CharacterStats::new(3, 7, 6, 4), 18),
/// ])
/// .unwrap();
/// let rules = DeckRules::new(&catalog, RulesConfig::default());
///
/// let deck = rules
///     .add_card(&DeckState::new(), CardType::Character, &CardId::new("c-1"))
///     .unwrap()
///     .into_deck();
/// assert!(rules.validation_report(&deck).is_valid);
/// ```
#[derive(Debug)]
pub struct DeckRules<'c, C: ?Sized> {
    catalog: &'c C,
    config: RulesConfig,
}

impl<'c, C> DeckRules<'c, C>
where
    C: CatalogProvider + ?Sized,
{
    #[must_use]
    pub fn new(catalog: &'c C, config: RulesConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub fn catalog(&self) -> &'c C {
        self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn add_card(
        &self,
        deck: &DeckState,
        card_type: CardType,
        card_id: &CardId,
    ) -> Result<AddOutcome, DeckError> {
        deck::add_card(deck, self.catalog, &self.config, card_type, card_id)
    }

    /// Add from raw request strings.
    pub fn add_raw(
        &self,
        deck: &DeckState,
        card_type: &str,
        card_id: &str,
    ) -> Result<AddOutcome, DeckError> {
        let request = EditRequest::parse(card_type, card_id)?;
        deck::apply_add(deck, self.catalog, &self.config, &request)
    }

    pub fn remove_card(
        &self,
        deck: &DeckState,
        card_type: CardType,
        card_id: &CardId,
    ) -> Result<DeckState, DeckError> {
        deck::remove_card(deck, card_type, card_id)
    }

    /// Remove from raw request strings.
    pub fn remove_raw(
        &self,
        deck: &DeckState,
        card_type: &str,
        card_id: &str,
    ) -> Result<DeckState, DeckError> {
        let request = EditRequest::parse(card_type, card_id)?;
        deck::remove_card(deck, request.card_type, &request.card_id)
    }

    pub fn toggle_ko(&self, deck: &DeckState, index: usize) -> Result<DeckState, DeckError> {
        deck::toggle_ko(deck, index)
    }

    #[must_use]
    pub fn validation_report(&self, deck: &DeckState) -> ValidationReport {
        compute_legality(deck, self.catalog, &self.config)
    }

    pub fn is_card_disabled_for_add(
        &self,
        deck: &DeckState,
        card_type: CardType,
        card_id: &CardId,
    ) -> Result<AddCheck, DeckError> {
        deck::is_card_disabled_for_add(deck, self.catalog, &self.config, card_type, card_id)
    }

    #[must_use]
    pub fn evaluate_limit(&self, deck: &DeckState, category: &LimitCategory) -> LimitResult {
        evaluate_limit(deck, self.catalog, &self.config, category)
    }

    #[must_use]
    pub fn aggregate_stats(&self, deck: &DeckState) -> StatTotals {
        aggregate_stats(deck, self.catalog)
    }

    /// Entries the active team cannot use while characters are KO'd.
    #[must_use]
    pub fn ko_dimmed_entries(&self, deck: &DeckState) -> Vec<usize> {
        deck::ko_dimmed_entries(deck, self.catalog)
    }
}
