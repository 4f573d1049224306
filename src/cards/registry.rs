//! Card catalog for record lookup.
//!
//! `CatalogProvider` is the seam the rule modules read through. `Catalog`
//! is the in-memory implementation: rows are grouped by `CardType`, keep
//! their insertion order (so disabled-row reports are deterministic), and
//! are indexed by `(CardType, CardId)` for O(1) lookup.

use rustc_hash::FxHashMap;

use super::definition::{CardId, CardRecord, CardType};
use crate::core::DeckError;

/// Read-only source of card records.
///
/// The catalog is immutable while decks are edited against it.
pub trait CatalogProvider {
    /// Look up one record.
    fn card_by_id(&self, card_type: CardType, id: &CardId) -> Option<&CardRecord>;

    /// Every record of a type, in catalog order.
    fn cards_by_type(&self, card_type: CardType) -> &[CardRecord];
}

/// In-memory catalog.
///
/// ## Example
///
/// ```
/// use overpower_deck::cards::{Catalog, CatalogProvider, CardId, CardRecord, CardType};
///
/// let mut catalog = Catalog::new();
/// catalog
///     .insert(CardRecord::new("l-1", CardType::Location, "Barsoom"))
///     .unwrap();
///
/// let found = catalog.card_by_id(CardType::Location, &CardId::new("l-1")).unwrap();
/// assert_eq!(found.name, "Barsoom");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    rows: FxHashMap<CardType, Vec<CardRecord>>,
    index: FxHashMap<(CardType, CardId), usize>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records.
    pub fn from_records(records: impl IntoIterator<Item = CardRecord>) -> Result<Self, DeckError> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let records: Vec<CardRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Add a record.
    ///
    /// Fails if a record with the same type and id already exists.
    pub fn insert(&mut self, record: CardRecord) -> Result<(), DeckError> {
        let key = (record.card_type, record.id.clone());
        if self.index.contains_key(&key) {
            return Err(DeckError::DuplicateCard {
                card_type: record.card_type,
                card_id: record.id,
            });
        }

        let rows = self.rows.entry(record.card_type).or_default();
        self.index.insert(key, rows.len());
        rows.push(record);
        Ok(())
    }

    /// Check if a record is present.
    #[must_use]
    pub fn contains(&self, card_type: CardType, id: &CardId) -> bool {
        self.index.contains_key(&(card_type, id.clone()))
    }

    /// Get the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate over all records, type by type.
    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        CardType::ALL
            .into_iter()
            .flat_map(move |t| self.cards_by_type(t).iter())
    }

    /// Find records matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardRecord>
    where
        F: Fn(&CardRecord) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }
}

impl CatalogProvider for Catalog {
    fn card_by_id(&self, card_type: CardType, id: &CardId) -> Option<&CardRecord> {
        let index = *self.index.get(&(card_type, id.clone()))?;
        self.rows.get(&card_type).and_then(|rows| rows.get(index))
    }

    fn cards_by_type(&self, card_type: CardType) -> &[CardRecord] {
        self.rows.get(&card_type).map(Vec::as_slice).unwrap_or(&[])
    }
}
