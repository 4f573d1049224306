//! Card system: records and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Catalog identifier, unique within a card type
//! - `CardType`: The twelve card types of the game
//! - `CardRecord`: Immutable printed card data
//! - `CatalogProvider`: Read-only lookup seam
//! - `Catalog`: In-memory catalog

pub mod definition;
pub mod registry;

pub use definition::{
    CardId, CardRecord, CardType, CharacterStats, PowerType, Stat, StatRequirement, ANY_CHARACTER,
    ANY_MISSION,
};
pub use registry::{Catalog, CatalogProvider};
