//! Card records - immutable catalog rows.
//!
//! A `CardRecord` holds the printed properties of one card: its type, name,
//! character stats, power value, and the flags that put it under one of the
//! single-copy restrictions. Deck-specific data (quantity, KO state) lives in
//! `DeckCardEntry`, never here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::DeckError;

/// Catalog identifier of a card.
///
/// Ids are unique within a card type, not across types.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The twelve card types of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Character,
    Special,
    Location,
    Mission,
    Event,
    Aspect,
    #[serde(alias = "advanced-universe", alias = "advancedUniverse")]
    AdvancedUniverse,
    Teamwork,
    #[serde(alias = "ally-universe", alias = "allyUniverse")]
    AllyUniverse,
    Training,
    #[serde(alias = "basic-universe", alias = "basicUniverse")]
    BasicUniverse,
    Power,
}

impl CardType {
    /// Every card type, in catalog display order.
    pub const ALL: [CardType; 12] = [
        CardType::Character,
        CardType::Special,
        CardType::Location,
        CardType::Mission,
        CardType::Event,
        CardType::Aspect,
        CardType::AdvancedUniverse,
        CardType::Teamwork,
        CardType::AllyUniverse,
        CardType::Training,
        CardType::BasicUniverse,
        CardType::Power,
    ];

    /// Canonical snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardType::Character => "character",
            CardType::Special => "special",
            CardType::Location => "location",
            CardType::Mission => "mission",
            CardType::Event => "event",
            CardType::Aspect => "aspect",
            CardType::AdvancedUniverse => "advanced_universe",
            CardType::Teamwork => "teamwork",
            CardType::AllyUniverse => "ally_universe",
            CardType::Training => "training",
            CardType::BasicUniverse => "basic_universe",
            CardType::Power => "power",
        }
    }

    /// Cards that sit beside the draw pile rather than in it.
    #[must_use]
    pub const fn is_pre_placed(self) -> bool {
        matches!(
            self,
            CardType::Character | CardType::Location | CardType::Mission
        )
    }

    /// Universe cards carry a stat requirement in `to_use`.
    #[must_use]
    pub const fn is_universe(self) -> bool {
        matches!(
            self,
            CardType::AdvancedUniverse
                | CardType::Teamwork
                | CardType::AllyUniverse
                | CardType::Training
                | CardType::BasicUniverse
        )
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = DeckError;

    /// Accepts `advanced_universe`, `advanced-universe` and `advancedUniverse`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(*c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        CardType::ALL
            .into_iter()
            .find(|t| t.as_str().replace('_', "") == folded)
            .ok_or_else(|| DeckError::UnknownCardType(s.to_string()))
    }
}

/// The four character stats, which double as the icon kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Energy,
    Combat,
    #[serde(rename = "Brute Force", alias = "BruteForce")]
    BruteForce,
    Intelligence,
}

impl Stat {
    pub const ALL: [Stat; 4] = [Stat::Energy, Stat::Combat, Stat::BruteForce, Stat::Intelligence];
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stat::Energy => "Energy",
            Stat::Combat => "Combat",
            Stat::BruteForce => "Brute Force",
            Stat::Intelligence => "Intelligence",
        })
    }
}

/// Power type printed on a power card or a universe requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerType {
    Energy,
    Combat,
    #[serde(rename = "Brute Force", alias = "BruteForce")]
    BruteForce,
    Intelligence,
    #[serde(rename = "Any-Power", alias = "AnyPower")]
    AnyPower,
    #[serde(rename = "Multi-Power", alias = "Multi Power", alias = "MultiPower")]
    MultiPower,
}

impl PowerType {
    /// The single stat this type reads, or `None` for Any-Power / Multi-Power.
    #[must_use]
    pub const fn stat(self) -> Option<Stat> {
        match self {
            PowerType::Energy => Some(Stat::Energy),
            PowerType::Combat => Some(Stat::Combat),
            PowerType::BruteForce => Some(Stat::BruteForce),
            PowerType::Intelligence => Some(Stat::Intelligence),
            PowerType::AnyPower | PowerType::MultiPower => None,
        }
    }
}

impl From<Stat> for PowerType {
    fn from(stat: Stat) -> Self {
        match stat {
            Stat::Energy => PowerType::Energy,
            Stat::Combat => PowerType::Combat,
            Stat::BruteForce => PowerType::BruteForce,
            Stat::Intelligence => PowerType::Intelligence,
        }
    }
}

impl fmt::Display for PowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stat() {
            Some(stat) => fmt::Display::fmt(&stat, f),
            None if *self == PowerType::AnyPower => f.write_str("Any-Power"),
            None => f.write_str("Multi-Power"),
        }
    }
}

/// Printed character stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    pub energy: u32,
    pub combat: u32,
    pub brute_force: u32,
    pub intelligence: u32,
}

impl CharacterStats {
    #[must_use]
    pub const fn new(energy: u32, combat: u32, brute_force: u32, intelligence: u32) -> Self {
        Self {
            energy,
            combat,
            brute_force,
            intelligence,
        }
    }

    /// Read one stat.
    #[must_use]
    pub const fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Energy => self.energy,
            Stat::Combat => self.combat,
            Stat::BruteForce => self.brute_force,
            Stat::Intelligence => self.intelligence,
        }
    }

    /// Mutable access to one stat.
    pub fn get_mut(&mut self, stat: Stat) -> &mut u32 {
        match stat {
            Stat::Energy => &mut self.energy,
            Stat::Combat => &mut self.combat,
            Stat::BruteForce => &mut self.brute_force,
            Stat::Intelligence => &mut self.intelligence,
        }
    }

    /// Highest of the four stats.
    #[must_use]
    pub fn highest(&self) -> u32 {
        Stat::ALL.into_iter().map(|s| self.get(s)).max().unwrap_or(0)
    }

    /// Value this character brings to a card of `power_type`.
    ///
    /// Any-Power and Multi-Power read the highest stat.
    #[must_use]
    pub fn for_power_type(&self, power_type: PowerType) -> u32 {
        match power_type.stat() {
            Some(stat) => self.get(stat),
            None => self.highest(),
        }
    }
}

/// "N of power type" - a power card's printed value, or the `to_use`
/// requirement of a universe card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatRequirement {
    pub value: u32,
    pub power_type: PowerType,
}

impl StatRequirement {
    #[must_use]
    pub const fn new(value: u32, power_type: PowerType) -> Self {
        Self { value, power_type }
    }
}

impl fmt::Display for StatRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+ {}", self.value, self.power_type)
    }
}

/// Immutable catalog row.
///
/// ## Example
///
/// ```
/// use overpower_deck::cards::{CardRecord, CardType, CharacterStats};
///
/// let carter = CardRecord::character("c-1", "John Carter", CharacterStats::new(6, 7, 4, 3), 19);
/// assert_eq!(carter.card_type, CardType::Character);
/// assert_eq!(carter.threat_level, 19);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,

    #[serde(rename = "type")]
    pub card_type: CardType,

    pub name: String,

    /// Character stats. `None` for non-characters.
    #[serde(default)]
    pub stats: Option<CharacterStats>,

    /// Character (or location) threat.
    #[serde(default)]
    pub threat_level: u32,

    /// Power card value and type.
    #[serde(default)]
    pub power: Option<StatRequirement>,

    /// Universe card requirement.
    #[serde(default)]
    pub to_use: Option<StatRequirement>,

    #[serde(default)]
    pub one_per_deck: bool,

    /// Explicit one-per-deck group shared by variant printings.
    #[serde(default)]
    pub opd_group: Option<String>,

    #[serde(default)]
    pub is_cataclysm: bool,

    #[serde(default)]
    pub is_assist: bool,

    #[serde(default)]
    pub is_ambush: bool,

    #[serde(default)]
    pub is_fortification: bool,

    /// Owning character of a special or advanced-universe card.
    #[serde(default)]
    pub character_name: Option<String>,

    /// Mission set of a mission or event.
    #[serde(default)]
    pub mission_set: Option<String>,

    #[serde(default)]
    pub universe: Option<String>,

    /// Printed stat icons.
    #[serde(default)]
    pub icons: Vec<Stat>,
}

/// `character_name` value of specials any character may play.
pub const ANY_CHARACTER: &str = "Any Character";

/// `mission_set` value of events legal with any mission set.
pub const ANY_MISSION: &str = "Any-Mission";

impl CardRecord {
    /// Create a bare record.
    #[must_use]
    pub fn new(id: impl Into<String>, card_type: CardType, name: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            card_type,
            name: name.into(),
            stats: None,
            threat_level: 0,
            power: None,
            to_use: None,
            one_per_deck: false,
            opd_group: None,
            is_cataclysm: false,
            is_assist: false,
            is_ambush: false,
            is_fortification: false,
            character_name: None,
            mission_set: None,
            universe: None,
            icons: Vec::new(),
        }
    }

    /// Create a character record.
    #[must_use]
    pub fn character(
        id: impl Into<String>,
        name: impl Into<String>,
        stats: CharacterStats,
        threat_level: u32,
    ) -> Self {
        let mut record = Self::new(id, CardType::Character, name);
        record.stats = Some(stats);
        record.threat_level = threat_level;
        record
    }

    /// Create a power card record, named like "5 Energy".
    #[must_use]
    pub fn power(id: impl Into<String>, value: u32, power_type: PowerType) -> Self {
        let mut record = Self::new(id, CardType::Power, format!("{value} {power_type}"));
        record.power = Some(StatRequirement::new(value, power_type));
        record
    }

    /// Mark as one-per-deck.
    #[must_use]
    pub fn one_per_deck(mut self) -> Self {
        self.one_per_deck = true;
        self
    }

    /// Put in an explicit one-per-deck group.
    #[must_use]
    pub fn with_opd_group(mut self, group: impl Into<String>) -> Self {
        self.one_per_deck = true;
        self.opd_group = Some(group.into());
        self
    }

    #[must_use]
    pub fn cataclysm(mut self) -> Self {
        self.is_cataclysm = true;
        self
    }

    #[must_use]
    pub fn assist(mut self) -> Self {
        self.is_assist = true;
        self
    }

    #[must_use]
    pub fn ambush(mut self) -> Self {
        self.is_ambush = true;
        self
    }

    #[must_use]
    pub fn fortification(mut self) -> Self {
        self.is_fortification = true;
        self
    }

    /// Tie the card to a named character.
    #[must_use]
    pub fn for_character(mut self, name: impl Into<String>) -> Self {
        self.character_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_mission_set(mut self, set: impl Into<String>) -> Self {
        self.mission_set = Some(set.into());
        self
    }

    #[must_use]
    pub fn with_universe(mut self, universe: impl Into<String>) -> Self {
        self.universe = Some(universe.into());
        self
    }

    #[must_use]
    pub fn with_threat(mut self, threat_level: u32) -> Self {
        self.threat_level = threat_level;
        self
    }

    #[must_use]
    pub fn with_icons(mut self, icons: &[Stat]) -> Self {
        self.icons = icons.to_vec();
        self
    }

    #[must_use]
    pub fn with_to_use(mut self, requirement: StatRequirement) -> Self {
        self.to_use = Some(requirement);
        self
    }

    /// True if the card falls under a one-per-deck restriction.
    #[must_use]
    pub fn is_one_per_deck(&self) -> bool {
        self.one_per_deck || self.opd_group.is_some()
    }

    /// Named character this card requires, if any.
    #[must_use]
    pub fn required_character(&self) -> Option<&str> {
        self.character_name
            .as_deref()
            .filter(|name| !name.is_empty() && *name != ANY_CHARACTER)
    }

    /// Stat requirement that governs usability, if any.
    ///
    /// Power cards use their printed value; universe cards their `to_use`.
    #[must_use]
    pub fn usability_requirement(&self) -> Option<StatRequirement> {
        match self.card_type {
            CardType::Power => self.power,
            t if t.is_universe() => self.to_use,
            _ => None,
        }
    }
}
