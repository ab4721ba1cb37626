//! Enumeration types for the exploration service.
//!
//! Every enum that crosses the wire serializes as a stable snake_case
//! string; those strings are part of the client contract.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Event types (wire)
// ---------------------------------------------------------------------------

/// The client-facing category of an [`ExplorationEvent`].
///
/// [`ExplorationEvent`]: crate::structs::ExplorationEvent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventType {
    /// A generic find or encounter that changed the player's stats.
    ItemFound,
    /// The player found spirit stones.
    SpiritStoneFound,
    /// The player found a herb.
    HerbFound,
    /// The player found a page of a pill recipe.
    #[serde(rename = "pill_recipe_fragment_found")]
    PillRecipeFragment,
    /// The player was attacked.
    BattleEncounter,
}

impl EventType {
    /// The stable wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ItemFound => "item_found",
            Self::SpiritStoneFound => "spirit_stone_found",
            Self::HerbFound => "herb_found",
            Self::PillRecipeFragment => "pill_recipe_fragment_found",
            Self::BattleEncounter => "battle_encounter",
        }
    }

    /// Parse a wire name. Returns `None` for anything unrecognized.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "item_found" => Some(Self::ItemFound),
            "spirit_stone_found" => Some(Self::SpiritStoneFound),
            "herb_found" => Some(Self::HerbFound),
            "pill_recipe_fragment_found" => Some(Self::PillRecipeFragment),
            "battle_encounter" => Some(Self::BattleEncounter),
            _ => None,
        }
    }
}

impl core::fmt::Display for EventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Random event kinds
// ---------------------------------------------------------------------------

/// One of the ten random events an exploration check can trigger.
///
/// Declaration order matches the engine's scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventKind {
    /// Studying an inscribed tablet grants cultivation.
    AncientTablet,
    /// Bathing in a spirit spring restores spirit.
    SpiritSpring,
    /// A passing master grants both cultivation and spirit.
    AncientMaster,
    /// A beast drains spirit.
    MonsterAttack,
    /// A botched breakthrough costs cultivation.
    CultivationDeviation,
    /// A cache of spirit stones.
    TreasureTrove,
    /// Insight grants cultivation and raises the spirit growth rate.
    Enlightenment,
    /// Reversed qi costs both spirit and cultivation.
    QiDeviation,
    /// A herb is found and stored.
    HerbDiscovery,
    /// A pill recipe page is found and stored.
    PillRecipeFragment,
}

impl EventKind {
    /// Stable snake_case identifier, used in persistence contexts and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AncientTablet => "ancient_tablet",
            Self::SpiritSpring => "spirit_spring",
            Self::AncientMaster => "ancient_master",
            Self::MonsterAttack => "monster_attack",
            Self::CultivationDeviation => "cultivation_deviation",
            Self::TreasureTrove => "treasure_trove",
            Self::Enlightenment => "enlightenment",
            Self::QiDeviation => "qi_deviation",
            Self::HerbDiscovery => "herb_discovery",
            Self::PillRecipeFragment => "pill_recipe_fragment",
        }
    }

    /// The wire category the event is reported under.
    pub const fn event_type(self) -> EventType {
        match self {
            Self::MonsterAttack => EventType::BattleEncounter,
            Self::TreasureTrove => EventType::SpiritStoneFound,
            Self::HerbDiscovery => EventType::HerbFound,
            Self::PillRecipeFragment => EventType::PillRecipeFragment,
            Self::AncientTablet
            | Self::SpiritSpring
            | Self::AncientMaster
            | Self::CultivationDeviation
            | Self::Enlightenment
            | Self::QiDeviation => EventType::ItemFound,
        }
    }
}

// ---------------------------------------------------------------------------
// Herb quality
// ---------------------------------------------------------------------------

/// Herb quality tier, ordered coarse to fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HerbQuality {
    /// x1.
    Common,
    /// x1.5.
    Uncommon,
    /// x2.
    Rare,
    /// x3.
    Epic,
    /// x5.
    Legendary,
}

impl HerbQuality {
    /// All tiers in rank order.
    pub const ALL: [Self; 5] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
    ];

    /// Stable wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    /// Chinese display name shown to players.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Common => "普通",
            Self::Uncommon => "优质",
            Self::Rare => "稀有",
            Self::Epic => "极品",
            Self::Legendary => "仙品",
        }
    }

    /// Value multiplier applied to a herb's base value.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Common => 1.0,
            Self::Uncommon => 1.5,
            Self::Rare => 2.0,
            Self::Epic => 3.0,
            Self::Legendary => 5.0,
        }
    }

    /// Parse a wire name. Returns `None` for unknown tiers.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == name)
    }
}

// ---------------------------------------------------------------------------
// Catalogue classifications
// ---------------------------------------------------------------------------

/// What a herb (or the pill refined from it) is good for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HerbCategory {
    /// Restores or raises spirit.
    Spirit,
    /// Raises cultivation.
    Cultivation,
    /// Raises combat attributes.
    Attribute,
    /// Rare effects.
    Special,
}

/// Pill recipe grade, `grade1` (lowest) to `grade8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PillGrade {
    /// First grade.
    Grade1,
    /// Second grade.
    Grade2,
    /// Third grade.
    Grade3,
    /// Fourth grade.
    Grade4,
    /// Fifth grade.
    Grade5,
    /// Sixth grade.
    Grade6,
    /// Seventh grade.
    Grade7,
    /// Eighth grade.
    Grade8,
}

// ---------------------------------------------------------------------------
// Choices and rewards
// ---------------------------------------------------------------------------

/// The value attached to a choice offered with an event, and the choice the
/// client sends back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ChoiceValue {
    /// Acknowledge and keep exploring.
    #[default]
    Continue,
    /// Pick up the found item.
    Collect,
    /// Stand and fight.
    Fight,
    /// Run from the fight.
    Flee,
}

/// Category of a reward returned by an event choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RewardKind {
    /// Generic item acknowledgement.
    Item,
    /// Spirit stones.
    SpiritStone,
    /// Herb.
    Herb,
    /// Pill recipe page.
    PillFragment,
    /// Battle outcome.
    Battle,
}
