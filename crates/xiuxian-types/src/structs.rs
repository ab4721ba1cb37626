//! Core entity structs for the exploration service.
//!
//! Covers the mutable player snapshot, the immutable catalogue records,
//! the persisted inventory rows, and the event/choice payloads returned to
//! the client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ChoiceValue, EventKind, EventType, HerbCategory, HerbQuality, PillGrade, RewardKind};
use crate::ids::UserId;

// ---------------------------------------------------------------------------
// Player snapshot
// ---------------------------------------------------------------------------

/// Default value for every recognized growth attribute.
pub const DEFAULT_ATTRIBUTE: f64 = 1.0;

/// Typed view of the per-player attribute blob.
///
/// The three recognized keys are lifted into fields; every other key is
/// kept in [`extra`](Self::extra) so it survives a read-modify-write.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAttributes {
    /// Multiplier on the per-check event gate.
    pub luck: f64,
    /// Cultivation growth multiplier.
    pub cultivation_rate: f64,
    /// Spirit growth multiplier.
    pub spirit_rate: f64,
    /// Unrecognized keys, preserved verbatim.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self {
            luck: DEFAULT_ATTRIBUTE,
            cultivation_rate: DEFAULT_ATTRIBUTE,
            spirit_rate: DEFAULT_ATTRIBUTE,
            extra: BTreeMap::new(),
        }
    }
}

/// The slice of a player record an exploration reads and mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Account id.
    pub id: UserId,
    /// Cultivation level.
    pub level: u32,
    /// Cultivation points, kept at one decimal place.
    pub cultivation: f64,
    /// Spirit power.
    pub spirit: f64,
    /// Spirit stone balance.
    pub spirit_stones: i64,
    /// Growth attributes decoded from the attribute blob.
    pub attributes: PlayerAttributes,
}

impl Player {
    /// A fresh level-1 player with zeroed stats and default attributes.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            level: 1,
            cultivation: 0.0,
            spirit: 0.0,
            spirit_stones: 0,
            attributes: PlayerAttributes::default(),
        }
    }
}

/// A partial write to a player record. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerUpdate {
    /// New cultivation value.
    pub cultivation: Option<f64>,
    /// New spirit value.
    pub spirit: Option<f64>,
    /// New spirit stone balance.
    pub spirit_stones: Option<i64>,
    /// New attribute blob.
    pub attributes: Option<PlayerAttributes>,
}

impl PlayerUpdate {
    /// An update that writes nothing.
    pub const fn new() -> Self {
        Self {
            cultivation: None,
            spirit: None,
            spirit_stones: None,
            attributes: None,
        }
    }

    /// Set the cultivation column.
    #[must_use]
    pub const fn cultivation(mut self, value: f64) -> Self {
        self.cultivation = Some(value);
        self
    }

    /// Set the spirit column.
    #[must_use]
    pub const fn spirit(mut self, value: f64) -> Self {
        self.spirit = Some(value);
        self
    }

    /// Set the spirit stones column.
    #[must_use]
    pub const fn spirit_stones(mut self, value: i64) -> Self {
        self.spirit_stones = Some(value);
        self
    }

    /// Set the attribute blob.
    #[must_use]
    pub fn attributes(mut self, value: PlayerAttributes) -> Self {
        self.attributes = Some(value);
        self
    }

    /// True when no column would be written.
    pub const fn is_empty(&self) -> bool {
        self.cultivation.is_none()
            && self.spirit.is_none()
            && self.spirit_stones.is_none()
            && self.attributes.is_none()
    }

    /// Apply this update to an in-memory player.
    pub fn apply_to(&self, player: &mut Player) {
        if let Some(v) = self.cultivation {
            player.cultivation = v;
        }
        if let Some(v) = self.spirit {
            player.spirit = v;
        }
        if let Some(v) = self.spirit_stones {
            player.spirit_stones = v;
        }
        if let Some(attrs) = &self.attributes {
            player.attributes = attrs.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Catalogue records
// ---------------------------------------------------------------------------

/// An immutable herb definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HerbConfig {
    /// Stable herb id (`spirit_grass`, ...).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Flavor text.
    pub description: &'static str,
    /// Value before the quality multiplier.
    pub base_value: i64,
    /// What the herb is used for.
    pub category: HerbCategory,
    /// Narrative rarity. Selection does not read it.
    pub chance: f64,
}

/// A quality tier record: the tier, its display name, and its multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityTier {
    /// The tier.
    pub quality: HerbQuality,
    /// Display name.
    pub name: &'static str,
    /// Value multiplier.
    pub multiplier: f64,
}

impl From<HerbQuality> for QualityTier {
    fn from(quality: HerbQuality) -> Self {
        Self {
            quality,
            name: quality.display_name(),
            multiplier: quality.multiplier(),
        }
    }
}

/// An immutable pill recipe definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillRecipe {
    /// Stable recipe id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Flavor text.
    pub description: &'static str,
    /// Grade.
    pub grade: PillGrade,
    /// Effect category.
    #[serde(rename = "type")]
    pub kind: HerbCategory,
    /// Pages needed to complete the recipe.
    pub fragments_needed: u32,
}

// ---------------------------------------------------------------------------
// Persisted inventory rows
// ---------------------------------------------------------------------------

/// A player's running herb count, unique on `(user_id, herb_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct HerbInstance {
    /// Owner.
    pub user_id: UserId,
    /// Catalogue herb id.
    pub herb_id: String,
    /// Display name at the time of the first grant.
    pub name: String,
    /// Running total.
    pub count: i64,
}

/// A player's running recipe page count, unique on `(user_id, recipe_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PillFragment {
    /// Owner.
    pub user_id: UserId,
    /// Catalogue recipe id.
    pub recipe_id: String,
    /// Running total.
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Event payloads
// ---------------------------------------------------------------------------

/// A herb as reported in a `herb_found` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FoundHerb {
    /// Catalogue herb id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Rolled quality.
    pub quality: HerbQuality,
    /// Base value scaled by quality.
    pub value: i64,
    /// The player's running count after this grant.
    pub count: i64,
}

/// A choice offered to the client alongside an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventChoice {
    /// Button label.
    pub text: String,
    /// Value the client sends back.
    pub value: ChoiceValue,
}

impl EventChoice {
    /// The default "keep exploring" choice.
    pub fn continue_exploring() -> Self {
        Self {
            text: String::from("继续探索"),
            value: ChoiceValue::Continue,
        }
    }

    /// A "collect the item" choice labeled with the item name.
    pub fn collect(item: &str) -> Self {
        Self {
            text: format!("收起{item}"),
            value: ChoiceValue::Collect,
        }
    }
}

/// One triggered exploration event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ExplorationEvent {
    /// Wire category.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Which random event fired.
    pub kind: EventKind,
    /// `[name]description` text.
    pub description: String,
    /// Name of a found item, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub item: Option<String>,
    /// Headline number for the event (bonus, damage, stones, herb value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub amount: Option<i64>,
    /// The herb granted by a herb discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub herb: Option<FoundHerb>,
    /// Name of the attacker in a battle encounter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub enemy: Option<String>,
    /// Recipe whose page was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub recipe_id: Option<String>,
    /// Running page count for [`recipe_id`](Self::recipe_id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub fragments: Option<i64>,
    /// Never empty.
    pub choices: Vec<EventChoice>,
}

impl ExplorationEvent {
    /// An event of the given kind with no payload and the default choice.
    pub fn new(kind: EventKind, description: String) -> Self {
        Self {
            event_type: kind.event_type(),
            kind,
            description,
            item: None,
            amount: None,
            herb: None,
            enemy: None,
            recipe_id: None,
            fragments: None,
            choices: vec![EventChoice::continue_exploring()],
        }
    }

    /// Set the headline amount.
    #[must_use]
    pub const fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// Result of one exploration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ExplorationReport {
    /// Events in the order they fired.
    pub events: Vec<ExplorationEvent>,
    /// One line per event, newline-terminated.
    pub log: String,
    /// Number of checks performed.
    pub checks: u64,
}

/// The outcome of answering an event choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChoiceRewards {
    /// Reward category.
    #[serde(rename = "type")]
    pub kind: RewardKind,
    /// Message shown to the player.
    pub message: String,
    /// Spirit stones granted, for battles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub reward: Option<i64>,
}

impl ChoiceRewards {
    /// A reward with a message and no amount.
    pub fn message(kind: RewardKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_owned(),
            reward: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_wire_names() {
        let mut event = ExplorationEvent::new(EventKind::SpiritSpring, String::from("x"))
            .with_amount(60);
        event.recipe_id = None;
        let json = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(json["type"], "item_found");
        assert_eq!(json["amount"], 60);
        assert_eq!(json["choices"][0]["value"], "continue");
        assert!(json.get("recipeId").is_none());
    }

    #[test]
    fn update_applies_only_present_fields() {
        let mut player = Player::new(UserId::new(1));
        player.spirit = 50.0;
        PlayerUpdate::new().cultivation(12.5).apply_to(&mut player);
        assert!((player.cultivation - 12.5).abs() < f64::EPSILON);
        assert!((player.spirit - 50.0).abs() < f64::EPSILON);
        assert!(PlayerUpdate::default().is_empty());
    }

    #[test]
    fn collect_choice_labels_item() {
        let choice = EventChoice::collect("灵精草");
        assert_eq!(choice.text, "收起灵精草");
        assert_eq!(choice.value, ChoiceValue::Collect);
    }

    #[test]
    fn recipe_kind_serializes_as_type() {
        let recipe = PillRecipe {
            id: "spirit_gathering",
            name: "聚灵丹",
            description: "",
            grade: PillGrade::Grade1,
            kind: HerbCategory::Spirit,
            fragments_needed: 10,
        };
        let json = serde_json::to_value(&recipe).unwrap_or_default();
        assert_eq!(json["type"], "spirit");
        assert_eq!(json["grade"], "grade1");
        assert_eq!(json["fragmentsNeeded"], 10);
    }
}
