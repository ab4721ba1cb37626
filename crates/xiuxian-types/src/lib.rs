//! Shared type definitions for the Xiuxian exploration service.
//!
//! This crate is the single source of truth for the player snapshot, the
//! catalogue records, and the event payloads exchanged with the client.
//! Wire types flow to `TypeScript` via `ts-rs` for the game client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe account identifiers
//! - [`enums`] -- Event types, event kinds, quality tiers, choices
//! - [`structs`] -- Player snapshot, catalogue records, inventory rows, events

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ChoiceValue, EventKind, EventType, HerbCategory, HerbQuality, PillGrade, RewardKind,
};
pub use ids::UserId;
pub use structs::{
    ChoiceRewards, DEFAULT_ATTRIBUTE, EventChoice, ExplorationEvent, ExplorationReport, FoundHerb,
    HerbConfig, HerbInstance, PillFragment, PillRecipe, Player, PlayerAttributes, PlayerUpdate,
    QualityTier,
};
