//! `PostgreSQL` data layer for the Xiuxian exploration service.
//!
//! Implements the core's [`PlayerStore`](xiuxian_core::PlayerStore) and
//! [`InventoryStore`](xiuxian_core::InventoryStore) over three tables:
//!
//! ```text
//! players         id, level, cultivation, spirit, spirit_stones, base_attributes
//! herbs           user_id, herb_id, name, count      UNIQUE (user_id, herb_id)
//! pill_fragments  user_id, recipe_id, count          UNIQUE (user_id, recipe_id)
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- connection pool and configuration
//! - [`player_store`] -- player loads and partial updates
//! - [`inventory_store`] -- herb and recipe page upserts
//! - [`store`] -- [`PgStore`], the store trait implementation
//! - [`error`] -- shared error types

pub mod error;
pub mod inventory_store;
pub mod player_store;
pub mod postgres;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use inventory_store::{FragmentRow, HerbRow, InventoryRepo};
pub use player_store::{PlayerRepo, PlayerRow};
pub use postgres::{PostgresConfig, PostgresPool};
pub use store::PgStore;
