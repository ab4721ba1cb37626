//! The `PostgreSQL` implementation of the core store traits.

use xiuxian_core::{InventoryStore, PlayerStore, StoreError};
use xiuxian_types::{HerbInstance, PillFragment, Player, PlayerUpdate, UserId};

use crate::inventory_store::InventoryRepo;
use crate::player_store::PlayerRepo;
use crate::postgres::PostgresPool;

/// Players and inventory backed by a connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PostgresPool,
}

impl PgStore {
    /// Wrap a connected pool.
    pub const fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub const fn pool(&self) -> &PostgresPool {
        &self.pool
    }

    /// Player operations.
    pub fn players(&self) -> PlayerRepo<'_> {
        PlayerRepo::new(self.pool.pool())
    }

    /// Inventory operations.
    pub fn inventory(&self) -> InventoryRepo<'_> {
        InventoryRepo::new(self.pool.pool())
    }
}

impl PlayerStore for PgStore {
    async fn load_player(&self, id: UserId) -> Result<Player, StoreError> {
        Ok(self.players().load(id).await?)
    }

    async fn update_player_fields(
        &self,
        id: UserId,
        update: &PlayerUpdate,
    ) -> Result<(), StoreError> {
        Ok(self.players().update_fields(id, update).await?)
    }

    async fn credit_spirit_stones(&self, id: UserId, amount: i64) -> Result<i64, StoreError> {
        Ok(self.players().credit_spirit_stones(id, amount).await?)
    }
}

impl InventoryStore for PgStore {
    async fn upsert_herb(
        &self,
        user_id: UserId,
        herb_id: &str,
        name: &str,
        delta: i64,
    ) -> Result<HerbInstance, StoreError> {
        Ok(self
            .inventory()
            .upsert_herb(user_id, herb_id, name, delta)
            .await?)
    }

    async fn upsert_fragment(
        &self,
        user_id: UserId,
        recipe_id: &str,
        delta: i64,
    ) -> Result<PillFragment, StoreError> {
        Ok(self
            .inventory()
            .upsert_fragment(user_id, recipe_id, delta)
            .await?)
    }
}
