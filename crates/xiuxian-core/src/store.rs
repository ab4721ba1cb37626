//! Persistence boundary traits and an in-memory implementation.
//!
//! The core never talks to a database directly. It loads and updates
//! players through [`PlayerStore`] and grants inventory through
//! [`InventoryStore`]. Each call is atomic for the row it touches; nothing
//! spans calls.
//!
//! [`MemoryStore`] backs tests and the development server.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;
use xiuxian_types::{HerbInstance, PillFragment, Player, PlayerUpdate, UserId};

use crate::error::StoreError;

/// Loads and partially updates player records.
pub trait PlayerStore: Send + Sync {
    /// Load the player, or [`StoreError::PlayerNotFound`].
    fn load_player(&self, id: UserId) -> impl Future<Output = Result<Player, StoreError>> + Send;

    /// Write the `Some` fields of `update`. An empty update is a no-op.
    fn update_player_fields(
        &self,
        id: UserId,
        update: &PlayerUpdate,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Add `amount` to the spirit stone balance in one write and return the
    /// new balance.
    fn credit_spirit_stones(
        &self,
        id: UserId,
        amount: i64,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send;
}

/// Grants herbs and recipe pages.
pub trait InventoryStore: Send + Sync {
    /// Add `delta` to the `(user_id, herb_id)` row, creating it if absent,
    /// and return the row after the write.
    fn upsert_herb(
        &self,
        user_id: UserId,
        herb_id: &str,
        name: &str,
        delta: i64,
    ) -> impl Future<Output = Result<HerbInstance, StoreError>> + Send;

    /// Add `delta` to the `(user_id, recipe_id)` row, creating it if
    /// absent, and return the row after the write.
    fn upsert_fragment(
        &self,
        user_id: UserId,
        recipe_id: &str,
        delta: i64,
    ) -> impl Future<Output = Result<PillFragment, StoreError>> + Send;
}

/// Both halves of the persistence boundary.
pub trait ExplorationStore: PlayerStore + InventoryStore {}

impl<T: PlayerStore + InventoryStore> ExplorationStore for T {}

/// Error raised by [`MemoryStore`] when write failures are switched on.
#[derive(Debug, thiserror::Error)]
#[error("simulated write failure")]
pub struct SimulatedFailure;

/// Write budget meaning "never fail".
const UNLIMITED_WRITES: usize = usize::MAX;

/// A store held entirely in memory.
#[derive(Debug)]
pub struct MemoryStore {
    players: RwLock<BTreeMap<UserId, Player>>,
    herbs: RwLock<BTreeMap<(UserId, String), HerbInstance>>,
    fragments: RwLock<BTreeMap<(UserId, String), PillFragment>>,
    write_budget: AtomicUsize,
    writes: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            players: RwLock::default(),
            herbs: RwLock::default(),
            fragments: RwLock::default(),
            write_budget: AtomicUsize::new(UNLIMITED_WRITES),
            writes: AtomicUsize::new(0),
        }
    }
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a player.
    pub async fn insert_player(&self, player: Player) {
        self.players.write().await.insert(player.id, player);
    }

    /// Current copy of a player.
    pub async fn player(&self, id: UserId) -> Option<Player> {
        self.players.read().await.get(&id).cloned()
    }

    /// Current herb row.
    pub async fn herb(&self, user_id: UserId, herb_id: &str) -> Option<HerbInstance> {
        self.herbs
            .read()
            .await
            .get(&(user_id, herb_id.to_owned()))
            .cloned()
    }

    /// Current fragment row.
    pub async fn fragment(&self, user_id: UserId, recipe_id: &str) -> Option<PillFragment> {
        self.fragments
            .read()
            .await
            .get(&(user_id, recipe_id.to_owned()))
            .cloned()
    }

    /// All herb rows for a player.
    pub async fn herbs_of(&self, user_id: UserId) -> Vec<HerbInstance> {
        self.herbs
            .read()
            .await
            .values()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        let budget = if fail { 0 } else { UNLIMITED_WRITES };
        self.write_budget.store(budget, Ordering::SeqCst);
    }

    /// Let the next `writes` writes succeed and fail every one after them.
    pub fn fail_after_writes(&self, writes: usize) {
        self.write_budget.store(writes, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_write(&self) -> Result<(), StoreError> {
        let granted = self
            .write_budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                UNLIMITED_WRITES => Some(UNLIMITED_WRITES),
                left => left.checked_sub(1),
            })
            .is_ok();
        if !granted {
            return Err(StoreError::backend(SimulatedFailure));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl PlayerStore for MemoryStore {
    async fn load_player(&self, id: UserId) -> Result<Player, StoreError> {
        self.players
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::PlayerNotFound(id))
    }

    async fn update_player_fields(
        &self,
        id: UserId,
        update: &PlayerUpdate,
    ) -> Result<(), StoreError> {
        if update.is_empty() {
            return Ok(());
        }
        let mut players = self.players.write().await;
        let player = players.get_mut(&id).ok_or(StoreError::PlayerNotFound(id))?;
        self.check_write()?;
        update.apply_to(player);
        Ok(())
    }

    async fn credit_spirit_stones(&self, id: UserId, amount: i64) -> Result<i64, StoreError> {
        let mut players = self.players.write().await;
        let player = players.get_mut(&id).ok_or(StoreError::PlayerNotFound(id))?;
        self.check_write()?;
        player.spirit_stones = player.spirit_stones.saturating_add(amount);
        Ok(player.spirit_stones)
    }
}

impl InventoryStore for MemoryStore {
    async fn upsert_herb(
        &self,
        user_id: UserId,
        herb_id: &str,
        name: &str,
        delta: i64,
    ) -> Result<HerbInstance, StoreError> {
        self.check_write()?;
        let mut herbs = self.herbs.write().await;
        let row = herbs
            .entry((user_id, herb_id.to_owned()))
            .or_insert_with(|| HerbInstance {
                user_id,
                herb_id: herb_id.to_owned(),
                name: name.to_owned(),
                count: 0,
            });
        row.count = row.count.saturating_add(delta);
        Ok(row.clone())
    }

    async fn upsert_fragment(
        &self,
        user_id: UserId,
        recipe_id: &str,
        delta: i64,
    ) -> Result<PillFragment, StoreError> {
        self.check_write()?;
        let mut fragments = self.fragments.write().await;
        let row = fragments
            .entry((user_id, recipe_id.to_owned()))
            .or_insert_with(|| PillFragment {
                user_id,
                recipe_id: recipe_id.to_owned(),
                count: 0,
            });
        row.count = row.count.saturating_add(delta);
        Ok(row.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_player_is_not_found() {
        let store = MemoryStore::new();
        let err = store.load_player(UserId::new(9)).await.unwrap_err();
        assert!(matches!(err, StoreError::PlayerNotFound(id) if id == UserId::new(9)));
    }

    #[tokio::test]
    async fn partial_update_touches_only_given_fields() {
        let store = MemoryStore::new();
        let mut player = Player::new(UserId::new(1));
        player.spirit = 40.0;
        store.insert_player(player).await;

        store
            .update_player_fields(UserId::new(1), &PlayerUpdate::new().spirit_stones(25))
            .await
            .unwrap();

        let after = store.player(UserId::new(1)).await.unwrap();
        assert_eq!(after.spirit_stones, 25);
        assert!((after.spirit - 40.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn n_grants_produce_count_n() {
        let store = MemoryStore::new();
        let user = UserId::new(5);
        for _ in 0..4 {
            store.upsert_herb(user, "frost_lotus", "寒霜莲", 1).await.unwrap();
            store.upsert_fragment(user, "sun_moon_pill", 1).await.unwrap();
        }
        assert_eq!(store.herb(user, "frost_lotus").await.unwrap().count, 4);
        assert_eq!(store.fragment(user, "sun_moon_pill").await.unwrap().count, 4);
        assert!(store.herb(UserId::new(6), "frost_lotus").await.is_none());
    }

    #[tokio::test]
    async fn zero_delta_upsert_creates_empty_row() {
        let store = MemoryStore::new();
        let row = store
            .upsert_herb(UserId::new(1), "spirit_grass", "灵精草", 0)
            .await
            .unwrap();
        assert_eq!(row.count, 0);
        assert_eq!(store.herbs_of(UserId::new(1)).await.len(), 1);
    }

    #[tokio::test]
    async fn simulated_failures() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.upsert_fragment(UserId::new(1), "x", 1).await.is_err());
        store.set_fail_writes(false);
        assert!(store.upsert_fragment(UserId::new(1), "x", 1).await.is_ok());
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn write_budget_runs_out() {
        let store = MemoryStore::new();
        store.fail_after_writes(2);
        assert!(store.upsert_fragment(UserId::new(1), "x", 1).await.is_ok());
        assert!(store.upsert_fragment(UserId::new(1), "x", 1).await.is_ok());
        assert!(store.upsert_fragment(UserId::new(1), "x", 1).await.is_err());
        assert_eq!(store.fragment(UserId::new(1), "x").await.unwrap().count, 2);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn update_of_missing_player_is_not_a_write() {
        let store = MemoryStore::new();
        let err = store
            .update_player_fields(UserId::new(4), &PlayerUpdate::new().spirit(1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::PlayerNotFound(_)));
        assert!(store.credit_spirit_stones(UserId::new(4), 5).await.is_err());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn credit_adds_to_the_stored_balance() {
        let store = MemoryStore::new();
        let mut player = Player::new(UserId::new(2));
        player.spirit_stones = 30;
        store.insert_player(player).await;

        assert_eq!(store.credit_spirit_stones(UserId::new(2), 12).await.unwrap(), 42);
        assert_eq!(store.player(UserId::new(2)).await.unwrap().spirit_stones, 42);
    }
}
