//! Herb and pill recipe page rows.
//!
//! Grants are single-statement upserts: the row is created on first grant
//! and incremented afterwards, atomically, and the post-write row is
//! returned.

use sqlx::PgPool;
use xiuxian_types::{HerbInstance, PillFragment, UserId};

use crate::error::DbError;
use crate::player_store::db_id;

/// Operations on the `herbs` and `pill_fragments` tables.
pub struct InventoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> InventoryRepo<'a> {
    /// Create a new inventory store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add `delta` to a herb row, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the upsert fails.
    pub async fn upsert_herb(
        &self,
        user_id: UserId,
        herb_id: &str,
        name: &str,
        delta: i64,
    ) -> Result<HerbInstance, DbError> {
        let row = sqlx::query_as::<_, HerbRow>(
            r"INSERT INTO herbs (user_id, herb_id, name, count)
              VALUES ($1, $2, $3, $4)
              ON CONFLICT (user_id, herb_id)
              DO UPDATE SET count = herbs.count + EXCLUDED.count
              RETURNING user_id, herb_id, name, count",
        )
        .bind(db_id(user_id)?)
        .bind(herb_id)
        .bind(name)
        .bind(delta)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(user_id = %user_id, herb_id, count = row.count, "Upserted herb");
        Ok(row.into_instance(user_id))
    }

    /// Add `delta` to a recipe page row, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the upsert fails.
    pub async fn upsert_fragment(
        &self,
        user_id: UserId,
        recipe_id: &str,
        delta: i64,
    ) -> Result<PillFragment, DbError> {
        let row = sqlx::query_as::<_, FragmentRow>(
            r"INSERT INTO pill_fragments (user_id, recipe_id, count)
              VALUES ($1, $2, $3)
              ON CONFLICT (user_id, recipe_id)
              DO UPDATE SET count = pill_fragments.count + EXCLUDED.count
              RETURNING user_id, recipe_id, count",
        )
        .bind(db_id(user_id)?)
        .bind(recipe_id)
        .bind(delta)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(user_id = %user_id, recipe_id, count = row.count, "Upserted recipe page");
        Ok(row.into_fragment(user_id))
    }

    /// All herb rows for a player, by herb id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn herbs_of(&self, user_id: UserId) -> Result<Vec<HerbInstance>, DbError> {
        let rows = sqlx::query_as::<_, HerbRow>(
            r"SELECT user_id, herb_id, name, count
              FROM herbs
              WHERE user_id = $1
              ORDER BY herb_id",
        )
        .bind(db_id(user_id)?)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_instance(user_id)).collect())
    }

    /// All recipe page rows for a player, by recipe id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fragments_of(&self, user_id: UserId) -> Result<Vec<PillFragment>, DbError> {
        let rows = sqlx::query_as::<_, FragmentRow>(
            r"SELECT user_id, recipe_id, count
              FROM pill_fragments
              WHERE user_id = $1
              ORDER BY recipe_id",
        )
        .bind(db_id(user_id)?)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_fragment(user_id)).collect())
    }
}

/// A row from the `herbs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HerbRow {
    /// Owner.
    pub user_id: i64,
    /// Catalogue id.
    pub herb_id: String,
    /// Display name at grant time.
    pub name: String,
    /// Units held.
    pub count: i64,
}

impl HerbRow {
    fn into_instance(self, user_id: UserId) -> HerbInstance {
        HerbInstance {
            user_id,
            herb_id: self.herb_id,
            name: self.name,
            count: self.count,
        }
    }
}

/// A row from the `pill_fragments` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FragmentRow {
    /// Owner.
    pub user_id: i64,
    /// Catalogue id.
    pub recipe_id: String,
    /// Pages held.
    pub count: i64,
}

impl FragmentRow {
    fn into_fragment(self, user_id: UserId) -> PillFragment {
        PillFragment {
            user_id,
            recipe_id: self.recipe_id,
            count: self.count,
        }
    }
}
