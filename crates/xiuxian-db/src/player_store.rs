//! Player rows.
//!
//! Partial updates write only the columns present in a [`PlayerUpdate`];
//! each update is a single statement, so it is atomic for the row.

use sqlx::{PgPool, Postgres, QueryBuilder};
use xiuxian_core::attributes;
use xiuxian_types::{Player, PlayerUpdate, UserId};

use crate::error::DbError;

/// Operations on the `players` table.
pub struct PlayerRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepo<'a> {
    /// Create a new player store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load a player by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::PlayerNotFound`] if no row exists.
    pub async fn load(&self, id: UserId) -> Result<Player, DbError> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r"SELECT id, level, cultivation, spirit, spirit_stones, base_attributes
              FROM players
              WHERE id = $1",
        )
        .bind(db_id(id)?)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(DbError::PlayerNotFound(id))?.into_player()
    }

    /// Write the `Some` fields of `update`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::PlayerNotFound`] if no row was updated.
    pub async fn update_fields(&self, id: UserId, update: &PlayerUpdate) -> Result<(), DbError> {
        let Some(mut query) = update_query(db_id(id)?, update) else {
            return Ok(());
        };

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::PlayerNotFound(id));
        }
        tracing::debug!(user_id = %id, "Updated player fields");
        Ok(())
    }

    /// Add `amount` to the spirit stone balance and return the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::PlayerNotFound`] if no row exists.
    pub async fn credit_spirit_stones(&self, id: UserId, amount: i64) -> Result<i64, DbError> {
        let balance: Option<i64> = sqlx::query_scalar(
            r"UPDATE players
              SET spirit_stones = spirit_stones + $1
              WHERE id = $2
              RETURNING spirit_stones",
        )
        .bind(amount)
        .bind(db_id(id)?)
        .fetch_optional(self.pool)
        .await?;

        let balance = balance.ok_or(DbError::PlayerNotFound(id))?;
        tracing::debug!(user_id = %id, amount, balance, "Credited spirit stones");
        Ok(balance)
    }

    /// Insert a player, replacing any existing row with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn insert(&self, player: &Player) -> Result<(), DbError> {
        let level = i32::try_from(player.level)
            .map_err(|e| DbError::out_of_range("level", player.level, e))?;

        sqlx::query(
            r"INSERT INTO players (id, level, cultivation, spirit, spirit_stones, base_attributes)
              VALUES ($1, $2, $3, $4, $5, $6)
              ON CONFLICT (id) DO UPDATE SET
                level = EXCLUDED.level,
                cultivation = EXCLUDED.cultivation,
                spirit = EXCLUDED.spirit,
                spirit_stones = EXCLUDED.spirit_stones,
                base_attributes = EXCLUDED.base_attributes",
        )
        .bind(db_id(player.id)?)
        .bind(level)
        .bind(player.cultivation)
        .bind(player.spirit)
        .bind(player.spirit_stones)
        .bind(attributes::encode(&player.attributes))
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

/// Build the `UPDATE` for the present fields, or `None` when there are none.
fn update_query(id: i64, update: &PlayerUpdate) -> Option<QueryBuilder<'static, Postgres>> {
    if update.is_empty() {
        return None;
    }

    let mut query = QueryBuilder::<Postgres>::new("UPDATE players SET ");
    {
        let mut set = query.separated(", ");
        if let Some(cultivation) = update.cultivation {
            set.push("cultivation = ").push_bind_unseparated(cultivation);
        }
        if let Some(spirit) = update.spirit {
            set.push("spirit = ").push_bind_unseparated(spirit);
        }
        if let Some(stones) = update.spirit_stones {
            set.push("spirit_stones = ").push_bind_unseparated(stones);
        }
        if let Some(attrs) = &update.attributes {
            set.push("base_attributes = ")
                .push_bind_unseparated(attributes::encode(attrs));
        }
    }
    query.push(" WHERE id = ").push_bind(id);
    Some(query)
}

/// `UserId` as the `BIGINT` key.
pub(crate) fn db_id(id: UserId) -> Result<i64, DbError> {
    i64::try_from(id.into_inner()).map_err(|e| DbError::out_of_range("user id", id, e))
}

/// A row from the `players` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlayerRow {
    /// Player id.
    pub id: i64,
    /// Realm level.
    pub level: i32,
    /// Cultivation progress.
    pub cultivation: f64,
    /// Spirit energy.
    pub spirit: f64,
    /// Spirit stone balance.
    pub spirit_stones: i64,
    /// Attribute blob; `NULL` reads as defaults.
    pub base_attributes: Option<serde_json::Value>,
}

impl PlayerRow {
    /// Convert to the domain type.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::OutOfRange`] for a negative id or level.
    pub fn into_player(self) -> Result<Player, DbError> {
        let id = u64::try_from(self.id).map_err(|e| DbError::out_of_range("id", self.id, e))?;
        let level =
            u32::try_from(self.level).map_err(|e| DbError::out_of_range("level", self.level, e))?;
        Ok(Player {
            id: UserId::new(id),
            level,
            cultivation: self.cultivation,
            spirit: self.spirit,
            spirit_stones: self.spirit_stones,
            attributes: attributes::decode(self.base_attributes.as_ref()),
        })
    }
}
