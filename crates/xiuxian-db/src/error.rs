//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] errors. Across the store boundary they travel as
//! [`StoreError::Backend`], except a missing player row, which becomes
//! [`StoreError::PlayerNotFound`].

use xiuxian_core::StoreError;
use xiuxian_types::UserId;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// No `players` row for the id.
    #[error("player {0} not found")]
    PlayerNotFound(UserId),

    /// A value does not fit the column it maps to.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Column or field name.
        field: &'static str,
        /// The offending value.
        value: String,
        /// The failed conversion.
        #[source]
        source: std::num::TryFromIntError,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    pub(crate) fn out_of_range(
        field: &'static str,
        value: impl ToString,
        source: std::num::TryFromIntError,
    ) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_string(),
            source,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::PlayerNotFound(id) => Self::PlayerNotFound(id),
            other => Self::backend(other),
        }
    }
}
