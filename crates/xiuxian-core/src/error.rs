//! Error types for the exploration core.
//!
//! [`StoreError`] is what a persistence backend reports across the
//! [`PlayerStore`]/[`InventoryStore`] boundary. [`ExplorationError`] is the
//! single error each public operation returns, wrapped with a short
//! context string.
//!
//! [`PlayerStore`]: crate::store::PlayerStore
//! [`InventoryStore`]: crate::store::InventoryStore

use xiuxian_types::UserId;

/// Boxed backend error carried through the store boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors reported by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No player row exists for the id.
    #[error("player {0} not found")]
    PlayerNotFound(UserId),

    /// The backend failed (connection, query, decode).
    #[error("store backend error: {0}")]
    Backend(#[source] BoxError),
}

impl StoreError {
    /// Wrap any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Errors returned by [`ExplorationService`](crate::service::ExplorationService).
#[derive(Debug, thiserror::Error)]
pub enum ExplorationError {
    /// The player record could not be loaded.
    #[error("failed to load player {user_id}: {source}")]
    PlayerLoad {
        /// The player that was requested.
        user_id: UserId,
        /// The underlying store error.
        #[source]
        source: StoreError,
    },

    /// A write failed. Writes already flushed are not rolled back.
    #[error("failed to persist {context}: {source}")]
    Persist {
        /// Which write failed.
        context: &'static str,
        /// The underlying store error.
        #[source]
        source: StoreError,
    },

    /// `HandleEventChoice` was called with an event type it does not know.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),
}

impl ExplorationError {
    /// Build a [`Persist`](Self::Persist) error mapper for use with `map_err`.
    pub fn persist(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Persist { context, source }
    }
}
