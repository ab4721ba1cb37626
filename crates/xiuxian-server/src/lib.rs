//! Player API server for the Xiuxian exploration service.
//!
//! An Axum HTTP adapter over [`xiuxian_core::ExplorationService`]:
//!
//! - **`POST /api/exploration/start`** runs an exploration and returns its
//!   events and log
//! - **`POST /api/exploration/event-choice`** answers an event's choice
//! - **`GET /api/exploration/catalogue`** lists herbs, quality tiers, and
//!   recipes
//!
//! Every route requires an authenticated player; see [`auth`].

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use auth::AuthUser;
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
