//! Axum router construction for the player API.
//!
//! Assembles the exploration routes into a single [`Router`] with CORS
//! and request tracing enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use xiuxian_core::ExplorationStore;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// - `POST /api/exploration/start`
/// - `POST /api/exploration/event-choice`
/// - `GET /api/exploration/catalogue`
///
/// CORS allows any origin for development. In production this should be
/// restricted.
pub fn build_router<S: ExplorationStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/exploration/start",
            post(handlers::start_exploration::<S>),
        )
        .route(
            "/api/exploration/event-choice",
            post(handlers::event_choice::<S>),
        )
        .route(
            "/api/exploration/catalogue",
            get(handlers::catalogue::<S>),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
