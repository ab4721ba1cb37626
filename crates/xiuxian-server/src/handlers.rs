//! Exploration endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/exploration/start` | Run an exploration |
//! | `POST` | `/api/exploration/event-choice` | Answer an event's choice |
//! | `GET` | `/api/exploration/catalogue` | Herbs, quality tiers, recipes |
//!
//! Bodies are read as raw bytes and decoded here, so an empty start body
//! is accepted and every malformed body gets the same 400 shape.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;
use xiuxian_core::ExplorationStore;
use xiuxian_core::catalogue::QUALITY_TIERS;
use xiuxian_types::{
    ChoiceRewards, ChoiceValue, ExplorationEvent, HerbConfig, PillRecipe, QualityTier,
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Hard ceiling on a requested duration: one hour.
pub const DURATION_CEILING_MS: u64 = 3_600_000;

// ---------------------------------------------------------------------------
// Request and response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/exploration/start`. May be omitted entirely.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct StartRequest {
    /// Exploration length in milliseconds.
    #[validate(range(min = 1, max = DURATION_CEILING_MS))]
    pub duration: Option<u64>,
}

/// Response of `POST /api/exploration/start`.
#[derive(Debug, Serialize)]
pub struct StartResponse {
    /// Always `true`.
    pub success: bool,
    /// Events in the order they fired.
    pub events: Vec<ExplorationEvent>,
    /// One line per event.
    pub log: String,
}

/// Body of `POST /api/exploration/event-choice`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceRequest {
    /// Wire name of the event being answered.
    #[validate(length(min = 1, max = 64))]
    pub event_type: String,
    /// The chosen option. Absent means "continue".
    #[serde(default)]
    pub choice: Option<ChoiceValue>,
}

/// Response of `POST /api/exploration/event-choice`.
#[derive(Debug, Serialize)]
pub struct ChoiceResponse {
    /// Always `true`.
    pub success: bool,
    /// What the choice produced.
    pub rewards: ChoiceRewards,
}

/// Response of `GET /api/exploration/catalogue`.
#[derive(Debug, Serialize)]
pub struct CatalogueResponse {
    /// Always `true`.
    pub success: bool,
    /// Every herb.
    pub herbs: &'static [HerbConfig],
    /// Quality tiers, coarse to fine.
    pub qualities: &'static [QualityTier],
    /// Every pill recipe.
    pub recipes: &'static [PillRecipe],
}

// ---------------------------------------------------------------------------
// POST /api/exploration/start
// ---------------------------------------------------------------------------

/// Run one exploration for the authenticated player.
pub async fn start_exploration<S: ExplorationStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
    body: Bytes,
) -> Result<Json<StartResponse>, ApiError> {
    let request = decode_start(&body)?;
    request.validate()?;

    let config = state.exploration();
    let duration = request.duration.unwrap_or(config.default_duration_ms);
    if duration > config.max_duration_ms {
        return Err(ApiError::BadRequest(format!(
            "duration {duration}ms exceeds the {}ms limit",
            config.max_duration_ms
        )));
    }

    let report = state
        .service
        .start_exploration(user_id, duration)
        .await
        .map_err(ApiError::Start)?;

    Ok(Json(StartResponse {
        success: true,
        events: report.events,
        log: report.log,
    }))
}

fn decode_start(body: &[u8]) -> Result<StartRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StartRequest::default());
    }
    Ok(serde_json::from_slice(body)?)
}

// ---------------------------------------------------------------------------
// POST /api/exploration/event-choice
// ---------------------------------------------------------------------------

/// Answer the choice offered with an event.
pub async fn event_choice<S: ExplorationStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
    body: Bytes,
) -> Result<Json<ChoiceResponse>, ApiError> {
    let request: ChoiceRequest = serde_json::from_slice(&body)?;
    request.validate()?;

    let rewards = state
        .service
        .handle_event_choice(user_id, &request.event_type, request.choice)
        .await
        .map_err(ApiError::Choice)?;

    Ok(Json(ChoiceResponse {
        success: true,
        rewards,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/exploration/catalogue
// ---------------------------------------------------------------------------

/// The static catalogues the client renders ids from.
pub async fn catalogue<S: ExplorationStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(_): AuthUser,
) -> Json<CatalogueResponse> {
    let catalogue = state.service.engine().catalogue();
    Json(CatalogueResponse {
        success: true,
        herbs: catalogue.herbs,
        qualities: &QUALITY_TIERS,
        recipes: catalogue.recipes,
    })
}
