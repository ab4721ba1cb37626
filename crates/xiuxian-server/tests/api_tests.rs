//! Integration tests for the player API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server, backed by the in-memory store.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use xiuxian_core::config::ExplorationConfig;
use xiuxian_core::{ExplorationService, MemoryStore};
use xiuxian_server::AppState;
use xiuxian_server::router::build_router;
use xiuxian_types::{Player, UserId};

const TOKEN: &str = "test-token";
const USER: UserId = UserId(7);

async fn make_test_state() -> Arc<AppState<MemoryStore>> {
    let store = MemoryStore::new();
    let mut player = Player::new(USER);
    player.spirit_stones = 100;
    store.insert_player(player).await;

    let service = ExplorationService::new(Arc::new(store), ExplorationConfig::default());
    let sessions = BTreeMap::from([(TOKEN.to_owned(), USER)]);
    Arc::new(AppState::new(service).with_sessions(sessions))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

// =========================================================================
// Authentication
// =========================================================================

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let router = build_router(make_test_state().await);

    let response = router
        .oneshot(
            Request::post("/api/exploration/start")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["message"], "用户未授权");
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let router = build_router(make_test_state().await);

    let response = router
        .oneshot(
            Request::get("/api/exploration/catalogue")
                .header("authorization", "Bearer nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upstream_user_extension_is_trusted() {
    let router = build_router(make_test_state().await);

    let mut request = Request::get("/api/exploration/catalogue")
        .body(Body::empty())
        .unwrap();
    request.extensions_mut().insert(USER);
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// =========================================================================
// POST /api/exploration/start
// =========================================================================

#[tokio::test]
async fn test_start_with_empty_body() {
    let state = make_test_state().await;
    let router = build_router(Arc::clone(&state));

    let response = router
        .oneshot(post("/api/exploration/start", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert!(json["events"].is_array());
    assert!(json["log"].as_str().unwrap().ends_with('\n'));

    // The participation reward always lands.
    let player = state.service.store().player(USER).await.unwrap();
    assert!(player.spirit_stones >= 110);
}

#[tokio::test]
async fn test_start_with_duration() {
    let router = build_router(make_test_state().await);

    let response = router
        .oneshot(post("/api/exploration/start", r#"{"duration": 5000}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let events = json["events"].as_array().unwrap();
    assert!(events.len() <= 5);
    for event in events {
        assert!(event["description"].as_str().unwrap().starts_with('['));
        assert!(!event["choices"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_start_over_limit_is_bad_request() {
    let router = build_router(make_test_state().await);

    let response = router
        .oneshot(post("/api/exploration/start", r#"{"duration": 120000}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("120000"));
}

#[tokio::test]
async fn test_start_malformed_body_is_bad_request() {
    let router = build_router(make_test_state().await);

    let response = router
        .oneshot(post("/api/exploration/start", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_start_for_missing_player_is_bad_request() {
    let store = MemoryStore::new();
    let service = ExplorationService::new(Arc::new(store), ExplorationConfig::default());
    let sessions = BTreeMap::from([(TOKEN.to_owned(), UserId::new(999))]);
    let router = build_router(Arc::new(AppState::new(service).with_sessions(sessions)));

    let response = router
        .oneshot(post("/api/exploration/start", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("999"));
}

// =========================================================================
// POST /api/exploration/event-choice
// =========================================================================

#[tokio::test]
async fn test_item_choice() {
    let router = build_router(make_test_state().await);

    let response = router
        .oneshot(post(
            "/api/exploration/event-choice",
            r#"{"eventType": "item_found", "choice": "continue"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["rewards"]["type"], "item");
    assert_eq!(json["rewards"]["message"], "获得了物品");
}

#[tokio::test]
async fn test_herb_choice_creates_row() {
    let state = make_test_state().await;
    let router = build_router(Arc::clone(&state));

    let response = router
        .oneshot(post(
            "/api/exploration/event-choice",
            r#"{"eventType": "herb_found", "choice": "collect"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["rewards"]["type"], "herb");
    let row = state.service.store().herb(USER, "spirit_grass").await;
    assert_eq!(row.map(|h| h.count), Some(0));
}

#[tokio::test]
async fn test_battle_flee_grants_nothing() {
    let router = build_router(make_test_state().await);

    let response = router
        .oneshot(post(
            "/api/exploration/event-choice",
            r#"{"eventType": "battle_encounter", "choice": "flee"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["rewards"]["type"], "battle");
    assert!(json["rewards"].get("reward").is_none());
}

#[tokio::test]
async fn test_battle_fight_reward_in_range() {
    let state = make_test_state().await;
    let router = build_router(Arc::clone(&state));

    let response = router
        .oneshot(post(
            "/api/exploration/event-choice",
            r#"{"eventType": "battle_encounter", "choice": "fight"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let stones = state.service.store().player(USER).await.unwrap().spirit_stones;
    match json["rewards"]["reward"].as_i64() {
        Some(reward) => {
            assert!((50..=100).contains(&reward));
            assert_eq!(stones, 100 + reward);
        }
        None => assert_eq!(stones, 100),
    }
}

#[tokio::test]
async fn test_unknown_event_type_is_server_error() {
    let router = build_router(make_test_state().await);

    let response = router
        .oneshot(post(
            "/api/exploration/event-choice",
            r#"{"eventType": "nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "unknown event type: nope");
}

#[tokio::test]
async fn test_malformed_choice_is_bad_request() {
    let router = build_router(make_test_state().await);

    let response = router
        .oneshot(post("/api/exploration/event-choice", r#"{"choice": 3}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =========================================================================
// GET /api/exploration/catalogue
// =========================================================================

#[tokio::test]
async fn test_catalogue_lists_stable_ids() {
    let router = build_router(make_test_state().await);

    let response = router
        .oneshot(
            Request::get("/api/exploration/catalogue")
                .header("authorization", format!("Bearer {TOKEN}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["herbs"].as_array().unwrap().len(), 15);
    assert_eq!(json["herbs"][0]["id"], "spirit_grass");
    assert_eq!(json["qualities"].as_array().unwrap().len(), 5);
    assert_eq!(json["recipes"].as_array().unwrap().len(), 12);
    let grades: Vec<&str> = json["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["grade"].as_str())
        .collect();
    assert!(grades.contains(&"grade5"));
}
