//! Request authentication.
//!
//! A request is authenticated when either an upstream layer has already
//! inserted a [`UserId`] into the request extensions, or its
//! `Authorization: Bearer <token>` header names a token in the session
//! table. Anything else is a 401.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use xiuxian_core::ExplorationStore;
use xiuxian_types::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

impl<S> FromRequestParts<Arc<AppState<S>>> for AuthUser
where
    S: ExplorationStore + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<UserId>() {
            return Ok(Self(*id));
        }

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(ApiError::Unauthorized)?;

        state
            .sessions
            .get(token)
            .copied()
            .map(Self)
            .ok_or(ApiError::Unauthorized)
    }
}

/// The token of a `Bearer` authorization value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
