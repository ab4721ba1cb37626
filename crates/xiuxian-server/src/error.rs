//! Error types for the player API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! | variant | status | body |
//! |---|---|---|
//! | `Unauthorized` | 401 | `{message: "用户未授权"}` |
//! | `BadRequest` | 400 | `{success: false, error}` |
//! | `Start` | 400 | `{success: false, error}` |
//! | `Choice` | 500 | `{success: false, error}` |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use xiuxian_core::ExplorationError;

/// Message returned with every 401.
pub const UNAUTHORIZED_MESSAGE: &str = "用户未授权";

/// Errors that can occur in the player API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No authenticated user on the request.
    #[error("unauthorized")]
    Unauthorized,

    /// The request body was malformed or failed validation.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// `StartExploration` failed.
    #[error("{0}")]
    Start(#[source] ExplorationError),

    /// `HandleEventChoice` failed.
    #[error("{0}")]
    Choice(#[source] ExplorationError),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::BadRequest(errors.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(format!("malformed JSON: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthorized => {
                let body = serde_json::json!({ "message": UNAUTHORIZED_MESSAGE });
                return (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response();
            }
            Self::BadRequest(_) | Self::Start(_) => StatusCode::BAD_REQUEST,
            Self::Choice(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
