//! services/api/src/web/envelope.rs
//!
//! Renders `TriviaError` as the JSON error envelope every endpoint shares:
//! `{"success": false, "error": <status>, "message": <text>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::any::Any;
use tracing::{error, warn};
use trivia_core::error::TriviaError;
use utoipa::ToSchema;

/// The body of every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

/// A handler failure, ready to be sent to the client.
#[derive(Debug)]
pub struct ErrorResponse(pub TriviaError);

impl From<TriviaError> for ErrorResponse {
    fn from(error: TriviaError) -> Self {
        Self(error)
    }
}

/// The status code and client-facing message for each failure category.
pub fn status_and_message(error: &TriviaError) -> (StatusCode, &'static str) {
    match error {
        TriviaError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request."),
        TriviaError::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found."),
        TriviaError::Unprocessable(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable entity.")
        }
        TriviaError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error. Please try again later.",
        ),
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let (status, message) = status_and_message(&self.0);
        match &self.0 {
            TriviaError::Internal(_) => error!("Request failed: {}", self.0),
            _ => warn!("Request failed: {}", self.0),
        }

        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Used by `CatchPanicLayer`; a panicking handler becomes a 500 envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ErrorResponse(TriviaError::Internal(detail)).into_response()
}

/// Fallback for unknown routes.
pub async fn route_not_found() -> ErrorResponse {
    ErrorResponse(TriviaError::NotFound("no such route".to_string()))
}
