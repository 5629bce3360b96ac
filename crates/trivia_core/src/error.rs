//! crates/trivia_core/src/error.rs
//!
//! The failure taxonomy every endpoint reports through.

use crate::ports::PortError;
use crate::validation::ValidationError;

/// A request outcome that is not a success.
///
/// Each variant carries a detail string for logs. Clients only ever see the
/// category of the failure.
#[derive(Debug, thiserror::Error)]
pub enum TriviaError {
    /// The request payload does not have the expected shape.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested resource, or any result at all, does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request is well formed but could not be carried out.
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// A failure outside of request handling, such as a panicking handler.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TriviaResult<T> = Result<T, TriviaError>;

// Store failures inside a handler all collapse to `Unprocessable`, including
// `PortError::NotFound`: deleting a missing question is a 422, not a 404.
impl From<PortError> for TriviaError {
    fn from(error: PortError) -> Self {
        TriviaError::Unprocessable(error.to_string())
    }
}

impl From<ValidationError> for TriviaError {
    fn from(error: ValidationError) -> Self {
        TriviaError::Unprocessable(error.to_string())
    }
}
