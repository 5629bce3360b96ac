//! crates/trivia_core/src/ports.rs
//!
//! Defines the storage contract for the application's core logic.
//! The trait forms the boundary of the hexagonal architecture, keeping the
//! core independent of the database that backs it.

use crate::domain::{Category, NewQuestion, Question};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the storage backend.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Storage Port (Trait)
//=========================================================================================

/// Read and write access to categories and questions.
///
/// Every listing is ordered by id so that pagination is stable.
#[async_trait]
pub trait TriviaRepository: Send + Sync {
    // --- Categories ---
    async fn list_categories(&self) -> PortResult<Vec<Category>>;

    /// Fails with `PortError::NotFound` when no category has this id.
    async fn get_category(&self, category_id: i64) -> PortResult<Category>;

    // --- Questions ---
    async fn list_questions(&self) -> PortResult<Vec<Question>>;

    async fn list_questions_by_category(&self, category_id: i64) -> PortResult<Vec<Question>>;

    /// Case-insensitive literal substring match over the question text.
    ///
    /// Case folding agrees across stores for ASCII only: the in-memory store folds
    /// with Unicode lowercasing, PostgreSQL `ILIKE` with the database collation.
    async fn search_questions(&self, term: &str) -> PortResult<Vec<Question>>;

    async fn get_question(&self, question_id: i64) -> PortResult<Question>;

    async fn insert_question(&self, question: NewQuestion) -> PortResult<Question>;

    /// Fails with `PortError::NotFound` when no question has this id.
    async fn delete_question(&self, question_id: i64) -> PortResult<()>;
}
