//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;
use trivia_core::ports::TriviaRepository;
use trivia_core::service::TriviaService;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub trivia: TriviaService,
}

impl AppState {
    pub fn new(repo: Arc<dyn TriviaRepository>) -> Self {
        Self {
            trivia: TriviaService::new(repo),
        }
    }
}
