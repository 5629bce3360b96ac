pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod quiz;
pub mod service;
pub mod validation;

pub use domain::{Category, NewQuestion, Question};
pub use error::{TriviaError, TriviaResult};
pub use pagination::{paginate, DEFAULT_PAGE, QUESTIONS_PER_PAGE};
pub use ports::{PortError, PortResult, TriviaRepository};
pub use quiz::{pick_next_question, QuizCategory, QuizError};
pub use service::{CategoryQuestions, QuestionPage, QuizDraw, QuizRequest, SearchResults, TriviaService};
pub use validation::{QuestionDraft, RawField, ValidationError};
