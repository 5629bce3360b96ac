//! crates/trivia_core/src/service.rs
//!
//! The logic behind every endpoint: validate, call the store, paginate or draw,
//! and report typed failures. HTTP concerns live in the `api` service.

use crate::domain::{Category, Question};
use crate::error::{TriviaError, TriviaResult};
use crate::pagination::paginate;
use crate::ports::TriviaRepository;
use crate::quiz::{pick_next_question, QuizCategory, QuizError};
use crate::validation::QuestionDraft;
use std::collections::HashSet;
use std::sync::Arc;

/// One page of the full question listing.
#[derive(Debug, Clone)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: Vec<Category>,
}

/// One page of the questions in a single category.
#[derive(Debug, Clone)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Category,
}

/// One page of search matches. `total_questions` counts every match.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Clone)]
pub struct QuizRequest {
    pub previous_questions: HashSet<i64>,
    pub category: QuizCategory,
}

/// The outcome of asking for the next quiz question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizDraw {
    Next(Question),
    /// Every question in the quiz category has been asked.
    Finished,
}

#[derive(Clone)]
pub struct TriviaService {
    repo: Arc<dyn TriviaRepository>,
}

impl TriviaService {
    pub fn new(repo: Arc<dyn TriviaRepository>) -> Self {
        Self { repo }
    }

    /// All categories. An empty store is a `NotFound`.
    pub async fn categories(&self) -> TriviaResult<Vec<Category>> {
        let categories = self.repo.list_categories().await?;
        if categories.is_empty() {
            return Err(TriviaError::NotFound("no categories exist".to_string()));
        }
        Ok(categories)
    }

    /// A page of all questions, with the category map the client renders beside it.
    ///
    /// A page past the end is empty, but an empty store is a `NotFound`.
    pub async fn questions(&self, page: i64) -> TriviaResult<QuestionPage> {
        let all = self.repo.list_questions().await?;
        if all.is_empty() {
            return Err(TriviaError::NotFound("no questions exist".to_string()));
        }
        let categories = self.repo.list_categories().await?;

        Ok(QuestionPage {
            questions: paginate(&all, page).to_vec(),
            total_questions: all.len(),
            categories,
        })
    }

    /// Deletes a question and returns it. A missing id is `Unprocessable`.
    pub async fn delete_question(&self, question_id: i64) -> TriviaResult<Question> {
        let question = self.repo.get_question(question_id).await?;
        self.repo.delete_question(question_id).await?;
        Ok(question)
    }

    pub async fn create_question(&self, draft: QuestionDraft) -> TriviaResult<Question> {
        let new_question = draft.validate()?;
        let question = self.repo.insert_question(new_question).await?;
        Ok(question)
    }

    pub async fn search_questions(&self, term: &str, page: i64) -> TriviaResult<SearchResults> {
        let matches = self.repo.search_questions(term).await?;
        if matches.is_empty() {
            return Err(TriviaError::NotFound(format!(
                "no question matches `{term}`"
            )));
        }

        Ok(SearchResults {
            questions: paginate(&matches, page).to_vec(),
            total_questions: matches.len(),
        })
    }

    /// A page of one category's questions. An unknown category is `Unprocessable`.
    pub async fn questions_in_category(
        &self,
        category_id: i64,
        page: i64,
    ) -> TriviaResult<CategoryQuestions> {
        let current_category = self.repo.get_category(category_id).await?;
        let questions = self.repo.list_questions_by_category(category_id).await?;

        Ok(CategoryQuestions {
            questions: paginate(&questions, page).to_vec(),
            total_questions: questions.len(),
            current_category,
        })
    }

    /// Draws a question not yet asked in this quiz.
    ///
    /// A category without any question is a `BadRequest`; running out of
    /// questions is the `Finished` draw.
    pub async fn next_quiz_question(&self, request: QuizRequest) -> TriviaResult<QuizDraw> {
        let candidates = match request.category {
            QuizCategory::Any => self.repo.list_questions().await?,
            QuizCategory::Only(id) => self.repo.list_questions_by_category(id).await?,
        };

        let mut rng = rand::thread_rng();
        match pick_next_question(
            &candidates,
            request.category,
            &request.previous_questions,
            &mut rng,
        ) {
            Ok(question) => Ok(QuizDraw::Next(question.clone())),
            Err(QuizError::Exhausted) => Ok(QuizDraw::Finished),
            Err(e @ QuizError::NoCandidates) => Err(TriviaError::BadRequest(e.to_string())),
        }
    }
}
