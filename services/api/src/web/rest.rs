//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::deserializers::{default_page, deserialize_page, LooseField};
use crate::web::envelope::{ErrorBody, ErrorResponse};
use crate::web::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::info;
use trivia_core::domain::{Category, Question};
use trivia_core::error::TriviaError;
use trivia_core::quiz::QuizCategory;
use trivia_core::service::{QuizDraw, QuizRequest};
use trivia_core::validation::{QuestionDraft, RawField};
use utoipa::{IntoParams, OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_categories,
        get_questions,
        delete_question,
        create_question,
        search_questions,
        get_questions_by_category,
        play_quiz,
    ),
    components(
        schemas(
            QuestionDto,
            CategoriesResponse,
            QuestionsResponse,
            DeleteQuestionResponse,
            CreateQuestionRequest,
            CreateQuestionResponse,
            SearchRequest,
            SearchResponse,
            CategoryQuestionsResponse,
            QuizPayload,
            QuizCategoryPayload,
            QuizResponse,
            LooseField,
            ErrorBody,
        )
    ),
    tags(
        (name = "Trivia API", description = "Categories, questions and quiz play for the trivia game.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// A question as the client renders it.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionDto {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

impl From<Question> for QuestionDto {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

fn to_dtos(questions: Vec<Question>) -> Vec<QuestionDto> {
    questions.into_iter().map(QuestionDto::from).collect()
}

// serialized as {"1": "Science", ...}
fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number; anything unreadable means page 1.
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    #[param(value_type = Option<i64>)]
    pub page: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    /// Category labels keyed by category id.
    pub categories: BTreeMap<i64, String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionDto>,
    pub total_questions: usize,
    pub categories: BTreeMap<i64, String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteQuestionResponse {
    pub success: bool,
    pub message: String,
    pub deleted: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<LooseField>,
    pub category: Option<LooseField>,
}

impl From<CreateQuestionRequest> for QuestionDraft {
    fn from(req: CreateQuestionRequest) -> Self {
        QuestionDraft {
            question: req.question,
            answer: req.answer,
            difficulty: req.difficulty.map(RawField::from),
            category: req.category.map(RawField::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateQuestionResponse {
    pub success: bool,
    pub message: String,
    pub created: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<QuestionDto>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionDto>,
    pub total_questions: usize,
    pub current_category: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizPayload {
    /// Ids of the questions already asked in this quiz.
    pub previous_questions: Vec<i64>,
    pub quiz_category: QuizCategoryPayload,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizCategoryPayload {
    /// `0` draws from every category.
    pub id: LooseField,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuizResponse {
    pub success: bool,
    /// `null` once every question of the category has been asked.
    pub question: Option<QuestionDto>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List every category.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = CategoriesResponse),
        (status = 404, description = "No categories exist", body = ErrorBody)
    )
)]
pub async fn get_categories(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ErrorResponse> {
    let categories = app_state.trivia.categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(categories),
    }))
}

/// List one page of questions, ten per page.
#[utoipa::path(
    get,
    path = "/questions",
    params(PageQuery),
    responses(
        (status = 200, description = "A page of questions", body = QuestionsResponse),
        (status = 404, description = "No questions exist", body = ErrorBody)
    )
)]
pub async fn get_questions(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuestionsResponse>, ErrorResponse> {
    let page = app_state.trivia.questions(query.page).await?;
    Ok(Json(QuestionsResponse {
        success: true,
        questions: to_dtos(page.questions),
        total_questions: page.total_questions,
        categories: category_map(page.categories),
    }))
}

/// Delete a question by id.
#[utoipa::path(
    delete,
    path = "/questions/{id}",
    params(("id" = i64, Path, description = "The question to delete.")),
    responses(
        (status = 200, description = "Question deleted", body = DeleteQuestionResponse),
        (status = 422, description = "No such question", body = ErrorBody)
    )
)]
pub async fn delete_question(
    State(app_state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteQuestionResponse>, ErrorResponse> {
    let Path(question_id) = id.map_err(|e| TriviaError::NotFound(e.body_text()))?;

    let deleted = app_state.trivia.delete_question(question_id).await?;
    info!("Deleted question {} from category {}", deleted.id, deleted.category);

    Ok(Json(DeleteQuestionResponse {
        success: true,
        message: "Question successfully deleted.".to_string(),
        deleted: deleted.id,
    }))
}

/// Create a question.
///
/// `difficulty` and `category` may be integers or numeric strings.
#[utoipa::path(
    post,
    path = "/questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = CreateQuestionResponse),
        (status = 422, description = "A field is missing or empty", body = ErrorBody)
    )
)]
pub async fn create_question(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = payload.map_err(|e| TriviaError::Unprocessable(e.body_text()))?;

    let question = app_state.trivia.create_question(request.into()).await?;
    info!("Created question {} in category {}", question.id, question.category);

    Ok((
        StatusCode::CREATED,
        Json(CreateQuestionResponse {
            success: true,
            message: "Question successfully created!".to_string(),
            created: question.id,
        }),
    ))
}

/// Search question texts, case-insensitively.
#[utoipa::path(
    post,
    path = "/questions/search",
    params(PageQuery),
    request_body = SearchRequest,
    responses(
        (status = 200, description = "A page of matching questions", body = SearchResponse),
        (status = 404, description = "Nothing matches", body = ErrorBody),
        (status = 422, description = "`searchTerm` is missing", body = ErrorBody)
    )
)]
pub async fn search_questions(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ErrorResponse> {
    let Json(request) = payload.map_err(|e| TriviaError::Unprocessable(e.body_text()))?;

    let results = app_state
        .trivia
        .search_questions(&request.search_term, query.page)
        .await?;

    Ok(Json(SearchResponse {
        success: true,
        questions: to_dtos(results.questions),
        total_questions: results.total_questions,
    }))
}

/// List one page of a category's questions.
#[utoipa::path(
    get,
    path = "/categories/{id}/questions",
    params(("id" = i64, Path, description = "The category to list."), PageQuery),
    responses(
        (status = 200, description = "A page of the category's questions", body = CategoryQuestionsResponse),
        (status = 422, description = "No such category", body = ErrorBody)
    )
)]
pub async fn get_questions_by_category(
    State(app_state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CategoryQuestionsResponse>, ErrorResponse> {
    let Path(category_id) = id.map_err(|e| TriviaError::NotFound(e.body_text()))?;

    let listing = app_state
        .trivia
        .questions_in_category(category_id, query.page)
        .await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: to_dtos(listing.questions),
        total_questions: listing.total_questions,
        current_category: listing.current_category.kind,
    }))
}

/// Draw the next quiz question.
#[utoipa::path(
    post,
    path = "/quizzes",
    request_body = QuizPayload,
    responses(
        (status = 200, description = "The next question, or null when the quiz is over", body = QuizResponse),
        (status = 400, description = "Malformed quiz payload", body = ErrorBody)
    )
)]
pub async fn play_quiz(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<QuizPayload>, JsonRejection>,
) -> Result<Json<QuizResponse>, ErrorResponse> {
    let Json(payload) = payload.map_err(|e| TriviaError::BadRequest(e.body_text()))?;

    let category_id = RawField::from(payload.quiz_category.id)
        .as_i64()
        .ok_or_else(|| TriviaError::BadRequest("quiz_category.id must be an integer".to_string()))?;

    let request = QuizRequest {
        previous_questions: payload.previous_questions.into_iter().collect::<HashSet<_>>(),
        category: QuizCategory::from(category_id),
    };

    let question = match app_state.trivia.next_quiz_question(request).await? {
        QuizDraw::Next(question) => Some(QuestionDto::from(question)),
        QuizDraw::Finished => {
            info!("Quiz in category {} has no questions left", category_id);
            None
        }
    };

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
