#![allow(dead_code)]

use api_lib::adapters::memory::SEED_QUESTIONS;
use api_lib::adapters::InMemoryDb;
use api_lib::web::{router, AppState};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use trivia_core::ports::TriviaRepository;

pub const TOTAL_QUESTIONS: usize = SEED_QUESTIONS.len();

/// The app over the seeded fixture.
pub fn app() -> Router {
    app_with(InMemoryDb::seeded())
}

pub fn app_with(db: InMemoryDb) -> Router {
    app_over(Arc::new(db))
}

pub fn app_over(repo: Arc<dyn TriviaRepository>) -> Router {
    router(Arc::new(AppState::new(repo)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let body = body.map(|json| json.to_string());
    send_raw(app, method, uri, body.as_deref(), HeaderMap::new()).await
}

pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
    headers: HeaderMap,
) -> TestResponse {
    let mut req = Request::builder().method(method).uri(uri);
    for (name, value) in headers.iter() {
        req = req.header(name, value);
    }
    let body = match body {
        Some(text) => {
            req = req.header(CONTENT_TYPE, "application/json");
            Body::from(text.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(req.body(body).expect("request build should succeed"))
        .await
        .expect("router should respond");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None).await
}

/// Asserts the standard failure envelope.
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status, status, "unexpected status, body: {}", response.body);
    assert_eq!(response.body["success"], Value::Bool(false));
    assert_eq!(response.body["error"], Value::from(status.as_u16()));
    assert_eq!(response.body["message"], Value::from(message));
}

pub fn question_ids(body: &Value) -> Vec<i64> {
    body["questions"]
        .as_array()
        .expect("questions should be an array")
        .iter()
        .map(|q| q["id"].as_i64().expect("question id should be an integer"))
        .collect()
}
