//! Router tests against the in-memory store

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::{build_router, ServerConfig};
use crate::db::{DbError, MemorySessionSource, QaSession, SessionSource};
use crate::models::{Answer, NewAnswer, Question, QuestionText};

fn app() -> Router {
    build_router(MemorySessionSource::new(), &ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create_question(app: &Router, text: &str) -> Value {
    let (status, body) = send(app, Method::POST, "/questions/", Some(json!({ "text": text }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn create_answer(app: &Router, question_id: i64, text: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/answers/question/{question_id}"),
        Some(json!({ "user_id": "u1", "text": text })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn answer_count(app: &Router) -> usize {
    let (_, list) = send(app, Method::GET, "/questions", None).await;
    list.as_array()
        .unwrap()
        .iter()
        .map(|q| q["answers"].as_array().unwrap().len())
        .sum()
}

#[tokio::test]
async fn question_answer_lifecycle() {
    let app = app();

    let question = create_question(&app, "Q1").await;
    assert_eq!(question["id"], 1);
    assert_eq!(question["text"], "Q1");
    assert_eq!(question["answers"], json!([]));

    let answer = create_answer(&app, 1, "A1").await;
    assert_eq!(answer["question_id"], 1);
    assert_eq!(answer["user_id"], "u1");

    let (status, fetched) = send(&app, Method::GET, "/questions/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["answers"].as_array().unwrap().len(), 1);
    assert_eq!(fetched["answers"][0]["text"], "A1");

    let (status, body) = send(&app, Method::DELETE, "/questions/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let answer_uri = format!("/answers/{}", answer["id"]);
    let (status, body) = send(&app, Method::GET, &answer_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "answer not found" }));
}

#[tokio::test]
async fn created_at_is_not_before_request() {
    let app = app();
    let before = Utc::now();

    let question = create_question(&app, "when?").await;
    let created_at: DateTime<Utc> = question["created_at"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(created_at >= before);
}

#[tokio::test]
async fn list_with_and_without_trailing_slash() {
    let app = app();
    create_question(&app, "first").await;
    let second = create_question(&app, "second").await;
    create_answer(&app, second["id"].as_i64().unwrap(), "reply").await;

    for uri in ["/questions", "/questions/"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["text"], "first");
        assert_eq!(list[0]["answers"], json!([]));
        assert_eq!(list[1]["answers"][0]["text"], "reply");
    }
}

#[tokio::test]
async fn unknown_question_is_404() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/questions/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "question not found" }));

    let (status, body) = send(&app, Method::DELETE, "/questions/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "question not found" }));
}

#[tokio::test]
async fn answer_to_unknown_question_creates_nothing() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/answers/question/999",
        Some(json!({ "user_id": "u1", "text": "orphan" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "question not found" }));

    let question = create_question(&app, "Q").await;
    let before = answer_count(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/answers/question/999",
        Some(json!({ "user_id": "u1", "text": "orphan" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(answer_count(&app).await, before);

    create_answer(&app, question["id"].as_i64().unwrap(), "A").await;
    assert_eq!(answer_count(&app).await, before + 1);
}

#[tokio::test]
async fn get_delete_get_answer() {
    let app = app();
    create_question(&app, "Q").await;
    let answer = create_answer(&app, 1, "A").await;
    let uri = format!("/answers/{}", answer["id"]);

    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, answer);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "answer not found" }));

    // the question itself is untouched
    let (_, question) = send(&app, Method::GET, "/questions/1", None).await;
    assert_eq!(question["answers"], json!([]));
}

#[tokio::test]
async fn invalid_input_is_422() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/questions/", Some(json!({ "text": "" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "detail": "text cannot be empty" }));

    let long = "x".repeat(101);
    let (status, _) = send(&app, Method::POST, "/questions/", Some(json!({ "text": long }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    create_question(&app, "Q").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/answers/question/1",
        Some(json!({ "user_id": "u".repeat(37), "text": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({ "detail": "user_id exceeds maximum length of 36 characters" })
    );

    let (status, body) = send(&app, Method::POST, "/questions/", Some(json!({ "body": "Q" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, body) = send(&app, Method::GET, "/questions/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "detail": "id must be an integer, got 'abc'" }));

    // nothing but the one valid question was stored
    let (_, list) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["answers"], json!([]));
}

#[tokio::test]
async fn openapi_document_lists_every_operation() {
    let app = app();

    let (status, doc) = send(&app, Method::GET, "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);

    let operations = [
        ("/questions", "get"),
        ("/questions", "post"),
        ("/questions/{id}", "get"),
        ("/questions/{id}", "delete"),
        ("/answers/question/{id}", "post"),
        ("/answers/{id}", "get"),
        ("/answers/{id}", "delete"),
    ];
    for (path, method) in operations {
        let operation = &doc["paths"][path][method];
        assert!(operation.is_object(), "{method} {path} missing");
        assert!(operation["summary"].is_string(), "{method} {path} has no summary");
    }
}

#[tokio::test]
async fn root_and_health() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// === Storage faults ===

fn fault() -> DbError {
    DbError::Unavailable("connection lost".into())
}

/// Sessions whose every operation fails; counts rollbacks
#[derive(Clone, Default)]
struct FailingSource {
    rollbacks: Arc<AtomicUsize>,
    refuse_open: bool,
}

struct FailingSession {
    rollbacks: Arc<AtomicUsize>,
}

#[async_trait]
impl SessionSource for FailingSource {
    type Session = FailingSession;

    async fn open(&self) -> Result<FailingSession, DbError> {
        if self.refuse_open {
            return Err(fault());
        }
        Ok(FailingSession {
            rollbacks: Arc::clone(&self.rollbacks),
        })
    }
}

#[async_trait]
impl QaSession for FailingSession {
    async fn list_questions(&mut self) -> Result<Vec<Question>, DbError> {
        Err(fault())
    }

    async fn get_question(&mut self, _id: i64) -> Result<Option<Question>, DbError> {
        Err(fault())
    }

    async fn create_question(&mut self, _text: QuestionText) -> Result<Question, DbError> {
        Err(fault())
    }

    async fn delete_question(&mut self, _id: i64) -> Result<bool, DbError> {
        Err(fault())
    }

    async fn create_answer(
        &mut self,
        _question_id: i64,
        _answer: NewAnswer,
    ) -> Result<Option<Answer>, DbError> {
        Err(fault())
    }

    async fn get_answer(&mut self, _id: i64) -> Result<Option<Answer>, DbError> {
        Err(fault())
    }

    async fn delete_answer(&mut self, _id: i64) -> Result<bool, DbError> {
        Err(fault())
    }

    async fn rollback(&mut self) -> Result<(), DbError> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn expected_fault() -> Value {
    json!({ "status": 500, "message": "store unavailable: connection lost" })
}

#[tokio::test]
async fn write_failures_roll_back_and_return_500() {
    let source = FailingSource::default();
    let app = build_router(source.clone(), &ServerConfig::default());

    let writes = [
        (Method::POST, "/questions/", Some(json!({ "text": "Q" }))),
        (Method::DELETE, "/questions/1", None),
        (
            Method::POST,
            "/answers/question/1",
            Some(json!({ "user_id": "u1", "text": "A" })),
        ),
        (Method::DELETE, "/answers/1", None),
    ];

    for (i, (method, uri, body)) in writes.into_iter().enumerate() {
        let (status, body) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, expected_fault());
        assert_eq!(source.rollbacks.load(Ordering::SeqCst), i + 1);
    }
}

#[tokio::test]
async fn read_failures_return_500_without_rollback() {
    let source = FailingSource::default();
    let app = build_router(source.clone(), &ServerConfig::default());

    for uri in ["/questions/", "/questions/1", "/answers/1"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, expected_fault());
    }
    assert_eq!(source.rollbacks.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn session_open_failure_is_500() {
    let source = FailingSource {
        refuse_open: true,
        ..FailingSource::default()
    };
    let app = build_router(source, &ServerConfig::default());

    let (status, body) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected_fault());
}

#[tokio::test]
async fn invalid_input_is_rejected_without_opening_a_session() {
    // opening a session would fail with 500, so a 422 proves it never happened
    let source = FailingSource {
        refuse_open: true,
        ..FailingSource::default()
    };
    let app = build_router(source.clone(), &ServerConfig::default());

    let (status, body) = send(&app, Method::POST, "/questions/", Some(json!({ "text": " " }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "detail": "text cannot be empty" }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/answers/question/1",
        Some(json!({ "user_id": "u".repeat(37), "text": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({ "detail": "user_id exceeds maximum length of 36 characters" })
    );

    let (status, _) = send(&app, Method::POST, "/questions", Some(json!({ "body": "Q" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    for (method, uri) in [(Method::GET, "/questions/abc"), (Method::DELETE, "/answers/x")] {
        let (status, _) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }

    assert_eq!(source.rollbacks.load(Ordering::SeqCst), 0);
}
