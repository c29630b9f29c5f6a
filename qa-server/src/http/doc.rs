//! OpenAPI document for the HTTP API.
//!
//! Served as JSON at `/api/openapi.json` with Swagger UI at `/api/openapi`.

use utoipa::OpenApi;

use super::error::{ErrorDetail, ErrorStatus};
use super::routes::answers::{AnswerResponse, CreateAnswerRequest};
use super::routes::health::{HealthResponse, RootResponse};
use super::routes::questions::{CreateQuestionRequest, QuestionResponse};
use super::routes::{answers, health, questions};

/// Where Swagger UI is mounted
pub const DOCS_PATH: &str = "/api/openapi";

/// Where the raw document is served
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Questions and answers API",
        description = "Create questions, answer them, and delete either. Deleting a question deletes its answers."
    ),
    paths(
        questions::list_questions,
        questions::create_question,
        questions::get_question,
        questions::delete_question,
        answers::create_answer,
        answers::get_answer,
        answers::delete_answer,
        health::root,
        health::health,
    ),
    components(schemas(
        CreateQuestionRequest,
        QuestionResponse,
        CreateAnswerRequest,
        AnswerResponse,
        RootResponse,
        HealthResponse,
        ErrorDetail,
        ErrorStatus,
    )),
    tags(
        (name = "questions", description = "Questions with their answers"),
        (name = "answers", description = "Answers to a question"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
