//! Question endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::answers::AnswerResponse;
use super::rollback_on_error;
use crate::db::{QaSession, SessionSource};
use crate::http::error::{ApiError, ErrorDetail, ErrorStatus, QUESTION_NOT_FOUND};
use crate::http::extractors::{ApiJson, DbSession, ValidId};
use crate::http::server::AppState;
use crate::models::{Question, QuestionText};

/// Create question request
#[derive(Deserialize, ToSchema)]
pub struct CreateQuestionRequest {
    /// 1 to 100 characters, not blank
    #[schema(example = "What is ownership?")]
    pub text: String,
}

/// Question response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestionResponse {
    pub id: i64,
    pub text: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub answers: Vec<AnswerResponse>,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            text: q.text,
            created_at: q.created_at.to_rfc3339(),
            answers: q.answers.into_iter().map(AnswerResponse::from).collect(),
        }
    }
}

/// List questions
///
/// All questions with their answers, oldest first.
#[utoipa::path(
    get,
    path = "/questions",
    tags = ["questions"],
    responses(
        (status = 200, description = "All questions", body = [QuestionResponse]),
        (status = 500, description = "Storage fault", body = ErrorStatus)
    )
)]
pub async fn list_questions<S: SessionSource>(
    DbSession(mut session): DbSession<S>,
) -> Result<Json<Vec<QuestionResponse>>, ApiError> {
    let questions = session.list_questions().await?;
    Ok(Json(questions.into_iter().map(QuestionResponse::from).collect()))
}

/// Create a question
///
/// Validates the text before any storage is touched.
#[utoipa::path(
    post,
    path = "/questions",
    tags = ["questions"],
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = QuestionResponse),
        (status = 422, description = "Invalid input", body = ErrorDetail),
        (status = 500, description = "Storage fault", body = ErrorStatus)
    )
)]
pub async fn create_question<S: SessionSource>(
    State(state): State<AppState<S>>,
    ApiJson(req): ApiJson<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    let text = QuestionText::new(&req.text)?;

    let mut session = state.sessions.open().await?;
    let result = session.create_question(text).await;
    let question = rollback_on_error(&mut session, result).await?;

    tracing::info!(question_id = question.id, "question created");
    Ok((StatusCode::CREATED, Json(QuestionResponse::from(question))))
}

/// Get a question
///
/// A single question with its answers.
#[utoipa::path(
    get,
    path = "/questions/{id}",
    tags = ["questions"],
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 200, description = "The question", body = QuestionResponse),
        (status = 404, description = "No such question", body = ErrorDetail),
        (status = 422, description = "Id is not an integer", body = ErrorDetail),
        (status = 500, description = "Storage fault", body = ErrorStatus)
    )
)]
pub async fn get_question<S: SessionSource>(
    ValidId(id): ValidId,
    DbSession(mut session): DbSession<S>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let question = session
        .get_question(id)
        .await?
        .ok_or(ApiError::NotFound(QUESTION_NOT_FOUND))?;

    Ok(Json(QuestionResponse::from(question)))
}

/// Delete a question
///
/// Its answers are deleted with it.
#[utoipa::path(
    delete,
    path = "/questions/{id}",
    tags = ["questions"],
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 204, description = "Question and its answers deleted"),
        (status = 404, description = "No such question", body = ErrorDetail),
        (status = 422, description = "Id is not an integer", body = ErrorDetail),
        (status = 500, description = "Storage fault", body = ErrorStatus)
    )
)]
pub async fn delete_question<S: SessionSource>(
    ValidId(id): ValidId,
    DbSession(mut session): DbSession<S>,
) -> Result<StatusCode, ApiError> {
    let result = session.delete_question(id).await;
    if !rollback_on_error(&mut session, result).await? {
        tracing::warn!(question_id = id, "delete of unknown question");
        return Err(ApiError::NotFound(QUESTION_NOT_FOUND));
    }

    tracing::info!(question_id = id, "question deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Question routes
pub fn router<S: SessionSource>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/questions",
            get(list_questions::<S>).post(create_question::<S>),
        )
        .route(
            "/questions/",
            get(list_questions::<S>).post(create_question::<S>),
        )
        .route(
            "/questions/{id}",
            get(get_question::<S>).delete(delete_question::<S>),
        )
}
