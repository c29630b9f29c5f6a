//! Answer endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::rollback_on_error;
use crate::db::{DbError, QaSession, SessionSource};
use crate::http::error::{ApiError, ErrorDetail, ErrorStatus, ANSWER_NOT_FOUND, QUESTION_NOT_FOUND};
use crate::http::extractors::{ApiJson, DbSession, ValidId};
use crate::http::server::AppState;
use crate::models::{Answer, NewAnswer};

/// Create answer request
#[derive(Deserialize, ToSchema)]
pub struct CreateAnswerRequest {
    /// 1 to 36 characters, not blank
    #[schema(example = "u1")]
    pub user_id: String,
    /// 1 to 100 characters, not blank
    pub text: String,
}

/// Answer response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnswerResponse {
    pub id: i64,
    pub question_id: i64,
    pub user_id: String,
    pub text: String,
    pub created_at: String,
}

impl From<Answer> for AnswerResponse {
    fn from(a: Answer) -> Self {
        Self {
            id: a.id,
            question_id: a.question_id,
            user_id: a.user_id,
            text: a.text,
            created_at: a.created_at.to_rfc3339(),
        }
    }
}

/// Existence check through the question read, then the insert.
async fn answer_existing<Q: QaSession>(
    session: &mut Q,
    question_id: i64,
    answer: NewAnswer,
) -> Result<Option<Answer>, DbError> {
    if session.get_question(question_id).await?.is_none() {
        return Ok(None);
    }
    session.create_answer(question_id, answer).await
}

/// POST /answers/question/{id} - answer an existing question
#[utoipa::path(
    post,
    path = "/answers/question/{id}",
    tags = ["answers"],
    summary = "Answer a question",
    description = "Adds an answer to an existing question. Input is validated before any storage is touched.",
    params(("id" = i64, Path, description = "Question id")),
    request_body = CreateAnswerRequest,
    responses(
        (status = 201, description = "Answer created", body = AnswerResponse),
        (status = 404, description = "No such question", body = ErrorDetail),
        (status = 422, description = "Invalid input", body = ErrorDetail),
        (status = 500, description = "Storage fault", body = ErrorStatus)
    )
)]
pub async fn create_answer<S: SessionSource>(
    ValidId(question_id): ValidId,
    State(state): State<AppState<S>>,
    ApiJson(req): ApiJson<CreateAnswerRequest>,
) -> Result<(StatusCode, Json<AnswerResponse>), ApiError> {
    let answer = NewAnswer::new(&req.user_id, &req.text)?;

    let mut session = state.sessions.open().await?;
    let result = answer_existing(&mut session, question_id, answer).await;

    let Some(created) = rollback_on_error(&mut session, result).await? else {
        tracing::warn!(question_id, "answer to unknown question");
        return Err(ApiError::NotFound(QUESTION_NOT_FOUND));
    };

    tracing::info!(answer_id = created.id, question_id, "answer created");
    Ok((StatusCode::CREATED, Json(AnswerResponse::from(created))))
}

/// GET /answers/{id} - a single answer
#[utoipa::path(
    get,
    path = "/answers/{id}",
    tags = ["answers"],
    summary = "Get an answer",
    params(("id" = i64, Path, description = "Answer id")),
    responses(
        (status = 200, description = "The answer", body = AnswerResponse),
        (status = 404, description = "No such answer", body = ErrorDetail),
        (status = 422, description = "Id is not an integer", body = ErrorDetail),
        (status = 500, description = "Storage fault", body = ErrorStatus)
    )
)]
pub async fn get_answer<S: SessionSource>(
    ValidId(id): ValidId,
    DbSession(mut session): DbSession<S>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let answer = session
        .get_answer(id)
        .await?
        .ok_or(ApiError::NotFound(ANSWER_NOT_FOUND))?;

    Ok(Json(AnswerResponse::from(answer)))
}

/// DELETE /answers/{id} - delete a single answer
#[utoipa::path(
    delete,
    path = "/answers/{id}",
    tags = ["answers"],
    summary = "Delete an answer",
    params(("id" = i64, Path, description = "Answer id")),
    responses(
        (status = 204, description = "Answer deleted"),
        (status = 404, description = "No such answer", body = ErrorDetail),
        (status = 422, description = "Id is not an integer", body = ErrorDetail),
        (status = 500, description = "Storage fault", body = ErrorStatus)
    )
)]
pub async fn delete_answer<S: SessionSource>(
    ValidId(id): ValidId,
    DbSession(mut session): DbSession<S>,
) -> Result<StatusCode, ApiError> {
    let result = session.delete_answer(id).await;
    if !rollback_on_error(&mut session, result).await? {
        tracing::warn!(answer_id = id, "delete of unknown answer");
        return Err(ApiError::NotFound(ANSWER_NOT_FOUND));
    }

    tracing::info!(answer_id = id, "answer deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Answer routes
pub fn router<S: SessionSource>() -> Router<AppState<S>> {
    Router::new()
        .route("/answers/question/{id}", post(create_answer::<S>))
        .route(
            "/answers/{id}",
            get(get_answer::<S>).delete(delete_answer::<S>),
        )
}
