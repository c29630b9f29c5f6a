//! Question queries
//!
//! - list/get: one query for questions, one `ANY($1)` query for their answers
//! - delete: single statement, answers go with it via ON DELETE CASCADE

use crate::db::postgres::PgSession;
use crate::db::DbError;
use crate::models::{Question, QuestionRow, QuestionText};

use super::answers;

/// All questions with answers, oldest first.
pub async fn list(session: &mut PgSession) -> Result<Vec<Question>, DbError> {
    let tx = session.tx().await?;

    let rows: Vec<QuestionRow> =
        sqlx::query_as("SELECT id, text, created_at FROM questions ORDER BY id")
            .fetch_all(&mut **tx)
            .await?;

    let ids: Vec<i64> = rows.iter().map(|q| q.id).collect();
    let mut by_question = answers::for_questions(&mut **tx, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|q| {
            let answers = by_question.remove(&q.id).unwrap_or_default();
            q.with_answers(answers)
        })
        .collect())
}

pub async fn get(session: &mut PgSession, id: i64) -> Result<Option<Question>, DbError> {
    let tx = session.tx().await?;

    let row: Option<QuestionRow> =
        sqlx::query_as("SELECT id, text, created_at FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut by_question = answers::for_questions(&mut **tx, &[row.id]).await?;
    let answers = by_question.remove(&row.id).unwrap_or_default();
    Ok(Some(row.with_answers(answers)))
}

pub async fn create(session: &mut PgSession, text: QuestionText) -> Result<Question, DbError> {
    let tx = session.tx().await?;

    let row: QuestionRow = sqlx::query_as(
        r#"
        INSERT INTO questions (text)
        VALUES ($1)
        RETURNING id, text, created_at
        "#,
    )
    .bind(text.as_str())
    .fetch_one(&mut **tx)
    .await?;

    session.commit().await?;
    Ok(row.with_answers(Vec::new()))
}

pub async fn delete(session: &mut PgSession, id: i64) -> Result<bool, DbError> {
    let tx = session.tx().await?;

    let deleted = sqlx::query("DELETE FROM questions WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?
        .rows_affected()
        > 0;

    if deleted {
        session.commit().await?;
    }
    Ok(deleted)
}
