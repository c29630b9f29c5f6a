//! Answer queries

use std::collections::HashMap;

use sqlx::PgConnection;

use crate::db::postgres::PgSession;
use crate::db::DbError;
use crate::models::{Answer, NewAnswer};

/// Answers for the given questions, grouped by question id, oldest first.
pub(crate) async fn for_questions(
    conn: &mut PgConnection,
    question_ids: &[i64],
) -> Result<HashMap<i64, Vec<Answer>>, DbError> {
    if question_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<Answer> = sqlx::query_as(
        r#"
        SELECT id, question_id, user_id, text, created_at
        FROM answers
        WHERE question_id = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(question_ids)
    .fetch_all(conn)
    .await?;

    let mut grouped: HashMap<i64, Vec<Answer>> = HashMap::new();
    for answer in rows {
        grouped.entry(answer.question_id).or_default().push(answer);
    }
    Ok(grouped)
}

/// Insert an answer if its question exists.
///
/// The question row is locked `FOR SHARE` so a concurrent delete cannot slip
/// in between the check and the insert.
pub async fn create(
    session: &mut PgSession,
    question_id: i64,
    answer: NewAnswer,
) -> Result<Option<Answer>, DbError> {
    let tx = session.tx().await?;

    let question: Option<i64> =
        sqlx::query_scalar("SELECT id FROM questions WHERE id = $1 FOR SHARE")
            .bind(question_id)
            .fetch_optional(&mut **tx)
            .await?;

    if question.is_none() {
        return Ok(None);
    }

    let created: Answer = sqlx::query_as(
        r#"
        INSERT INTO answers (question_id, user_id, text)
        VALUES ($1, $2, $3)
        RETURNING id, question_id, user_id, text, created_at
        "#,
    )
    .bind(question_id)
    .bind(answer.user_id.as_str())
    .bind(answer.text.as_str())
    .fetch_one(&mut **tx)
    .await?;

    session.commit().await?;
    Ok(Some(created))
}

pub async fn get(session: &mut PgSession, id: i64) -> Result<Option<Answer>, DbError> {
    let tx = session.tx().await?;

    let answer = sqlx::query_as(
        "SELECT id, question_id, user_id, text, created_at FROM answers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(answer)
}

pub async fn delete(session: &mut PgSession, id: i64) -> Result<bool, DbError> {
    let tx = session.tx().await?;

    let deleted = sqlx::query("DELETE FROM answers WHERE id = $1")
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
