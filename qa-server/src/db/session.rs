//! Request-scoped sessions
//!
//! A [`SessionSource`] hands out one [`QaSession`] per request. Every
//! persistence operation runs against that session. Write operations commit
//! on success; on failure the caller calls [`QaSession::rollback`] before the
//! session is reused or dropped. Not-found is a value (`None` / `false`),
//! never an error.

use async_trait::async_trait;

use super::DbError;
use crate::models::{Answer, NewAnswer, Question, QuestionText};

/// Opens request-scoped sessions.
#[async_trait]
pub trait SessionSource: Clone + Send + Sync + 'static {
    type Session: QaSession;

    async fn open(&self) -> Result<Self::Session, DbError>;
}

/// Open transactional handle to the questions and answers store.
#[async_trait]
pub trait QaSession: Send {
    /// All questions with their answers loaded, in insertion order.
    async fn list_questions(&mut self) -> Result<Vec<Question>, DbError>;

    /// A question with its answers, or `None`.
    async fn get_question(&mut self, id: i64) -> Result<Option<Question>, DbError>;

    /// Insert and commit a question. The result has no answers.
    async fn create_question(&mut self, text: QuestionText) -> Result<Question, DbError>;

    /// Delete a question and, by cascade, its answers.
    ///
    /// Returns `false` without writing anything when the id does not exist.
    async fn delete_question(&mut self, id: i64) -> Result<bool, DbError>;

    /// Insert and commit an answer to an existing question.
    ///
    /// Returns `None` and inserts nothing when the question does not exist.
    async fn create_answer(
        &mut self,
        question_id: i64,
        answer: NewAnswer,
    ) -> Result<Option<Answer>, DbError>;

    async fn get_answer(&mut self, id: i64) -> Result<Option<Answer>, DbError>;

    /// Delete an answer. Returns `false` when the id does not exist.
    async fn delete_answer(&mut self, id: i64) -> Result<bool, DbError>;

    /// Revert uncommitted work. A no-op when nothing is pending.
    async fn rollback(&mut self) -> Result<(), DbError>;
}
