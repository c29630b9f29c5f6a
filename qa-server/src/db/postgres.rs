//! PostgreSQL sessions
//!
//! A session holds at most one open transaction. The first operation begins
//! it, a write commits it, and the next operation begins a fresh one.
//! Dropping the session rolls back anything uncommitted and returns the
//! connection to the pool.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::repos::{answers, questions};
use super::session::{QaSession, SessionSource};
use super::DbError;
use crate::models::{Answer, NewAnswer, Question, QuestionText};

/// Session source backed by a connection pool
#[derive(Clone)]
pub struct PgSessionSource {
    pool: PgPool,
}

impl PgSessionSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SessionSource for PgSessionSource {
    type Session = PgSession;

    async fn open(&self) -> Result<PgSession, DbError> {
        PgSession::begin(&self.pool).await
    }
}

/// Request-scoped PostgreSQL session
pub struct PgSession {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgSession {
    /// Acquire a connection and begin a transaction.
    pub async fn begin(pool: &PgPool) -> Result<Self, DbError> {
        let tx = pool.begin().await?;
        Ok(Self {
            pool: pool.clone(),
            tx: Some(tx),
        })
    }

    /// The open transaction, beginning one if the last was committed.
    pub(crate) async fn tx(&mut self) -> Result<&mut Transaction<'static, Postgres>, DbError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        Ok(self.tx.insert(tx))
    }

    pub async fn commit(&mut self) -> Result<(), DbError> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl QaSession for PgSession {
    async fn list_questions(&mut self) -> Result<Vec<Question>, DbError> {
        questions::list(self).await
    }

    async fn get_question(&mut self, id: i64) -> Result<Option<Question>, DbError> {
        questions::get(self, id).await
    }

    async fn create_question(&mut self, text: QuestionText) -> Result<Question, DbError> {
        questions::create(self, text).await
    }

    async fn delete_question(&mut self, id: i64) -> Result<bool, DbError> {
        questions::delete(self, id).await
    }

    async fn create_answer(
        &mut self,
        question_id: i64,
        answer: NewAnswer,
    ) -> Result<Option<Answer>, DbError> {
        answers::create(self, question_id, answer).await
    }

    async fn get_answer(&mut self, id: i64) -> Result<Option<Answer>, DbError> {
        answers::get(self, id).await
    }

    async fn delete_answer(&mut self, id: i64) -> Result<bool, DbError> {
        answers::delete(self, id).await
    }

    async fn rollback(&mut self) -> Result<(), DbError> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }
}
