//! In-process store
//!
//! Same contract as the PostgreSQL sessions: cascade on question delete, ids
//! never reused, `created_at` non-decreasing with id. Every operation runs
//! under one mutex acquisition and applies atomically, so there is never
//! uncommitted work to roll back.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::session::{QaSession, SessionSource};
use super::DbError;
use crate::models::{Answer, NewAnswer, Question, QuestionRow, QuestionText};

#[derive(Default)]
struct Tables {
    questions: BTreeMap<i64, QuestionRow>,
    answers: BTreeMap<i64, Answer>,
    last_question_id: i64,
    last_answer_id: i64,
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    fn now(&mut self) -> DateTime<Utc> {
        let now = match self.last_created_at {
            Some(last) if last > Utc::now() => last,
            _ => Utc::now(),
        };
        self.last_created_at = Some(now);
        now
    }

    fn question(&self, row: &QuestionRow) -> Question {
        let answers = self
            .answers
            .values()
            .filter(|a| a.question_id == row.id)
            .cloned()
            .collect();
        row.clone().with_answers(answers)
    }
}

/// Session source over shared in-process tables
#[derive(Clone, Default)]
pub struct MemorySessionSource {
    tables: Arc<Mutex<Tables>>,
}

impl MemorySessionSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionSource for MemorySessionSource {
    type Session = MemorySession;

    async fn open(&self) -> Result<MemorySession, DbError> {
        Ok(MemorySession {
            tables: Arc::clone(&self.tables),
        })
    }
}

pub struct MemorySession {
    tables: Arc<Mutex<Tables>>,
}

impl MemorySession {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DbError> {
        self.tables
            .lock()
            .map_err(|_| DbError::Unavailable("in-memory store lock poisoned".into()))
    }
}

#[async_trait]
impl QaSession for MemorySession {
    async fn list_questions(&mut self) -> Result<Vec<Question>, DbError> {
        let tables = self.lock()?;
        Ok(tables.questions.values().map(|q| tables.question(q)).collect())
    }

    async fn get_question(&mut self, id: i64) -> Result<Option<Question>, DbError> {
        let tables = self.lock()?;
        Ok(tables.questions.get(&id).map(|q| tables.question(q)))
    }

    async fn create_question(&mut self, text: QuestionText) -> Result<Question, DbError> {
        let mut tables = self.lock()?;
        tables.last_question_id += 1;
        let row = QuestionRow {
            id: tables.last_question_id,
            text: text.into_string(),
            created_at: tables.now(),
        };
        tables.questions.insert(row.id, row.clone());
        Ok(row.with_answers(Vec::new()))
    }

    async fn delete_question(&mut self, id: i64) -> Result<bool, DbError> {
        let mut tables = self.lock()?;
        if tables.questions.remove(&id).is_none() {
            return Ok(false);
        }
        tables.answers.retain(|_, a| a.question_id != id);
        Ok(true)
    }

    async fn create_answer(
        &mut self,
        question_id: i64,
        answer: NewAnswer,
    ) -> Result<Option<Answer>, DbError> {
        let mut tables = self.lock()?;
        if !tables.questions.contains_key(&question_id) {
            return Ok(None);
        }
        tables.last_answer_id += 1;
        let created = Answer {
            id: tables.last_answer_id,
            question_id,
            user_id: answer.user_id.into_string(),
            text: answer.text.into_string(),
            created_at: tables.now(),
        };
        tables.answers.insert(created.id, created.clone());
        Ok(Some(created))
    }

    async fn get_answer(&mut self, id: i64) -> Result<Option<Answer>, DbError> {
        Ok(self.lock()?.answers.get(&id).cloned())
    }

    async fn delete_answer(&mut self, id: i64) -> Result<bool, DbError> {
        Ok(self.lock()?.answers.remove(&id).is_some())
    }

    async fn rollback(&mut self) -> Result<(), DbError> {
        Ok(())
    }
}
