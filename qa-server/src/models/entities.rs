//! Persisted records

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Answer record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Question record with its answers in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub answers: Vec<Answer>,
}

/// Question row without answers, as read from the `questions` table
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl QuestionRow {
    pub fn with_answers(self, answers: Vec<Answer>) -> Question {
        Question {
            id: self.id,
            text: self.text,
            created_at: self.created_at,
            answers,
        }
    }
}
