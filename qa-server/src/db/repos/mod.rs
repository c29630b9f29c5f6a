//! PostgreSQL queries behind [`PgSession`](super::PgSession)
//!
//! Each function takes the session as its first argument and:
//! - loads answers for many questions in one query (no N+1)
//! - commits only after a write actually happened
//! - leaves failed work in the open transaction for the caller to roll back

pub mod answers;
pub mod questions;
