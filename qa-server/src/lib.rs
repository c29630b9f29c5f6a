//! qa-server: HTTP service for questions and their answers
//!
//! Questions own their answers; deleting a question deletes its answers.
//! Storage is PostgreSQL through sqlx, or an in-process store for
//! development and tests.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, MemorySessionSource, PgSessionSource, QaSession, SessionSource};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
