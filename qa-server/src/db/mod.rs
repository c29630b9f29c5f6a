//! Database layer - sessions, connection pool and queries
//!
//! # Design Principles
//!
//! - One session per request, opened at request start and released on drop
//! - Not-found is a value (`None` / `false`), errors are storage faults only
//! - Writes commit inside the operation, rollback belongs to the caller

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod repos;
pub mod session;

pub use memory::{MemorySession, MemorySessionSource};
pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use postgres::{PgSession, PgSessionSource};
pub use session::{QaSession, SessionSource};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
