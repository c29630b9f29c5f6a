//! Route handlers organized by resource

pub mod answers;
pub mod health;
pub mod questions;

use crate::db::{DbError, QaSession};
use crate::http::error::ApiError;

/// Roll the session back when a write failed, then surface the failure.
///
/// A failed rollback is logged; the original error is what the client sees.
pub(crate) async fn rollback_on_error<T, Q: QaSession>(
    session: &mut Q,
    result: Result<T, DbError>,
) -> Result<T, ApiError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Err(rollback) = session.rollback().await {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(ApiError::Database(e))
        }
    }
}
