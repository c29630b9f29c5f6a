//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::server::AppState;
use crate::db::SessionSource;

/// JSON body whose rejections become `422 {"detail": ...}`
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Extract an integer id from the path
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        let id = id
            .parse::<i64>()
            .map_err(|_| ApiError::Validation(format!("id must be an integer, got '{}'", id)))?;

        Ok(Self(id))
    }
}

/// Request-scoped session, opened before the handler runs and released
/// when the handler returns.
///
/// Only for handlers without a body. Handlers that take a body validate it
/// first and open their session from `State` afterwards.
pub struct DbSession<S: SessionSource>(pub S::Session);

impl<S> FromRequestParts<AppState<S>> for DbSession<S>
where
    S: SessionSource,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let session = state.sessions.open().await?;
        Ok(Self(session))
    }
}
