//! Service root and health check endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

/// Root response
#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    summary = "Service banner",
    responses((status = 200, description = "Service is running", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "questions and answers service is running",
    })
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    summary = "Health check",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Root and health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
