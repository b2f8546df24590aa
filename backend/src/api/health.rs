//! Health check handler

use axum::Json;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving
    pub status: String,
    /// Crate version
    pub version: String,
}

/// GET /api/health - Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
