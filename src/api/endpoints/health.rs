//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub drugs: usize,
    pub patients: usize,
    pub sessions: usize,
}

/// `GET /api/health`
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let reference = ctx.core.reference();
    Ok(Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        drugs: reference.drugs.len(),
        patients: reference.patients.len(),
        sessions: ctx.core.session_count(),
    }))
}
