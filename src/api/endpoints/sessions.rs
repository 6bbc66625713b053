//! Session endpoints: create a session and move it between pages.
//!
//! - `POST /api/sessions`
//! - `GET /api/sessions/:id`
//! - `DELETE /api/sessions/:id`
//! - `POST /api/sessions/:id/role`
//! - `POST /api/sessions/:id/enter`
//! - `POST /api/sessions/:id/leave`
//! - `POST /api/sessions/:id/reset`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{parse_session_id, ApiContext};
use crate::models::{Page, Role};
use crate::session::{AppState, WELCOME_TAGLINE};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub page: Page,
    pub role: Role,
    pub greeting: String,
    pub tagline: &'static str,
}

impl SessionResponse {
    fn new(session_id: Uuid, state: AppState) -> Self {
        Self {
            session_id,
            page: state.page,
            role: state.role,
            greeting: state.greeting(),
            tagline: WELCOME_TAGLINE,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: Role,
}

/// `POST /api/sessions`
pub async fn create(
    State(ctx): State<ApiContext>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let (id, state) = ctx.core.create_session()?;
    Ok((StatusCode::CREATED, Json(SessionResponse::new(id, state))))
}

/// `GET /api/sessions/:id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let state = ctx.core.session(&id)?;
    Ok(Json(SessionResponse::new(id, state)))
}

/// `DELETE /api/sessions/:id`
pub async fn end(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&session_id)?;
    ctx.core.end_session(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/sessions/:id/role`
pub async fn select_role(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<String>,
    payload: Result<Json<RoleRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let Json(body) = payload?;
    let state = ctx.core.transition(&id, |s| s.select_role(body.role))?;
    Ok(Json(SessionResponse::new(id, state)))
}

/// `POST /api/sessions/:id/enter`
pub async fn enter(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let state = ctx.core.transition(&id, AppState::enter)?;
    Ok(Json(SessionResponse::new(id, state)))
}

/// `POST /api/sessions/:id/leave`
pub async fn leave(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let state = ctx.core.transition(&id, AppState::leave)?;
    Ok(Json(SessionResponse::new(id, state)))
}

/// `POST /api/sessions/:id/reset`
pub async fn reset(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let state = ctx.core.transition(&id, |s| Ok(s.reset()))?;
    Ok(Json(SessionResponse::new(id, state)))
}
