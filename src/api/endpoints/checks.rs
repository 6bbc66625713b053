//! `POST /api/sessions/:id/check` — run interaction and dosage checks.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{parse_session_id, ApiContext};
use crate::intelligence::{CheckReport, CheckRequest, DecisionSupport};
use crate::patients;

pub async fn run(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<String>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckReport>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let state = ctx.core.session(&id)?;
    let Json(request) = payload?;
    let report = ctx
        .core
        .engine()
        .run_check(&state, &request, patients::today())?;
    Ok(Json(report))
}
