//! `GET /api/patients/:name` — patient lookup.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::patients::{self, PatientSummary};

#[derive(Serialize)]
pub struct PatientResponse {
    pub patient: PatientSummary,
}

pub async fn lookup(
    State(ctx): State<ApiContext>,
    Path(name): Path<String>,
) -> Result<Json<PatientResponse>, ApiError> {
    let patient = patients::find_patient(&ctx.core.reference().patients, &name)?;
    Ok(Json(PatientResponse {
        patient: PatientSummary::from_patient(patient, patients::today()),
    }))
}
