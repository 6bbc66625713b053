//! Catalog endpoints: the choices offered by the check form.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::Drug;

#[derive(Serialize)]
pub struct DrugsResponse {
    pub drugs: Vec<Drug>,
}

#[derive(Serialize)]
pub struct HouseholdItemsResponse {
    pub items: Vec<String>,
}

/// `GET /api/catalog/drugs`
pub async fn drugs(State(ctx): State<ApiContext>) -> Result<Json<DrugsResponse>, ApiError> {
    Ok(Json(DrugsResponse {
        drugs: ctx.core.reference().drugs.clone(),
    }))
}

/// `GET /api/catalog/household-items`
pub async fn household_items(
    State(ctx): State<ApiContext>,
) -> Result<Json<HouseholdItemsResponse>, ApiError> {
    let items = ctx
        .core
        .reference()
        .household_items()
        .into_iter()
        .map(String::from)
        .collect();
    Ok(Json(HouseholdItemsResponse { items }))
}
