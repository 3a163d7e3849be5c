//! Medicine Lookup endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, MedicineLookupResponse, MedicineQuery, SearchQuery};
use crate::medicines::RemedyEntry;

/// `GET /api/medicines?disease=`: exact-match lookup. A miss is an empty list.
pub async fn lookup(
    State(ctx): State<ApiContext>,
    query: Result<Query<MedicineQuery>, QueryRejection>,
) -> Result<Json<MedicineLookupResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let medicines = ctx.core.medicines.lookup(&query.disease);
    Ok(Json(MedicineLookupResponse {
        disease: query.disease,
        medicines,
    }))
}

/// `GET /api/medicines/search?q=`
pub async fn search(
    State(ctx): State<ApiContext>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<RemedyEntry>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(ctx.core.medicines.search(&query.q)))
}
