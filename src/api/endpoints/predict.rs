//! Prediction endpoints: the three pre-trained models and the symptom tree.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{
    ApiContext, PredictionStamp, SymptomPredictRequest, SymptomPredictResponse,
    TargetPredictRequest, TargetPredictResponse,
};
use crate::core_state;
use crate::forms;
use crate::models::DiagnosticTarget;
use crate::symptoms::SymptomSelection;

/// `POST /api/predict/:target`
pub async fn target(
    State(ctx): State<ApiContext>,
    Path(slug): Path<String>,
    body: Result<Json<TargetPredictRequest>, JsonRejection>,
) -> Result<Json<TargetPredictResponse>, ApiError> {
    let target: DiagnosticTarget = slug
        .parse()
        .map_err(|_| ApiError::NotFound(format!("No model for '{slug}'")))?;
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let features = forms::parse_fields(target, &body.fields)?;
    let label = ctx.core.predict_target(target, &features)?;

    Ok(Json(TargetPredictResponse {
        target,
        label,
        message: target.outcome_message(label),
        stamp: PredictionStamp::now(),
    }))
}

/// `POST /api/symptoms/predict`
pub async fn symptoms(
    State(ctx): State<ApiContext>,
    body: Result<Json<SymptomPredictRequest>, JsonRejection>,
) -> Result<Json<SymptomPredictResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let selection = SymptomSelection::from_slots(body.symptoms.into_iter().map(Some))?;
    let diagnosis = core_state::diagnose_symptoms(ctx.core.clone(), selection).await?;

    Ok(Json(SymptomPredictResponse {
        label: diagnosis.label,
        disease: diagnosis.disease,
        medicines: diagnosis.medicines,
        stamp: PredictionStamp::now(),
    }))
}
