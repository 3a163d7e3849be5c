//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::classifier::store::ModelSummary;
use crate::models::FitPolicy;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub instance_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Each model's digest and the table it was fitted on.
    pub models: Vec<ModelSummary>,
    pub symptom_model: SymptomModelSummary,
}

#[derive(Serialize)]
pub struct SymptomModelSummary {
    pub fit_policy: FitPolicy,
    pub training_rows: usize,
    /// Held-out accuracy of the shared tree. Absent when fitting per request.
    pub accuracy: Option<f64>,
}

/// `GET /api/health`
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let core = &ctx.core;
    let symptoms = &core.symptoms;

    Ok(Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        instance_id: core.instance_id,
        started_at: core.started_at,
        models: core.models.summaries(),
        symptom_model: SymptomModelSummary {
            fit_policy: symptoms.policy(),
            training_rows: symptoms.training_rows(),
            accuracy: symptoms.fitted().map(|f| f.accuracy.fraction()),
        },
    }))
}
