//! Shared API context and request/response bodies.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core_state::CoreState;
use crate::forms::FieldValue;
use crate::models::{DiagnosticTarget, Label};

// ═══════════════════════════════════════════════════════════
// ApiContext
// ═══════════════════════════════════════════════════════════

/// Shared context for all routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

// ═══════════════════════════════════════════════════════════
// Prediction bodies
// ═══════════════════════════════════════════════════════════

/// Identity of one answered prediction, for client-side correlation.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionStamp {
    pub prediction_id: Uuid,
    pub predicted_at: DateTime<Utc>,
}

impl PredictionStamp {
    pub fn now() -> Self {
        Self {
            prediction_id: Uuid::new_v4(),
            predicted_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetPredictRequest {
    #[serde(default)]
    pub fields: HashMap<String, FieldValue>,
}

#[derive(Debug, Serialize)]
pub struct TargetPredictResponse {
    pub target: DiagnosticTarget,
    pub label: Label,
    pub message: &'static str,
    #[serde(flatten)]
    pub stamp: PredictionStamp,
}

#[derive(Debug, Deserialize)]
pub struct SymptomPredictRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SymptomPredictResponse {
    pub label: Label,
    pub disease: &'static str,
    pub medicines: Vec<&'static str>,
    #[serde(flatten)]
    pub stamp: PredictionStamp,
}

// ═══════════════════════════════════════════════════════════
// Medicine bodies
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct MedicineQuery {
    pub disease: String,
}

#[derive(Debug, Serialize)]
pub struct MedicineLookupResponse {
    pub disease: String,
    pub medicines: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
