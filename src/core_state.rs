//! Application context shared by every request handler.
//!
//! `CoreState` is built once at startup and wrapped in `Arc`. Nothing in it
//! is mutated afterwards, so handlers read it without locks.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::classifier::{ClassifierError, DeserializationError, ModelStore};
use crate::config::{AppConfig, ConfigError};
use crate::medicines::MedicineCatalog;
use crate::models::{DiagnosticTarget, FeatureVector, InvalidInputError, Label};
use crate::symptoms::{
    DatasetError, SymptomClassifier, SymptomDiagnosis, SymptomSelection, SymptomTable,
};
use crate::vocabulary;

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

/// Failure while serving one prediction.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error("Classifier error: {0}")]
    Classifier(ClassifierError),
    #[error("Prediction task failed: {0}")]
    Task(String),
}

impl From<ClassifierError> for CoreError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::InvalidInput(e) => Self::InvalidInput(e),
            other => Self::Classifier(other),
        }
    }
}

/// Fatal failure before the server starts serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Model artifact error: {0}")]
    Model(#[from] DeserializationError),
    #[error("Symptom table error: {0}")]
    Dataset(#[from] DatasetError),
    #[error("Symptom classifier error: {0}")]
    Fit(#[from] ClassifierError),
    #[error("Server error: {0}")]
    Server(String),
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    pub config: AppConfig,
    pub models: ModelStore,
    pub symptoms: SymptomClassifier,
    pub medicines: MedicineCatalog,
    /// Identifies this process run in health responses and logs.
    pub instance_id: Uuid,
    pub started_at: DateTime<Utc>,
}

impl CoreState {
    /// Load artifacts and tables named by `config`, fitting the symptom
    /// classifier when the fit policy asks for it.
    pub fn build(config: AppConfig) -> Result<Self, StartupError> {
        let models = ModelStore::load(&config.models_dir)?;
        let training = SymptomTable::read_csv(&config.training_path())?;
        let testing = SymptomTable::read_csv(&config.testing_path())?;
        let symptoms = SymptomClassifier::new(training, testing, config.fit_policy)?;
        Ok(Self::from_parts(config, models, symptoms, MedicineCatalog::builtin()))
    }

    pub fn from_parts(
        config: AppConfig,
        models: ModelStore,
        symptoms: SymptomClassifier,
        medicines: MedicineCatalog,
    ) -> Self {
        Self {
            config,
            models,
            symptoms,
            medicines,
            instance_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    /// Run one of the pre-trained models.
    pub fn predict_target(
        &self,
        target: DiagnosticTarget,
        features: &FeatureVector,
    ) -> Result<Label, CoreError> {
        let label = self.models.predict(target, features)?;
        tracing::debug!(model = target.as_str(), label, "Target prediction");
        Ok(label)
    }

    /// Encode the selection, classify it, and attach the remedies.
    ///
    /// Under the per-request fit policy this refits the tree and is slow;
    /// async callers go through [`diagnose_symptoms`].
    pub fn predict_symptoms(
        &self,
        selection: &SymptomSelection,
    ) -> Result<SymptomDiagnosis, CoreError> {
        let label = self.symptoms.predict(&selection.encode())?;
        let disease = vocabulary::disease_name(label)
            .ok_or(CoreError::Classifier(ClassifierError::UnknownLabel(label)))?;
        // Catalog keys follow their own spelling; a miss is an empty list.
        let medicines = self.medicines.lookup(disease);
        tracing::debug!(label, disease, remedies = medicines.len(), "Symptom prediction");
        Ok(SymptomDiagnosis {
            label,
            disease,
            medicines,
        })
    }
}

/// Symptom prediction on the blocking pool.
pub async fn diagnose_symptoms(
    core: Arc<CoreState>,
    selection: SymptomSelection,
) -> Result<SymptomDiagnosis, CoreError> {
    tokio::task::spawn_blocking(move || core.predict_symptoms(&selection))
        .await
        .map_err(|e| CoreError::Task(e.to_string()))?
}
