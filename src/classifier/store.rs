//! Model Store: loads the pre-trained target models once at startup.
//!
//! Each model is a pair of files under the models directory:
//! - `<stem>.apr`: the fitted `LogisticRegression` in aprender's checksummed
//!   model format
//! - `<stem>.json`: the manifest: format version, feature order, the
//!   standardization the model was fitted behind, the SHA-256 of the `.apr`
//!   file and where the model came from
//!
//! The digest ties the pair together; the exact model in use can be
//! identified from the startup log and the health endpoint.

use std::path::{Path, PathBuf};

use aprender::classification::LogisticRegression;
use aprender::format::{self, ModelType, SaveOptions};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Classifier, ClassifierError, ScaledLogistic, Standardizer};
use crate::forms;
use crate::models::{DiagnosticTarget, FeatureVector, Label};

/// Manifest format this build reads and writes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 2;

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

/// Failure to turn an artifact into a usable classifier. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DeserializationError {
    #[error("Model artifact {path} could not be read: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model artifact {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Model artifact {path} has format version {found}, expected {supported}")]
    IncompatibleVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },
}

/// Failure to write a freshly fitted model.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactWriteError {
    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot save model to {path}: {reason}")]
    Backend { path: PathBuf, reason: String },

    #[error("Cannot encode manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

// ═══════════════════════════════════════════════════════════
// Manifest
// ═══════════════════════════════════════════════════════════

/// Where a model came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// File name of the labelled table the model was fitted on.
    pub source: String,
    pub rows: usize,
    pub training_accuracy: f64,
    pub trained_at: DateTime<Utc>,
    /// Program and version that fitted the model.
    pub trainer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub format_version: u32,
    pub name: String,
    pub target: DiagnosticTarget,
    /// Feature order the model was fitted with: the form field keys.
    pub feature_names: Vec<String>,
    pub scaler: Standardizer,
    /// Base64 SHA-256 of the `.apr` file.
    pub model_digest: String,
    pub provenance: Provenance,
}

/// Only the version field, read first so a future format fails cleanly.
#[derive(Deserialize)]
struct VersionHeader {
    format_version: u32,
}

pub fn manifest_path(models_dir: &Path, target: DiagnosticTarget) -> PathBuf {
    models_dir.join(format!("{}.json", target.artifact_stem()))
}

pub fn model_path(models_dir: &Path, target: DiagnosticTarget) -> PathBuf {
    models_dir.join(format!("{}.apr", target.artifact_stem()))
}

fn digest_of(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(Sha256::digest(bytes))
}

fn schema_keys(target: DiagnosticTarget) -> Vec<String> {
    forms::fields_for(target)
        .iter()
        .map(|spec| spec.key.to_string())
        .collect()
}

// ═══════════════════════════════════════════════════════════
// Save
// ═══════════════════════════════════════════════════════════

/// Write `model` and its manifest for `target` under `models_dir`.
pub fn save_artifact(
    models_dir: &Path,
    target: DiagnosticTarget,
    model: &ScaledLogistic,
    provenance: Provenance,
) -> Result<ArtifactManifest, ArtifactWriteError> {
    std::fs::create_dir_all(models_dir).map_err(|source| ArtifactWriteError::Io {
        path: models_dir.to_path_buf(),
        source,
    })?;

    let apr = model_path(models_dir, target);
    format::save(
        model.model(),
        ModelType::LogisticRegression,
        &apr,
        SaveOptions::default(),
    )
    .map_err(|e| ArtifactWriteError::Backend {
        path: apr.clone(),
        reason: e.to_string(),
    })?;
    let bytes = std::fs::read(&apr).map_err(|source| ArtifactWriteError::Io {
        path: apr.clone(),
        source,
    })?;

    let manifest = ArtifactManifest {
        format_version: ARTIFACT_FORMAT_VERSION,
        name: format!("{}-logistic", target.as_str()),
        target,
        feature_names: schema_keys(target),
        scaler: model.scaler().clone(),
        model_digest: digest_of(&bytes),
        provenance,
    };

    let json_path = manifest_path(models_dir, target);
    let json = serde_json::to_vec_pretty(&manifest)?;
    std::fs::write(&json_path, json).map_err(|source| ArtifactWriteError::Io {
        path: json_path.clone(),
        source,
    })?;

    tracing::info!(
        model = target.as_str(),
        path = %apr.display(),
        digest = %manifest.model_digest,
        "Saved model artifact"
    );
    Ok(manifest)
}

// ═══════════════════════════════════════════════════════════
// Load
// ═══════════════════════════════════════════════════════════

/// A model loaded into memory, immutable for the life of the process.
pub struct LoadedModel {
    pub manifest: ArtifactManifest,
    model: ScaledLogistic,
}

impl LoadedModel {
    /// Read and verify the artifact pair for `target`.
    pub fn load(models_dir: &Path, target: DiagnosticTarget) -> Result<Self, DeserializationError> {
        let json_path = manifest_path(models_dir, target);
        let manifest = read_manifest(&json_path, target)?;

        let apr = model_path(models_dir, target);
        let corrupt = |reason: String| DeserializationError::Corrupt {
            path: apr.clone(),
            reason,
        };
        let bytes = std::fs::read(&apr).map_err(|source| DeserializationError::Missing {
            path: apr.clone(),
            source,
        })?;
        let digest = digest_of(&bytes);
        if digest != manifest.model_digest {
            return Err(corrupt(format!(
                "digest {digest} does not match manifest digest {}",
                manifest.model_digest
            )));
        }

        let regression: LogisticRegression = format::load(&apr, ModelType::LogisticRegression)
            .map_err(|e| corrupt(e.to_string()))?;

        Ok(Self {
            model: ScaledLogistic::from_parts(manifest.scaler.clone(), regression),
            manifest,
        })
    }

    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    pub fn digest(&self) -> &str {
        &self.manifest.model_digest
    }
}

fn read_manifest(
    path: &Path,
    target: DiagnosticTarget,
) -> Result<ArtifactManifest, DeserializationError> {
    let corrupt = |reason: String| DeserializationError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|source| DeserializationError::Missing {
        path: path.to_path_buf(),
        source,
    })?;
    let header: VersionHeader =
        serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
    if header.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(DeserializationError::IncompatibleVersion {
            path: path.to_path_buf(),
            found: header.format_version,
            supported: ARTIFACT_FORMAT_VERSION,
        });
    }
    let manifest: ArtifactManifest =
        serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;

    if manifest.target != target {
        return Err(corrupt(format!(
            "manifest is for {}, expected {}",
            manifest.target, target
        )));
    }
    if manifest.feature_names != schema_keys(target) {
        return Err(corrupt(format!(
            "feature order {:?} does not match the {} form",
            manifest.feature_names, target
        )));
    }
    manifest.scaler.validate().map_err(corrupt)?;
    if manifest.scaler.width() != manifest.feature_names.len() {
        return Err(corrupt(format!(
            "scaler covers {} features but the model has {}",
            manifest.scaler.width(),
            manifest.feature_names.len()
        )));
    }
    Ok(manifest)
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("name", &self.manifest.name)
            .field("digest", &self.manifest.model_digest)
            .finish_non_exhaustive()
    }
}

impl Classifier for LoadedModel {
    fn arity(&self) -> usize {
        self.model.arity()
    }

    fn predict(&self, features: &FeatureVector) -> Result<Label, ClassifierError> {
        self.model.predict(features)
    }
}

// ═══════════════════════════════════════════════════════════
// Store
// ═══════════════════════════════════════════════════════════

/// Summary of one loaded model, for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub target: DiagnosticTarget,
    pub name: String,
    pub arity: usize,
    pub digest: String,
    pub provenance: Provenance,
}

/// The three pre-trained models, one per diagnostic target.
#[derive(Debug)]
pub struct ModelStore {
    diabetes: LoadedModel,
    heart_disease: LoadedModel,
    parkinsons: LoadedModel,
}

impl ModelStore {
    /// Load every artifact from `models_dir`. Any failure aborts the load.
    pub fn load(models_dir: &Path) -> Result<Self, DeserializationError> {
        let load = |target: DiagnosticTarget| -> Result<LoadedModel, DeserializationError> {
            let model = LoadedModel::load(models_dir, target)?;
            tracing::info!(
                model = target.as_str(),
                name = model.name(),
                arity = model.arity(),
                digest = model.digest(),
                source = %model.manifest.provenance.source,
                trained_at = %model.manifest.provenance.trained_at,
                "Loaded model artifact"
            );
            Ok(model)
        };

        Ok(Self {
            diabetes: load(DiagnosticTarget::Diabetes)?,
            heart_disease: load(DiagnosticTarget::HeartDisease)?,
            parkinsons: load(DiagnosticTarget::Parkinsons)?,
        })
    }

    pub fn get(&self, target: DiagnosticTarget) -> &LoadedModel {
        match target {
            DiagnosticTarget::Diabetes => &self.diabetes,
            DiagnosticTarget::HeartDisease => &self.heart_disease,
            DiagnosticTarget::Parkinsons => &self.parkinsons,
        }
    }

    pub fn predict(
        &self,
        target: DiagnosticTarget,
        features: &FeatureVector,
    ) -> Result<Label, ClassifierError> {
        self.get(target).predict(features)
    }

    pub fn summaries(&self) -> Vec<ModelSummary> {
        DiagnosticTarget::ALL
            .iter()
            .map(|&target| {
                let model = self.get(target);
                ModelSummary {
                    target,
                    name: model.name().to_string(),
                    arity: model.arity(),
                    digest: model.digest().to_string(),
                    provenance: model.manifest.provenance.clone(),
                }
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
