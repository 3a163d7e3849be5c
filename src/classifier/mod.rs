//! Classifiers: fitted decision procedures mapping a feature vector to a label.
//!
//! Both model kinds are thin wrappers over `aprender`:
//! - `ScaledLogistic`: standardized `LogisticRegression` (the pre-trained
//!   diabetes / heart disease / Parkinson's models)
//! - `FittedTree`: `DecisionTreeClassifier` fitted in-process from the
//!   symptom tables
//!
//! Both are immutable once built and safe to share across threads.

pub mod logistic;
pub mod store;
pub mod tree;

pub use logistic::{ScaledLogistic, Standardizer};
pub use store::{ArtifactManifest, DeserializationError, LoadedModel, ModelStore, Provenance};
pub use tree::FittedTree;

use aprender::primitives::Matrix;

use crate::models::{FeatureVector, InvalidInputError, Label};

/// A fitted decision procedure.
pub trait Classifier: Send + Sync {
    /// Number of features the classifier expects.
    fn arity(&self) -> usize;

    /// Predict one label. Pure: no observable side effects.
    fn predict(&self, features: &FeatureVector) -> Result<Label, ClassifierError>;
}

/// Errors raised while fitting or consulting a classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("Cannot fit a classifier on an empty training set")]
    EmptyTrainingSet,

    #[error("Training shape mismatch: {rows} rows but {labels} labels")]
    ShapeMismatch { rows: usize, labels: usize },

    #[error("Training row {row} has {actual} features, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Label {0} is not binary; expected 0 or 1")]
    NonBinaryLabel(Label),

    #[error("Model backend error: {0}")]
    Backend(String),

    #[error("Classifier produced label {0}, which has no catalog entry")]
    UnknownLabel(Label),
}

/// Check a training set is non-empty and rectangular; returns its width.
pub(crate) fn check_training_shape(
    rows: &[FeatureVector],
    labels: &[Label],
) -> Result<usize, ClassifierError> {
    if rows.is_empty() {
        return Err(ClassifierError::EmptyTrainingSet);
    }
    if rows.len() != labels.len() {
        return Err(ClassifierError::ShapeMismatch {
            rows: rows.len(),
            labels: labels.len(),
        });
    }
    let width = rows[0].len();
    if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(ClassifierError::RaggedRow {
            row,
            expected: width,
            actual: bad.len(),
        });
    }
    Ok(width)
}

/// Pack rows into a row-major `f32` matrix. Rows must all be `width` long.
pub(crate) fn to_matrix<'a, I>(rows: I, width: usize) -> Result<Matrix<f32>, ClassifierError>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut data = Vec::new();
    let mut count = 0;
    for row in rows {
        data.extend(row.iter().map(|v| *v as f32));
        count += 1;
    }
    Matrix::from_vec(count, width, data).map_err(|e| ClassifierError::Backend(e.to_string()))
}

/// Share of rows a classifier labels correctly.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Score `classifier` against labelled rows. Rows that fail to predict count as wrong.
pub fn accuracy<C: Classifier + ?Sized>(
    classifier: &C,
    rows: &[FeatureVector],
    labels: &[Label],
) -> Accuracy {
    let correct = rows
        .iter()
        .zip(labels)
        .filter(|(row, expected)| classifier.predict(row).ok() == Some(**expected))
        .count();
    Accuracy {
        correct,
        total: rows.len().min(labels.len()),
    }
}
