//! Standardized logistic regression.
//!
//! Features are centred and scaled with the statistics of the training table,
//! then handed to `aprender`'s `LogisticRegression`. Label 1 wins when the
//! fitted probability exceeds one half.

use aprender::classification::LogisticRegression;
use serde::{Deserialize, Serialize};

use super::{check_training_shape, to_matrix, Classifier, ClassifierError};
use crate::models::{FeatureVector, Label};

pub const LEARNING_RATE: f32 = 0.1;
pub const MAX_ITER: usize = 1000;

/// Per-feature standardization applied before the model sees a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Standardizer {
    /// Column means and population standard deviations over `rows`.
    /// A constant column gets scale 1.
    pub fn fit(rows: &[FeatureVector], width: usize) -> Self {
        let n = rows.len().max(1) as f64;
        let mut mean = vec![0.0; width];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row.as_slice()) {
                *m += v / n;
            }
        }
        let mut variance = vec![0.0; width];
        for row in rows {
            for ((var, v), m) in variance.iter_mut().zip(row.as_slice()).zip(&mean) {
                *var += (v - m).powi(2) / n;
            }
        }
        let scale = variance
            .into_iter()
            .map(|var| if var > 0.0 { var.sqrt() } else { 1.0 })
            .collect();
        Self { mean, scale }
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// Caller guarantees `values.len() == self.width()`.
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }

    /// Internal consistency of a scaler read from disk.
    pub fn validate(&self) -> Result<(), String> {
        if self.mean.is_empty() {
            return Err("scaler covers no features".into());
        }
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if self.mean.iter().any(|m| !m.is_finite())
            || self.scale.iter().any(|s| !s.is_finite() || *s <= 0.0)
        {
            return Err("scaler parameters must be finite with positive scales".into());
        }
        Ok(())
    }
}

pub struct ScaledLogistic {
    scaler: Standardizer,
    model: LogisticRegression,
}

impl ScaledLogistic {
    /// Fit the scaler and the regression on binary-labelled rows.
    pub fn fit(rows: &[FeatureVector], labels: &[Label]) -> Result<Self, ClassifierError> {
        let width = check_training_shape(rows, labels)?;
        if let Some(&label) = labels.iter().find(|&&l| l > 1) {
            return Err(ClassifierError::NonBinaryLabel(label));
        }

        let scaler = Standardizer::fit(rows, width);
        let scaled: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| scaler.transform(row.as_slice()))
            .collect();
        let x = to_matrix(scaled.iter().map(Vec::as_slice), width)?;

        let mut model = LogisticRegression::new()
            .with_learning_rate(LEARNING_RATE)
            .with_max_iter(MAX_ITER);
        model
            .fit(&x, labels)
            .map_err(|e| ClassifierError::Backend(e.to_string()))?;

        Ok(Self { scaler, model })
    }

    /// Reassemble a model loaded from disk.
    pub fn from_parts(scaler: Standardizer, model: LogisticRegression) -> Self {
        Self { scaler, model }
    }

    pub fn scaler(&self) -> &Standardizer {
        &self.scaler
    }

    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }
}

impl std::fmt::Debug for ScaledLogistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaledLogistic")
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

impl Classifier for ScaledLogistic {
    fn arity(&self) -> usize {
        self.scaler.width()
    }

    fn predict(&self, features: &FeatureVector) -> Result<Label, ClassifierError> {
        features.check_arity(self.arity())?;
        let scaled = self.scaler.transform(features.as_slice());
        let x = to_matrix([scaled.as_slice()], self.arity())?;
        self.model
            .predict(&x)
            .first()
            .copied()
            .ok_or_else(|| ClassifierError::Backend("model returned no prediction".into()))
    }
}
