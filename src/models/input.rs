use serde::{Deserialize, Serialize};

/// Discrete class produced by a classifier.
/// For the symptom classifier this is a positional index into the disease catalog.
pub type Label = usize;

/// Ordered numeric input to a classifier, one value per expected field.
///
/// Order must match the order the model was trained with. The vector itself
/// carries no schema; arity is checked against the model at predict time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn set(&mut self, index: usize, value: f64) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        }
    }

    /// Indices of non-zero entries.
    pub fn active_indices(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Fail with `ArityMismatch` unless the vector has exactly `expected` entries.
    pub fn check_arity(&self, expected: usize) -> Result<(), InvalidInputError> {
        if self.0.len() == expected {
            Ok(())
        } else {
            Err(InvalidInputError::ArityMismatch {
                expected,
                actual: self.0.len(),
            })
        }
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Input rejected at submit time. Never raised while the user is typing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("{label}: '{value}' is not a number")]
    NotNumeric {
        field: String,
        label: String,
        value: String,
    },
    #[error("{label}: '{value}' is not a finite number")]
    NonFinite {
        field: String,
        label: String,
        value: String,
    },
    #[error("Expected {expected} features, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("Symptom slot {slot}: '{value}' is not a recognised symptom")]
    UnknownSymptom { slot: usize, value: String },
    #[error("At most {max} symptoms can be selected, got {given}")]
    TooManySymptoms { max: usize, given: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_check_reports_both_lengths() {
        let v = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        assert!(v.check_arity(3).is_ok());
        assert_eq!(
            v.check_arity(8),
            Err(InvalidInputError::ArityMismatch {
                expected: 8,
                actual: 3
            })
        );
    }

    #[test]
    fn set_out_of_range_is_ignored() {
        let mut v = FeatureVector::zeros(2);
        v.set(5, 1.0);
        v.set(1, 1.0);
        assert_eq!(v.as_slice(), &[0.0, 1.0]);
        assert_eq!(v.active_indices(), vec![1]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let v = FeatureVector::new(vec![6.0, 148.0]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[6.0,148.0]");
    }
}
