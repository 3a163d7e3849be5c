//! General symptom prediction: vocabulary encoding, the symptom tables, and
//! the decision tree fitted from them.

pub mod dataset;
pub mod encoder;
pub mod model;

pub use dataset::{DatasetError, SymptomTable};
pub use encoder::{encode, SymptomSelection, MAX_SYMPTOM_SLOTS};
pub use model::{FittedSymptomModel, SymptomClassifier};

use serde::Serialize;

use crate::models::Label;

/// A symptom prediction resolved to a display name and remedies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomDiagnosis {
    pub label: Label,
    pub disease: &'static str,
    pub medicines: Vec<&'static str>,
}
