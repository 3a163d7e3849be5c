//! Per-target field schemas and the text → feature-vector boundary.
//!
//! Field order is the order each model was trained with. Keys are the form
//! field names; labels are what the page shows above each input; columns are
//! the headers of the public tables the models are fitted on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{DiagnosticTarget, FeatureVector, InvalidInputError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub column: &'static str,
}

const fn field(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        column: key,
    }
}

/// Voice measurements: the table header is the label.
const fn voice(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        column: label,
    }
}

// ═══════════════════════════════════════════
// Field tables
// ═══════════════════════════════════════════

pub const DIABETES_FIELDS: [FieldSpec; 8] = [
    field("Pregnancies", "Number of Pregnancies"),
    field("Glucose", "Glucose Level"),
    field("BloodPressure", "Blood Pressure value"),
    field("SkinThickness", "Skin Thickness value"),
    field("Insulin", "Insulin Level"),
    field("BMI", "BMI value"),
    field("DiabetesPedigreeFunction", "Diabetes Pedigree Function value"),
    field("Age", "Age of the Person"),
];

pub const HEART_DISEASE_FIELDS: [FieldSpec; 13] = [
    field("age", "Age"),
    field("sex", "Sex"),
    field("cp", "Chest Pain types"),
    field("trestbps", "Resting Blood Pressure"),
    field("chol", "Serum Cholestoral in mg/dl"),
    field("fbs", "Fasting Blood Sugar > 120 mg/dl"),
    field("restecg", "Resting Electrocardiographic results"),
    field("thalach", "Maximum Heart Rate achieved"),
    field("exang", "Exercise Induced Angina"),
    field("oldpeak", "ST depression induced by exercise"),
    field("slope", "Slope of the peak exercise ST segment"),
    field("ca", "Major vessels colored by flourosopy"),
    field(
        "thal",
        "thal: 0 = normal; 1 = fixed defect; 2 = reversable defect",
    ),
];

pub const PARKINSONS_FIELDS: [FieldSpec; 22] = [
    voice("fo", "MDVP:Fo(Hz)"),
    voice("fhi", "MDVP:Fhi(Hz)"),
    voice("flo", "MDVP:Flo(Hz)"),
    voice("Jitter_percent", "MDVP:Jitter(%)"),
    voice("Jitter_Abs", "MDVP:Jitter(Abs)"),
    voice("RAP", "MDVP:RAP"),
    voice("PPQ", "MDVP:PPQ"),
    voice("DDP", "Jitter:DDP"),
    voice("Shimmer", "MDVP:Shimmer"),
    voice("Shimmer_dB", "MDVP:Shimmer(dB)"),
    voice("APQ3", "Shimmer:APQ3"),
    voice("APQ5", "Shimmer:APQ5"),
    voice("APQ", "MDVP:APQ"),
    voice("DDA", "Shimmer:DDA"),
    voice("NHR", "NHR"),
    voice("HNR", "HNR"),
    voice("RPDE", "RPDE"),
    voice("DFA", "DFA"),
    voice("spread1", "spread1"),
    voice("spread2", "spread2"),
    voice("D2", "D2"),
    voice("PPE", "PPE"),
];

/// Ordered field schema for a target.
pub fn fields_for(target: DiagnosticTarget) -> &'static [FieldSpec] {
    match target {
        DiagnosticTarget::Diabetes => &DIABETES_FIELDS,
        DiagnosticTarget::HeartDisease => &HEART_DISEASE_FIELDS,
        DiagnosticTarget::Parkinsons => &PARKINSONS_FIELDS,
    }
}

// ═══════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════

/// A submitted field value. Forms always send text; JSON clients may send
/// numbers, or anything else, which then fails parsing like any other text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Other(value) => value.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

fn parse_field(spec: &FieldSpec, raw: &str) -> Result<f64, InvalidInputError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| InvalidInputError::NotNumeric {
            field: spec.key.to_string(),
            label: spec.label.to_string(),
            value: raw.to_string(),
        })?;
    if !value.is_finite() {
        return Err(InvalidInputError::NonFinite {
            field: spec.key.to_string(),
            label: spec.label.to_string(),
            value: raw.to_string(),
        });
    }
    Ok(value)
}

/// Parse submitted text into the target's feature vector, in schema order.
///
/// Keys outside the schema are ignored. A missing key is treated as an empty
/// field and fails as not numeric. The first failing field is reported.
pub fn parse_text_fields(
    target: DiagnosticTarget,
    submitted: &HashMap<String, String>,
) -> Result<FeatureVector, InvalidInputError> {
    let specs = fields_for(target);
    let mut values = Vec::with_capacity(specs.len());
    for spec in specs {
        let raw = submitted.get(spec.key).map(String::as_str).unwrap_or("");
        values.push(parse_field(spec, raw)?);
    }
    Ok(FeatureVector::new(values))
}

/// Same as [`parse_text_fields`] for JSON-submitted values.
pub fn parse_fields(
    target: DiagnosticTarget,
    submitted: &HashMap<String, FieldValue>,
) -> Result<FeatureVector, InvalidInputError> {
    let text: HashMap<String, String> = submitted
        .iter()
        .map(|(key, value)| (key.clone(), value.to_text()))
        .collect();
    parse_text_fields(target, &text)
}
