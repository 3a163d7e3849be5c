//! Shared test fixtures.

use std::path::Path;
use std::sync::OnceLock;

use chrono::{TimeZone, Utc};

use crate::classifier::store::{self, ArtifactManifest};
use crate::classifier::{ModelStore, Provenance, ScaledLogistic};
use crate::config::AppConfig;
use crate::core_state::CoreState;
use crate::forms;
use crate::medicines::MedicineCatalog;
use crate::models::{DiagnosticTarget, FeatureVector, FitPolicy, Label};
use crate::symptoms::{SymptomClassifier, SymptomTable};
use crate::vocabulary::{LABEL_COLUMN, SYMPTOMS};

/// Pima rows, separable on glucose.
const DIABETES_ROWS: &[([f64; 8], Label)] = &[
    ([1.0, 85.0, 66.0, 29.0, 0.0, 26.6, 0.351, 31.0], 0),
    ([1.0, 89.0, 66.0, 23.0, 94.0, 28.1, 0.167, 21.0], 0),
    ([2.0, 95.0, 70.0, 20.0, 60.0, 24.0, 0.2, 25.0], 0),
    ([0.0, 100.0, 72.0, 25.0, 80.0, 23.5, 0.3, 28.0], 0),
    ([3.0, 92.0, 64.0, 18.0, 50.0, 25.1, 0.25, 33.0], 0),
    ([1.0, 98.0, 60.0, 22.0, 70.0, 27.0, 0.18, 24.0], 0),
    ([6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0], 1),
    ([8.0, 183.0, 64.0, 0.0, 0.0, 23.3, 0.672, 32.0], 1),
    ([0.0, 137.0, 40.0, 35.0, 168.0, 43.1, 2.288, 33.0], 1),
    ([5.0, 166.0, 72.0, 19.0, 175.0, 25.8, 0.587, 51.0], 1),
    ([7.0, 160.0, 80.0, 30.0, 120.0, 35.0, 0.7, 45.0], 1),
    ([9.0, 171.0, 76.0, 33.0, 150.0, 38.0, 0.9, 55.0], 1),
];

/// A small labelled table for `target`. Diabetes uses real Pima rows; the
/// other targets get ten rows that rise together, the upper half labelled 1.
pub fn toy_target_table(target: DiagnosticTarget) -> (Vec<FeatureVector>, Vec<Label>) {
    if target == DiagnosticTarget::Diabetes {
        return DIABETES_ROWS
            .iter()
            .map(|(row, label)| (FeatureVector::new(row.to_vec()), *label))
            .unzip();
    }
    let width = forms::fields_for(target).len();
    (0..10)
        .map(|i| {
            let row = (0..width).map(|j| (i * 10 + j) as f64).collect();
            (FeatureVector::new(row), Label::from(i >= 5))
        })
        .unzip()
}

/// `toy_target_table` as a CSV with the public table's headers. The voice
/// table keeps its leading `name` column.
pub fn toy_table_csv(target: DiagnosticTarget) -> String {
    let specs = forms::fields_for(target);
    let voice = target == DiagnosticTarget::Parkinsons;

    let mut header: Vec<&str> = Vec::new();
    if voice {
        header.push("name");
    }
    header.extend(specs.iter().map(|spec| spec.column));
    header.push(target.label_column());

    let mut csv = header.join(",");
    csv.push('\n');
    let (rows, labels) = toy_target_table(target);
    for (i, (row, label)) in rows.iter().zip(labels).enumerate() {
        let mut cells: Vec<String> = Vec::new();
        if voice {
            cells.push(format!("phon_R01_S{i:02}"));
        }
        cells.extend(row.as_slice().iter().map(f64::to_string));
        cells.push(label.to_string());
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }
    csv
}

/// Fit `target`'s toy table and write the artifact pair under `dir`.
pub fn save_toy_model(dir: &Path, target: DiagnosticTarget) -> ArtifactManifest {
    let (rows, labels) = toy_target_table(target);
    let model = ScaledLogistic::fit(&rows, &labels).expect("toy fit");
    let provenance = Provenance {
        source: format!("{}.csv", target.artifact_stem()),
        rows: rows.len(),
        training_accuracy: 1.0,
        trained_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        trainer: "test fixture".into(),
    };
    store::save_artifact(dir, target, &model, provenance).expect("toy save")
}

/// All three toy models, written once per test run.
pub fn toy_models_dir() -> &'static Path {
    static DIR: OnceLock<tempfile::TempDir> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = tempfile::tempdir().expect("models tempdir");
        for &target in DiagnosticTarget::ALL {
            save_toy_model(dir.path(), target);
        }
        dir
    })
    .path()
}

/// A symptom CSV with one column per distinct vocabulary name plus the label.
pub fn symptom_csv(cases: &[(&[&str], &str)]) -> String {
    let mut header: Vec<&str> = Vec::new();
    for name in SYMPTOMS {
        if !header.contains(&name) {
            header.push(name);
        }
    }

    let mut csv = header.join(",");
    csv.push(',');
    csv.push_str(LABEL_COLUMN);
    csv.push('\n');
    for (symptoms, label) in cases {
        let cells: Vec<&str> = header
            .iter()
            .map(|h| if symptoms.contains(h) { "1" } else { "0" })
            .collect();
        csv.push_str(&cells.join(","));
        csv.push(',');
        csv.push_str(label);
        csv.push('\n');
    }
    csv
}

const TRAINING_CASES: &[(&[&str], &str)] = &[
    (&["blackheads", "pus_filled_pimples"], "Acne"),
    (&["blackheads", "pus_filled_pimples", "scurring"], "Acne"),
    (&["chest_pain", "fast_heart_rate"], "Heart attack"),
    (&["chest_pain", "fast_heart_rate", "dizziness"], "Heart attack"),
    (&["yellowing_of_eyes", "yellow_urine"], "Jaundice"),
    (&["yellowing_of_eyes", "yellow_urine", "abdominal_pain"], "Jaundice"),
    (&["mild_fever", "diarrhoea", "muscle_pain"], "Malaria"),
];

const TESTING_CASES: &[(&[&str], &str)] = &[
    (&["blackheads", "pus_filled_pimples"], "Acne"),
    (&["chest_pain", "fast_heart_rate"], "Heart attack"),
    (&["yellowing_of_eyes", "yellow_urine"], "Jaundice"),
];

/// Small training and testing tables with four separable diseases.
pub fn small_symptom_tables() -> (SymptomTable, SymptomTable) {
    let training = SymptomTable::from_reader(symptom_csv(TRAINING_CASES).as_bytes())
        .expect("training fixture");
    let testing = SymptomTable::from_reader(symptom_csv(TESTING_CASES).as_bytes())
        .expect("testing fixture");
    (training, testing)
}

/// Write the fixture tables as `Training.csv` / `Testing.csv` under `dir`.
pub fn write_symptom_tables(dir: &Path) {
    std::fs::write(dir.join("Training.csv"), symptom_csv(TRAINING_CASES)).unwrap();
    std::fs::write(dir.join("Testing.csv"), symptom_csv(TESTING_CASES)).unwrap();
}

/// A core over the toy models and the fixture tables.
pub fn test_core(policy: FitPolicy) -> CoreState {
    let models = ModelStore::load(toy_models_dir()).expect("toy models");
    let (training, testing) = small_symptom_tables();
    let symptoms =
        SymptomClassifier::new(training, testing, policy).expect("fixture classifier");
    let config = AppConfig {
        models_dir: toy_models_dir().to_path_buf(),
        fit_policy: policy,
        ..AppConfig::default()
    };
    CoreState::from_parts(config, models, symptoms, MedicineCatalog::builtin())
}
