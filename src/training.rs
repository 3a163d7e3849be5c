//! Fitting the pre-trained target models from labelled public tables.
//!
//! Expected tables, one per target, with a header row:
//! - diabetes: the Pima Indians table (`Pregnancies` … `Age`, `Outcome`)
//! - heart disease: the Cleveland table (`age` … `thal`, `target`)
//! - Parkinson's: the UCI voice table (`MDVP:Fo(Hz)` … `PPE`, `status`)
//!
//! Feature columns are picked by header in form order; other columns are
//! ignored. Labels must be 0 or 1.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::classifier::store::{self, ArtifactWriteError};
use crate::classifier::{self, ArtifactManifest, ClassifierError, Provenance, ScaledLogistic};
use crate::config::{APP_NAME, APP_VERSION};
use crate::forms;
use crate::models::{DiagnosticTarget, FeatureVector, Label};

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("Cannot open training table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Training table has no '{column}' column")]
    MissingColumn { column: String },

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row}: outcome '{value}' is not 0 or 1")]
    InvalidLabel { row: usize, value: String },

    #[error("Fit failed: {0}")]
    Fit(#[from] ClassifierError),

    #[error(transparent)]
    Artifact(#[from] ArtifactWriteError),
}

/// Rows of one target's table, in form field order.
#[derive(Debug, Clone, Default)]
pub struct LabeledTable {
    pub rows: Vec<FeatureVector>,
    pub labels: Vec<Label>,
}

impl LabeledTable {
    pub fn read_csv(path: &Path, target: DiagnosticTarget) -> Result<Self, TrainingError> {
        let file = std::fs::File::open(path).map_err(|source| TrainingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, target)?;
        tracing::info!(
            model = target.as_str(),
            path = %path.display(),
            rows = table.rows.len(),
            "Loaded training table"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, target: DiagnosticTarget) -> Result<Self, TrainingError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let column_of = |name: &str| -> Result<usize, TrainingError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| TrainingError::MissingColumn {
                    column: name.to_string(),
                })
        };

        let specs = forms::fields_for(target);
        let columns = specs
            .iter()
            .map(|spec| column_of(spec.column))
            .collect::<Result<Vec<usize>, _>>()?;
        let label_column = column_of(target.label_column())?;

        let mut table = Self::default();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = index + 1;

            let mut values = Vec::with_capacity(columns.len());
            for (&column, spec) in columns.iter().zip(specs) {
                let cell = record.get(column).unwrap_or("");
                let value: f64 = cell.parse().map_err(|_| TrainingError::InvalidCell {
                    row,
                    column: spec.column.to_string(),
                    value: cell.to_string(),
                })?;
                values.push(value);
            }

            let raw = record.get(label_column).unwrap_or("");
            let label = match raw.parse::<f64>() {
                Ok(v) if v == 0.0 => 0,
                Ok(v) if v == 1.0 => 1,
                _ => {
                    return Err(TrainingError::InvalidLabel {
                        row,
                        value: raw.to_string(),
                    })
                }
            };

            table.rows.push(FeatureVector::new(values));
            table.labels.push(label);
        }
        Ok(table)
    }
}

/// A freshly fitted model with its provenance, not yet written out.
#[derive(Debug)]
pub struct TrainedModel {
    pub target: DiagnosticTarget,
    pub model: ScaledLogistic,
    pub provenance: Provenance,
}

/// Fit `target`'s model on `table`. `source` names the table in the provenance.
pub fn train(
    target: DiagnosticTarget,
    table: &LabeledTable,
    source: &str,
) -> Result<TrainedModel, TrainingError> {
    let model = ScaledLogistic::fit(&table.rows, &table.labels)?;
    let accuracy = classifier::accuracy(&model, &table.rows, &table.labels);

    tracing::info!(
        model = target.as_str(),
        rows = table.rows.len(),
        accuracy = accuracy.fraction(),
        correct = accuracy.correct,
        "Fitted target model"
    );

    Ok(TrainedModel {
        target,
        model,
        provenance: Provenance {
            source: source.to_string(),
            rows: table.rows.len(),
            training_accuracy: accuracy.fraction(),
            trained_at: Utc::now(),
            trainer: format!("{APP_NAME} {APP_VERSION}"),
        },
    })
}

/// Read `data`, fit `target`'s model and write the artifact pair into `models_dir`.
pub fn train_from_csv(
    target: DiagnosticTarget,
    data: &Path,
    models_dir: &Path,
) -> Result<ArtifactManifest, TrainingError> {
    let table = LabeledTable::read_csv(data, target)?;
    let source = data
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| data.display().to_string());
    let trained = train(target, &table, &source)?;
    Ok(store::save_artifact(
        models_dir,
        target,
        &trained.model,
        trained.provenance,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Classifier, LoadedModel};
    use crate::test_support::toy_table_csv;

    #[test]
    fn reads_feature_columns_in_form_order() {
        let csv = "Outcome,Age,Glucose,Pregnancies,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction\n\
                   1,50,148,6,72,35,0,33.6,0.627\n";
        let table = LabeledTable::from_reader(csv.as_bytes(), DiagnosticTarget::Diabetes).unwrap();
        assert_eq!(table.labels, vec![1]);
        assert_eq!(
            table.rows[0].as_slice(),
            &[6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0]
        );
    }

    #[test]
    fn voice_table_is_read_by_header() {
        let csv = toy_table_csv(DiagnosticTarget::Parkinsons);
        let table = LabeledTable::from_reader(csv.as_bytes(), DiagnosticTarget::Parkinsons).unwrap();
        assert!(!table.rows.is_empty());
        assert_eq!(table.rows[0].len(), 22);
    }

    #[test]
    fn missing_outcome_column_is_reported() {
        let csv = "age,sex\n63,1\n";
        let err = LabeledTable::from_reader(csv.as_bytes(), DiagnosticTarget::HeartDisease)
            .unwrap_err();
        match err {
            TrainingError::MissingColumn { column } => assert_eq!(column, "cp"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn outcome_must_be_binary() {
        let csv = toy_table_csv(DiagnosticTarget::Diabetes).replacen(",1\n", ",2\n", 1);
        let err = LabeledTable::from_reader(csv.as_bytes(), DiagnosticTarget::Diabetes)
            .unwrap_err();
        assert!(matches!(err, TrainingError::InvalidLabel { .. }));
    }

    #[test]
    fn non_numeric_cell_is_reported() {
        let csv = "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Outcome\n\
                   6,high,72,35,0,33.6,0.627,50,1\n";
        let err = LabeledTable::from_reader(csv.as_bytes(), DiagnosticTarget::Diabetes)
            .unwrap_err();
        assert!(matches!(
            err,
            TrainingError::InvalidCell { row: 1, ref column, .. } if column == "Glucose"
        ));
    }

    #[test]
    fn train_from_csv_writes_a_loadable_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("heart.csv");
        std::fs::write(&data, toy_table_csv(DiagnosticTarget::HeartDisease)).unwrap();
        let models = dir.path().join("models");

        let manifest = train_from_csv(DiagnosticTarget::HeartDisease, &data, &models).unwrap();
        assert_eq!(manifest.provenance.source, "heart.csv");
        assert_eq!(manifest.provenance.training_accuracy, 1.0);
        assert!(manifest.provenance.trainer.starts_with("MedPredict"));

        let loaded = LoadedModel::load(&models, DiagnosticTarget::HeartDisease).unwrap();
        assert_eq!(loaded.arity(), 13);
        assert_eq!(loaded.digest(), manifest.model_digest);
        assert_eq!(loaded.manifest.provenance, manifest.provenance);
    }

    #[test]
    fn missing_table_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = train_from_csv(
            DiagnosticTarget::Diabetes,
            &dir.path().join("absent.csv"),
            dir.path(),
        )
        .unwrap_err();
        assert!(matches!(err, TrainingError::Io { .. }));
    }
}
