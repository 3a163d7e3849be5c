//! Symptom tables: labelled cases read from CSV.
//!
//! Each row is one case. The 95 vocabulary columns are picked by header name
//! (a name listed twice in the vocabulary reads the same first-matching
//! column twice); the `prognosis` column holds the raw disease name, mapped to
//! its label through the explicit training-label table. Other columns are
//! ignored.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::models::{FeatureVector, Label};
use crate::vocabulary::{self, LABEL_COLUMN, SYMPTOMS};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Cannot open symptom table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Symptom table has no '{column}' column")]
    MissingColumn { column: String },

    #[error("Row {row}: unknown prognosis '{label}'")]
    UnknownLabel { row: usize, label: String },

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },
}

/// Labelled symptom cases, encoded in vocabulary order.
#[derive(Debug, Clone, Default)]
pub struct SymptomTable {
    pub rows: Vec<FeatureVector>,
    pub labels: Vec<Label>,
}

impl SymptomTable {
    pub fn read_csv(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            "Loaded symptom table"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let column_of = |name: &str| -> Result<usize, DatasetError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetError::MissingColumn {
                    column: name.to_string(),
                })
        };

        let columns = SYMPTOMS
            .iter()
            .map(|name| column_of(*name))
            .collect::<Result<Vec<usize>, _>>()?;
        let label_column = column_of(LABEL_COLUMN)?;

        let mut table = Self::default();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = index + 1;

            let mut values = Vec::with_capacity(columns.len());
            for &column in &columns {
                let cell = record.get(column).unwrap_or("").trim();
                let value: f64 = cell.parse().map_err(|_| DatasetError::InvalidCell {
                    row,
                    column: headers.get(column).unwrap_or_default().to_string(),
                    value: cell.to_string(),
                })?;
                values.push(value);
            }

            // Matched verbatim: some training labels carry a trailing space.
            let raw_label = record.get(label_column).unwrap_or("");
            let label = vocabulary::prognosis_label(raw_label).ok_or_else(|| {
                DatasetError::UnknownLabel {
                    row,
                    label: raw_label.to_string(),
                }
            })?;

            table.rows.push(FeatureVector::new(values));
            table.labels.push(label);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
