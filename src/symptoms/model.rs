//! Inline symptom classifier: a decision tree fitted from the training table.
//!
//! Under `FitPolicy::AtStartup` the tree is fitted once and shared read-only.
//! Under `FitPolicy::PerRequest` every prediction fits a fresh tree from the
//! same table, which gives the same answer at a much higher cost.
//!
//! Every fit scores the held-out table and logs the accuracy. Nothing reads it
//! back to change a prediction.

use std::time::Instant;

use crate::classifier::{self, Accuracy, Classifier, ClassifierError, FittedTree};
use crate::models::{FeatureVector, FitPolicy, Label};

use super::dataset::SymptomTable;

/// A fitted tree plus its held-out diagnostic.
#[derive(Debug)]
pub struct FittedSymptomModel {
    pub tree: FittedTree,
    pub accuracy: Accuracy,
}

pub struct SymptomClassifier {
    training: SymptomTable,
    testing: SymptomTable,
    policy: FitPolicy,
    fitted: Option<FittedSymptomModel>,
}

impl SymptomClassifier {
    /// Build the classifier, fitting immediately under `AtStartup`.
    pub fn new(
        training: SymptomTable,
        testing: SymptomTable,
        policy: FitPolicy,
    ) -> Result<Self, ClassifierError> {
        if training.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        let mut classifier = Self {
            training,
            testing,
            policy,
            fitted: None,
        };
        if policy == FitPolicy::AtStartup {
            classifier.fitted = Some(classifier.fit()?);
        }
        Ok(classifier)
    }

    /// Fit a fresh tree from the training table and score it on the test table.
    pub fn fit(&self) -> Result<FittedSymptomModel, ClassifierError> {
        let started = Instant::now();
        let tree = FittedTree::fit(&self.training.rows, &self.training.labels)?;
        let accuracy = classifier::accuracy(&tree, &self.testing.rows, &self.testing.labels);

        tracing::info!(
            training_rows = self.training.len(),
            classes = tree.n_classes(),
            accuracy = accuracy.fraction(),
            correct = accuracy.correct,
            total = accuracy.total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fitted symptom classifier"
        );

        Ok(FittedSymptomModel { tree, accuracy })
    }

    /// Predict a disease label for an encoded symptom vector.
    pub fn predict(&self, features: &FeatureVector) -> Result<Label, ClassifierError> {
        match &self.fitted {
            Some(model) => Ok(model.tree.predict(features)?),
            None => {
                let model = self.fit()?;
                Ok(model.tree.predict(features)?)
            }
        }
    }

    pub fn policy(&self) -> FitPolicy {
        self.policy
    }

    /// The shared tree, present only under `AtStartup`.
    pub fn fitted(&self) -> Option<&FittedSymptomModel> {
        self.fitted.as_ref()
    }

    pub fn training_rows(&self) -> usize {
        self.training.len()
    }
}
