//! CART decision tree over `aprender::tree::DecisionTreeClassifier`.
//!
//! Gini impurity, greedy top-down binary splits, no depth or leaf limit.
//! Fitting is deterministic: the same rows always yield the same predictions.

use aprender::tree::DecisionTreeClassifier;

use super::{check_training_shape, to_matrix, Classifier, ClassifierError};
use crate::models::{FeatureVector, Label};

pub struct FittedTree {
    inner: DecisionTreeClassifier,
    n_features: usize,
    n_classes: usize,
}

impl FittedTree {
    /// Fit an unbounded tree on labelled rows.
    pub fn fit(rows: &[FeatureVector], labels: &[Label]) -> Result<Self, ClassifierError> {
        let n_features = check_training_shape(rows, labels)?;
        let x = to_matrix(rows.iter().map(FeatureVector::as_slice), n_features)?;

        let mut inner = DecisionTreeClassifier::new();
        inner
            .fit(&x, labels)
            .map_err(|e| ClassifierError::Backend(e.to_string()))?;

        let n_classes = labels.iter().max().map_or(0, |max| max + 1);
        Ok(Self {
            inner,
            n_features,
            n_classes,
        })
    }

    /// One past the largest label seen in training.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

impl std::fmt::Debug for FittedTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FittedTree")
            .field("n_features", &self.n_features)
            .field("n_classes", &self.n_classes)
            .finish_non_exhaustive()
    }
}

impl Classifier for FittedTree {
    fn arity(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &FeatureVector) -> Result<Label, ClassifierError> {
        features.check_arity(self.n_features)?;
        let x = to_matrix([features.as_slice()], self.n_features)?;
        self.inner
            .predict(&x)
            .first()
            .copied()
            .ok_or_else(|| ClassifierError::Backend("tree returned no prediction".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvalidInputError;

    fn rows(values: &[&[f64]]) -> Vec<FeatureVector> {
        values.iter().map(|v| FeatureVector::new(v.to_vec())).collect()
    }

    fn grid() -> (Vec<FeatureVector>, Vec<Label>) {
        (
            rows(&[
                &[0.0, 0.0],
                &[1.0, 0.0],
                &[2.0, 0.0],
                &[0.0, 1.0],
                &[1.0, 1.0],
                &[2.0, 1.0],
            ]),
            vec![0, 0, 1, 1, 2, 2],
        )
    }

    #[test]
    fn predictions_stay_in_the_training_label_range() {
        let (x, y) = grid();
        let tree = FittedTree::fit(&x, &y).unwrap();
        assert_eq!(tree.n_classes(), 3);
        for row in &x {
            assert!(tree.predict(row).unwrap() <= 2);
        }
    }

    #[test]
    fn separable_rows_are_fitted_exactly() {
        let x = rows(&[&[0.0], &[1.0], &[10.0], &[11.0]]);
        let y = vec![0, 0, 1, 1];
        let tree = FittedTree::fit(&x, &y).unwrap();
        let predicted: Vec<Label> = x.iter().map(|r| tree.predict(r).unwrap()).collect();
        assert_eq!(predicted, y);
    }

    #[test]
    fn independent_fits_agree() {
        let (x, y) = grid();
        let a = FittedTree::fit(&x, &y).unwrap();
        let b = FittedTree::fit(&x, &y).unwrap();
        for point in [[0.5, 0.5], [1.5, 0.2], [2.0, 1.0], [0.0, 0.9]] {
            let point = FeatureVector::new(point.to_vec());
            assert_eq!(a.predict(&point).unwrap(), b.predict(&point).unwrap());
        }
    }

    #[test]
    fn one_hot_rows_map_to_their_class() {
        let x = rows(&[
            &[1.0, 0.0, 0.0, 0.0],
            &[1.0, 1.0, 0.0, 0.0],
            &[0.0, 0.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0, 1.0],
        ]);
        let y = vec![4, 4, 7, 7];
        let tree = FittedTree::fit(&x, &y).unwrap();
        assert_eq!(tree.predict(&x[0]).unwrap(), 4);
        assert_eq!(tree.predict(&x[3]).unwrap(), 7);
    }

    #[test]
    fn wrong_arity_is_invalid_input() {
        let (x, y) = grid();
        let tree = FittedTree::fit(&x, &y).unwrap();
        let err = tree.predict(&FeatureVector::new(vec![1.0])).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::InvalidInput(InvalidInputError::ArityMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn bad_training_shapes_are_rejected() {
        assert!(matches!(
            FittedTree::fit(&[], &[]),
            Err(ClassifierError::EmptyTrainingSet)
        ));
        let x = rows(&[&[0.0], &[1.0]]);
        assert!(matches!(
            FittedTree::fit(&x, &[0]),
            Err(ClassifierError::ShapeMismatch { .. })
        ));
    }
}
