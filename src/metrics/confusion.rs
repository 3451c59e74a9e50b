use std::collections::BTreeSet;

use nalgebra::DMatrix;

use crate::error::Id3Error;

/// Counts of (actual, predicted) label pairs.
///
/// Entry `(i, j)` counts rows whose actual label is `labels()[i]` and whose
/// predicted label is `labels()[j]`. Labels are sorted.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    matrix: DMatrix<usize>,
}

/// Per-class precision, recall, F1 score and support.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    /// TP / (TP + FP); 0 when the class was never predicted.
    pub precision: f64,
    /// TP / (TP + FN); 0 when the class never occurs.
    pub recall: f64,
    /// Harmonic mean of precision and recall; 0 when both are 0.
    pub f1: f64,
    /// Number of rows whose actual label is this class.
    pub support: usize,
}

impl ConfusionMatrix {
    /// Computes the confusion matrix of `(actual, predicted)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::NoPredictions`] when `pairs` is empty.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, Id3Error> {
        let pairs: Vec<_> = pairs.into_iter().collect();
        if pairs.is_empty() {
            return Err(Id3Error::NoPredictions);
        }

        let labels: Vec<String> = pairs
            .iter()
            .flat_map(|(actual, predicted)| [*actual, *predicted])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut matrix = DMatrix::zeros(labels.len(), labels.len());
        for (actual, predicted) in pairs {
            let matrix_row = labels.iter().position(|label| label == actual);
            let matrix_col = labels.iter().position(|label| label == predicted);
            if let (Some(matrix_row), Some(matrix_col)) = (matrix_row, matrix_col) {
                matrix[(matrix_row, matrix_col)] += 1;
            }
        }

        Ok(Self { labels, matrix })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn matrix(&self) -> &DMatrix<usize> {
        &self.matrix
    }

    pub fn total(&self) -> usize {
        self.matrix.sum()
    }

    pub fn correct(&self) -> usize {
        self.matrix.diagonal().sum()
    }

    pub fn accuracy(&self) -> f64 {
        self.correct() as f64 / self.total() as f64
    }

    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        (0..self.labels.len())
            .map(|class| {
                let tp = self.matrix[(class, class)];
                let predicted = self.matrix.column(class).sum();
                let support = self.matrix.row(class).sum();

                let precision = if predicted > 0 {
                    tp as f64 / predicted as f64
                } else {
                    0.0
                };
                let recall = if support > 0 {
                    tp as f64 / support as f64
                } else {
                    0.0
                };
                let f1 = if precision + recall > 0.0 {
                    2.0 * (precision * recall) / (precision + recall)
                } else {
                    0.0
                };

                ClassMetrics {
                    label: self.labels[class].clone(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn pairs<'a>(y_true: &[&'a str], y_pred: &[&'a str]) -> Vec<(&'a str, &'a str)> {
        y_true.iter().copied().zip(y_pred.iter().copied()).collect()
    }

    #[test]
    fn test_confusion_matrix() {
        let result = ConfusionMatrix::from_pairs(pairs(
            &["1", "0", "1", "0", "1"],
            &["1", "1", "0", "0", "1"],
        ))
        .unwrap();

        let expected = DMatrix::from_row_slice(2, 2, &[1, 1, 1, 2]);

        assert_eq!(result.labels(), &["0".to_string(), "1".to_string()]);
        assert_eq!(result.matrix(), &expected);
    }

    #[test]
    fn test_confusion_matrix_multiclass() {
        let result = ConfusionMatrix::from_pairs(pairs(
            &["a", "b", "c", "b", "a", "c"],
            &["a", "c", "b", "b", "a", "c"],
        ))
        .unwrap();
        let expected = DMatrix::from_row_slice(3, 3, &[2, 0, 0, 0, 1, 1, 0, 1, 1]);

        assert_eq!(result.matrix(), &expected);
    }

    #[test]
    fn test_confusion_matrix_empty() {
        let result = ConfusionMatrix::from_pairs(Vec::new());
        assert!(matches!(result, Err(Id3Error::NoPredictions)));
    }

    #[test]
    fn test_accuracy() {
        let result = ConfusionMatrix::from_pairs(pairs(
            &["1", "0", "1", "0", "1"],
            &["1", "1", "0", "0", "1"],
        ))
        .unwrap();

        assert_eq!(result.correct(), 3);
        assert_eq!(result.total(), 5);
        assert_relative_eq!(result.accuracy(), 0.6);
    }

    #[test]
    fn test_class_metrics() {
        let result = ConfusionMatrix::from_pairs(pairs(
            &["1", "0", "1", "0", "1"],
            &["1", "1", "0", "0", "1"],
        ))
        .unwrap();
        let metrics = result.class_metrics();

        assert_eq!(metrics[1].label, "1");
        assert_relative_eq!(metrics[1].precision, 2.0 / 3.0);
        assert_relative_eq!(metrics[1].recall, 2.0 / 3.0);
        assert_relative_eq!(metrics[1].f1, 2.0 / 3.0);
        assert_eq!(metrics[1].support, 3);
        assert_relative_eq!(metrics[0].precision, 0.5);
        assert_relative_eq!(metrics[0].recall, 0.5);
    }

    #[test]
    fn test_class_metrics_never_predicted() {
        let result = ConfusionMatrix::from_pairs(pairs(&["1", "1", "1"], &["0", "0", "0"])).unwrap();
        let metrics = result.class_metrics();

        assert_eq!(metrics[1].precision, 0.0);
        assert_eq!(metrics[1].recall, 0.0);
        assert_eq!(metrics[1].f1, 0.0);
        assert_eq!(metrics[0].support, 0);
    }
}
