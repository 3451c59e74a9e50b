//! Accuracy statistics over cross-validated predictions.
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use super::confusion::{ClassMetrics, ConfusionMatrix};
use crate::error::Id3Error;
use crate::validation::cross_validation::PredictionRecord;

/// Accuracy of a single held-out fold.
#[derive(Clone, Debug, PartialEq)]
pub struct FoldStatistics {
    pub fold: usize,
    pub correct: usize,
    pub total: usize,
    pub accuracy: f64,
}

/// Summary of a sequence of prediction records.
#[derive(Clone, Debug, PartialEq)]
pub struct StatisticsReport {
    pub total: usize,
    pub correct: usize,
    /// Correct predictions over all predictions.
    pub accuracy: f64,
    pub folds: Vec<FoldStatistics>,
    pub mean_fold_accuracy: f64,
    /// Population standard deviation of the fold accuracies.
    pub std_fold_accuracy: f64,
    pub classes: Vec<ClassMetrics>,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1: f64,
    pub confusion: ConfusionMatrix,
}

/// Aggregates predictions into accuracy, per-fold and per-class statistics.
///
/// # Errors
///
/// Returns [`Id3Error::NoPredictions`] when `records` is empty.
pub fn summarize(records: &[PredictionRecord]) -> Result<StatisticsReport, Id3Error> {
    let confusion = ConfusionMatrix::from_pairs(
        records
            .iter()
            .map(|record| (record.actual.as_str(), record.predicted.as_str())),
    )?;

    let mut per_fold: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
    for record in records {
        let (correct, total) = per_fold.entry(record.fold).or_default();
        *correct += usize::from(record.is_correct());
        *total += 1;
    }
    let folds: Vec<FoldStatistics> = per_fold
        .into_iter()
        .map(|(fold, (correct, total))| FoldStatistics {
            fold,
            correct,
            total,
            accuracy: correct as f64 / total as f64,
        })
        .collect();

    let n_folds = folds.len() as f64;
    let mean_fold_accuracy = folds.iter().map(|fold| fold.accuracy).sum::<f64>() / n_folds;
    let std_fold_accuracy = (folds
        .iter()
        .map(|fold| (fold.accuracy - mean_fold_accuracy).powi(2))
        .sum::<f64>()
        / n_folds)
        .sqrt();

    let classes = confusion.class_metrics();
    let n_classes = classes.len() as f64;
    let macro_precision = classes.iter().map(|class| class.precision).sum::<f64>() / n_classes;
    let macro_recall = classes.iter().map(|class| class.recall).sum::<f64>() / n_classes;
    let macro_f1 = classes.iter().map(|class| class.f1).sum::<f64>() / n_classes;

    Ok(StatisticsReport {
        total: confusion.total(),
        correct: confusion.correct(),
        accuracy: confusion.accuracy(),
        folds,
        mean_fold_accuracy,
        std_fold_accuracy,
        classes,
        macro_precision,
        macro_recall,
        macro_f1,
        confusion,
    })
}

impl Display for StatisticsReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Accuracy: {:.2}% ({}/{})",
            self.accuracy * 100.0,
            self.correct,
            self.total
        )?;
        writeln!(
            f,
            "Fold accuracy: mean {:.2}%, std {:.2}%",
            self.mean_fold_accuracy * 100.0,
            self.std_fold_accuracy * 100.0
        )?;
        for fold in &self.folds {
            writeln!(
                f,
                "  fold {:>2}: {:.2}% ({}/{})",
                fold.fold + 1,
                fold.accuracy * 100.0,
                fold.correct,
                fold.total
            )?;
        }

        let width = self
            .classes
            .iter()
            .map(|class| class.label.len())
            .chain([9])
            .max()
            .unwrap_or(9);
        writeln!(
            f,
            "{:<width$}  {:>9}  {:>9}  {:>9}  {:>7}",
            "Class",
            "Precision",
            "Recall",
            "F1",
            "Support",
            width = width
        )?;
        for class in &self.classes {
            writeln!(
                f,
                "{:<width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>7}",
                class.label,
                class.precision,
                class.recall,
                class.f1,
                class.support,
                width = width
            )?;
        }
        writeln!(
            f,
            "{:<width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>7}",
            "Macro avg",
            self.macro_precision,
            self.macro_recall,
            self.macro_f1,
            self.total,
            width = width
        )?;

        writeln!(f, "Confusion matrix (rows: actual, columns: predicted)")?;
        write!(f, "{:<width$}", "", width = width)?;
        for label in self.confusion.labels() {
            write!(f, "  {:>7}", label)?;
        }
        writeln!(f)?;
        let matrix = self.confusion.matrix();
        for (row, label) in self.confusion.labels().iter().enumerate() {
            write!(f, "{:<width$}", label, width = width)?;
            for col in 0..matrix.ncols() {
                write!(f, "  {:>7}", matrix[(row, col)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
