//! k-fold cross-validation over any [`Classifier`].

use rand::Rng;
use tracing::{debug, info, instrument};

use super::kfold::KFold;
use crate::classifier::Classifier;
use crate::data::dataset::Dataset;
use crate::error::Id3Error;

/// Actual and predicted label of one held-out row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionRecord {
    /// Zero-based fold the row was held out in.
    pub fold: usize,
    pub id: Option<String>,
    pub actual: String,
    pub predicted: String,
}

impl PredictionRecord {
    pub fn is_correct(&self) -> bool {
        self.actual == self.predicted
    }
}

/// Trains on k-1 folds and predicts the held-out fold, k times.
#[derive(Clone, Debug)]
pub struct CrossValidator {
    kfold: KFold,
}

impl CrossValidator {
    /// # Errors
    ///
    /// Returns [`Id3Error::InvalidFoldCount`] if `k` < 2.
    pub fn new(k: usize) -> Result<Self, Id3Error> {
        Ok(Self {
            kfold: KFold::new(k)?,
        })
    }

    pub fn k(&self) -> usize {
        self.kfold.k()
    }

    /// Runs the k rounds and returns every prediction, in fold order and
    /// then in the fold's row order.
    ///
    /// `build` receives a freshly materialized training set and the shared
    /// random source, so fold assignment and any resampling inside `build`
    /// are reproducible from a single seed.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::InvalidFoldCount`] | More folds than rows |
    /// | Other variants | From `build` or from classification |
    #[instrument(skip_all, fields(k = self.k(), rows = dataset.nrows()))]
    pub fn evaluate<M, R, F>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
        mut build: F,
    ) -> Result<Vec<PredictionRecord>, Id3Error>
    where
        M: Classifier,
        R: Rng,
        F: FnMut(&Dataset, &mut R) -> Result<M, Id3Error>,
    {
        let folds = self.kfold.split(dataset.nrows(), rng)?;
        let mut records = Vec::with_capacity(dataset.nrows());

        for (fold, test_indices) in folds.iter().enumerate() {
            let train_indices: Vec<usize> = folds
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != fold)
                .flat_map(|(_, indices)| indices.iter().copied())
                .collect();
            let train = dataset.subset(&train_indices);
            let test = dataset.subset(test_indices);
            debug!(fold, train = train.nrows(), test = test.nrows(), "training fold");

            let model = build(&train, rng)?;

            let mut correct = 0;
            for row in test.rows() {
                let record = PredictionRecord {
                    fold,
                    id: row.id().map(str::to_string),
                    actual: row.class().to_string(),
                    predicted: model.classify(row)?.to_string(),
                };
                correct += usize::from(record.is_correct());
                records.push(record);
            }
            info!(
                fold,
                accuracy = correct as f64 / test.nrows() as f64,
                "fold evaluated"
            );
        }

        Ok(records)
    }
}
