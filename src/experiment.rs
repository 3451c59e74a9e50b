//! One end-to-end run: discretize, train, cross-validate, summarize.
use rand::rngs::StdRng;
use tracing::{info, instrument, warn};

use crate::config::{Algorithm, Discretization, DEFAULT_FOLDS, DEFAULT_NTREE};
use crate::data::dataset::{seeded_rng, Dataset};
use crate::error::Id3Error;
use crate::forests::{classifier::RandomForestClassifier, params::ForestParams};
use crate::metrics::report::{summarize, StatisticsReport};
use crate::trees::classifier::DecisionTreeClassifier;
use crate::validation::cross_validation::{CrossValidator, PredictionRecord};

/// A validated experiment configuration.
///
/// Construct via [`Experiment::new`], then chain `with_ntree`, `with_folds`
/// and `with_seed` as needed. Invalid sizes are rejected here, before any
/// data is read.
#[derive(Clone, Debug)]
pub struct Experiment {
    algorithm: Algorithm,
    discretization: Discretization,
    forest_params: ForestParams,
    validator: CrossValidator,
    seed: Option<u64>,
}

/// Outcome of [`Experiment::run`].
#[derive(Debug)]
pub struct ExperimentReport {
    /// Tree induced on the whole discretized dataset, for tree experiments.
    pub tree: Option<DecisionTreeClassifier>,
    pub records: Vec<PredictionRecord>,
    pub statistics: StatisticsReport,
}

impl Experiment {
    pub fn new(algorithm: Algorithm, discretization: Discretization) -> Result<Self, Id3Error> {
        let mut forest_params = ForestParams::new();
        forest_params.set_num_trees(DEFAULT_NTREE)?;
        Ok(Self {
            algorithm,
            discretization,
            forest_params,
            validator: CrossValidator::new(DEFAULT_FOLDS)?,
            seed: None,
        })
    }

    /// # Errors
    ///
    /// Returns [`Id3Error::InvalidEnsembleSize`] if `ntree` is zero.
    pub fn with_ntree(mut self, ntree: usize) -> Result<Self, Id3Error> {
        self.forest_params.set_num_trees(ntree)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`Id3Error::InvalidFoldCount`] if `folds` < 2.
    pub fn with_folds(mut self, folds: usize) -> Result<Self, Id3Error> {
        self.validator = CrossValidator::new(folds)?;
        Ok(self)
    }

    /// Attribute subsampling for forest members.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::InvalidFeatureCount`] if `max_features` is zero.
    pub fn with_max_features(mut self, max_features: Option<usize>) -> Result<Self, Id3Error> {
        self.forest_params.set_max_features(max_features)?;
        Ok(self)
    }

    /// Seeds fold assignment and bootstrap sampling; unseeded runs draw
    /// from system entropy.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn discretization(&self) -> Discretization {
        self.discretization
    }

    pub fn ntree(&self) -> usize {
        self.forest_params.num_trees()
    }

    pub fn folds(&self) -> usize {
        self.validator.k()
    }

    /// Discretizes `dataset` and cross-validates the configured learner on
    /// it. Tree experiments also induce one tree on the full dataset and
    /// write its structure to the log.
    ///
    /// # Errors
    ///
    /// [`Id3Error::InvalidMaxFeatures`] when a forest would draw more
    /// attributes than `dataset` has, data errors from discretization,
    /// [`Id3Error::InvalidFoldCount`] when there are fewer rows than folds,
    /// and any training error.
    #[instrument(skip_all, fields(algorithm = %self.algorithm, discretization = %self.discretization))]
    pub fn run(&self, dataset: &Dataset) -> Result<ExperimentReport, Id3Error> {
        match self.algorithm {
            Algorithm::RandomForest => {
                self.forest_params
                    .resolve_max_features(dataset.attributes().len())?;
            }
            Algorithm::DecisionTree => {
                if let Some(max_features) = self.forest_params.max_features() {
                    warn!(max_features, "max_features only applies to random forests, ignoring it");
                }
            }
        }

        let discretized = dataset.discretize(self.discretization)?;
        let mut rng = seeded_rng(self.seed);

        let (tree, records) = match self.algorithm {
            Algorithm::DecisionTree => {
                let mut tree = DecisionTreeClassifier::new();
                tree.fit(&discretized)?;
                if let Some(root) = tree.root() {
                    info!(
                        depth = root.depth(),
                        leaves = root.leaves(),
                        samples = root.samples(),
                        "induced decision tree"
                    );
                }
                for line in tree.to_string().lines() {
                    info!("{}", line);
                }

                let records = self.validator.evaluate(
                    &discretized,
                    &mut rng,
                    |train: &Dataset, _: &mut StdRng| -> Result<_, Id3Error> {
                        let mut tree = DecisionTreeClassifier::new();
                        tree.fit(train)?;
                        Ok(tree)
                    },
                )?;
                (Some(tree), records)
            }
            Algorithm::RandomForest => {
                let records = self.validator.evaluate(
                    &discretized,
                    &mut rng,
                    |train: &Dataset, rng: &mut StdRng| -> Result<_, Id3Error> {
                        let mut forest = RandomForestClassifier::from_params(self.forest_params.clone());
                        forest.fit(train, rng)?;
                        Ok(forest)
                    },
                )?;
                (None, records)
            }
        };

        let statistics = summarize(&records)?;
        info!(
            accuracy = statistics.accuracy,
            mean_fold_accuracy = statistics.mean_fold_accuracy,
            std_fold_accuracy = statistics.std_fold_accuracy,
            "cross-validation finished"
        );

        Ok(ExperimentReport {
            tree,
            records,
            statistics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sizes_are_rejected_eagerly() {
        let experiment = Experiment::new(Algorithm::RandomForest, Discretization::Mean).unwrap();
        assert!(matches!(
            experiment.clone().with_ntree(0),
            Err(Id3Error::InvalidEnsembleSize { ntree: 0 })
        ));
        assert!(matches!(
            experiment.with_folds(1),
            Err(Id3Error::InvalidFoldCount { k: 1 })
        ));
    }

    fn readings(n: usize) -> Dataset {
        let mut rows = vec![vec![
            "id".to_string(),
            "glucose".to_string(),
            "bmi".to_string(),
            "outcome".to_string(),
        ]];
        for i in 0..n {
            let sick = i % 2 == 0;
            let glucose = if sick { 150 + i } else { 80 + i % 7 };
            let bmi = 20.0 + (i % 5) as f64 * 1.5;
            rows.push(vec![
                format!("p{}", i),
                glucose.to_string(),
                bmi.to_string(),
                if sick { "1" } else { "0" }.to_string(),
            ]);
        }
        Dataset::new(rows, "outcome", Some("id")).unwrap()
    }

    #[test]
    fn test_tree_run_logs_tree_and_validates() {
        let dataset = readings(20);
        let report = Experiment::new(Algorithm::DecisionTree, Discretization::Mean)
            .unwrap()
            .with_folds(5)
            .unwrap()
            .with_seed(Some(3))
            .run(&dataset)
            .unwrap();

        let tree = report.tree.unwrap();
        assert!(tree.to_string().starts_with("glucose = "));
        assert_eq!(report.records.len(), 20);
        assert_eq!(report.statistics.folds.len(), 5);
        assert_eq!(report.statistics.correct, 20);
    }

    #[test]
    fn test_forest_run_is_reproducible() {
        let dataset = readings(30);
        let experiment = Experiment::new(Algorithm::RandomForest, Discretization::InformationGain)
            .unwrap()
            .with_ntree(5)
            .unwrap()
            .with_folds(3)
            .unwrap()
            .with_seed(Some(42));

        let first = experiment.run(&dataset).unwrap();
        let second = experiment.run(&dataset).unwrap();
        assert!(first.tree.is_none());
        assert_eq!(first.records, second.records);
        assert_eq!(first.statistics, second.statistics);
        assert_eq!(first.statistics.total, 30);
    }

    #[test]
    fn test_more_folds_than_rows() {
        let dataset = readings(4);
        let result = Experiment::new(Algorithm::DecisionTree, Discretization::Quartiles)
            .unwrap()
            .with_folds(5)
            .unwrap()
            .run(&dataset);
        assert!(matches!(result, Err(Id3Error::InvalidFoldCount { k: 5 })));
    }

    #[test]
    fn test_max_features_checked_before_learning() {
        assert!(matches!(
            Experiment::new(Algorithm::RandomForest, Discretization::Mean)
                .unwrap()
                .with_max_features(Some(0)),
            Err(Id3Error::InvalidFeatureCount { max_features: 0 })
        ));

        // the mixed column would fail discretization if it ran first
        let dataset = Dataset::new(
            vec![
                vec!["x".to_string(), "class".to_string()],
                vec!["1".to_string(), "a".to_string()],
                vec!["high".to_string(), "b".to_string()],
            ],
            "class",
            None,
        )
        .unwrap();
        let result = Experiment::new(Algorithm::RandomForest, Discretization::Mean)
            .unwrap()
            .with_folds(2)
            .unwrap()
            .with_max_features(Some(3))
            .unwrap()
            .run(&dataset);
        assert!(matches!(
            result,
            Err(Id3Error::InvalidMaxFeatures {
                max_features: 3,
                n_attributes: 1
            })
        ));
    }

    #[test]
    fn test_defaults() {
        let experiment = Experiment::new(Algorithm::DecisionTree, Discretization::Quartiles).unwrap();
        assert_eq!(experiment.ntree(), 10);
        assert_eq!(experiment.folds(), 10);
        assert_eq!(experiment.algorithm(), Algorithm::DecisionTree);
        assert_eq!(experiment.discretization(), Discretization::Quartiles);
    }
}
