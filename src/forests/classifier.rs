//! Random Forest Classifier
use super::params::ForestParams;
use crate::{
    classifier::Classifier,
    data::dataset::{Dataset, Row},
    error::Id3Error,
    metrics::entropy::majority_class,
    trees::classifier::DecisionTreeClassifier,
};
use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Bagged ensemble of ID3 trees that classifies by majority vote.
#[derive(Clone, Debug, Default)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTreeClassifier>,
    classes: Vec<String>,
    params: ForestParams,
}

impl RandomForestClassifier {
    pub fn new() -> Self {
        Self {
            trees: Vec::new(),
            classes: Vec::new(),
            params: ForestParams::new(),
        }
    }

    /// Creates an untrained forest.
    ///
    /// # Arguments
    ///
    /// * `num_trees` - Number of trees, 10 when `None`.
    /// * `sample_size` - Rows drawn per tree, the training set size when `None`.
    /// * `max_features` - Attributes drawn per tree, all of them when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::InvalidEnsembleSize`] for zero trees,
    /// [`Id3Error::InvalidSampleSize`] for a zero sample size and
    /// [`Id3Error::InvalidFeatureCount`] for zero attributes per tree.
    pub fn with_params(
        num_trees: Option<usize>,
        sample_size: Option<usize>,
        max_features: Option<usize>,
    ) -> Result<Self, Id3Error> {
        let mut forest = Self::new();

        forest.params.set_num_trees(num_trees.unwrap_or(10))?;
        forest.params.set_sample_size(sample_size)?;
        forest.params.set_max_features(max_features)?;
        Ok(forest)
    }

    pub fn from_params(params: ForestParams) -> Self {
        Self {
            params,
            ..Self::new()
        }
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ForestParams {
        &mut self.params
    }

    /// The trained members, in training order.
    pub fn trees(&self) -> &[DecisionTreeClassifier] {
        &self.trees
    }

    /// Trains every member on its own resample of `dataset`.
    ///
    /// Per-tree seeds are drawn from `rng` before the trees are built in
    /// parallel, so a given seed always yields the same forest.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::InvalidEnsembleSize`] | Zero trees requested |
    /// | [`Id3Error::EmptyDataset`] | `dataset` has no class labels |
    /// | [`Id3Error::InvalidMaxFeatures`] | More attributes per tree than available |
    #[instrument(skip_all, fields(num_trees = self.params.num_trees(), rows = dataset.nrows()))]
    pub fn fit(&mut self, dataset: &Dataset, rng: &mut impl Rng) -> Result<(), Id3Error> {
        let num_trees = self.params.num_trees();
        if num_trees < 1 {
            return Err(Id3Error::InvalidEnsembleSize { ntree: num_trees });
        }
        if dataset.classes().is_empty() {
            return Err(Id3Error::EmptyDataset);
        }
        let n_attributes = dataset.attributes().len();
        let max_features = self.params.resolve_max_features(n_attributes)?;
        let sample_size = self.params.sample_size().unwrap_or(dataset.nrows());
        let bootstrap = self.params.bootstrap();
        let tree_params = self.params.tree_params().clone();

        debug!(sample_size, max_features, bootstrap, "training random forest");

        let seeds = (0..num_trees).map(|_| rng.gen::<u64>()).collect::<Vec<_>>();
        let trees: Result<Vec<_>, Id3Error> = seeds
            .into_par_iter()
            .map(|tree_seed| {
                let mut rng = StdRng::seed_from_u64(tree_seed);
                let subset = if bootstrap {
                    dataset.samples(sample_size, &mut rng)
                } else {
                    dataset.clone()
                };
                let candidates = if max_features < n_attributes {
                    index::sample(&mut rng, n_attributes, max_features).into_vec()
                } else {
                    (0..n_attributes).collect()
                };
                let mut tree = DecisionTreeClassifier::from_params(tree_params.clone());
                tree.fit_indices(&subset, candidates)?;
                Ok(tree)
            })
            .collect();

        self.trees = trees?;
        self.classes = dataset.classes().to_vec();
        Ok(())
    }
}

impl Classifier for RandomForestClassifier {
    /// Majority vote of the member trees; ties go to the class seen first in
    /// the training data.
    fn classify(&self, row: &Row) -> Result<&str, Id3Error> {
        if self.trees.is_empty() {
            return Err(Id3Error::NotFitted);
        }
        let mut votes = vec![0; self.classes.len()];
        for tree in &self.trees {
            let label = tree.classify(row)?;
            if let Some(index) = self.classes.iter().position(|class| class == label) {
                votes[index] += 1;
            }
        }
        Ok(&self.classes[majority_class(&votes)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::seeded_rng;
    use crate::data::dataset::tests::{table, weather};
    use crate::data::value::Value;

    fn animals() -> Dataset {
        Dataset::new(
            table(&[
                &["legs", "fur", "size", "class"],
                &["4", "yes", "big", "mammal"],
                &["4", "yes", "small", "mammal"],
                &["2", "no", "small", "bird"],
                &["2", "no", "big", "bird"],
                &["0", "no", "small", "fish"],
                &["0", "no", "big", "fish"],
                &["4", "no", "small", "reptile"],
                &["4", "no", "big", "reptile"],
                &["2", "yes", "big", "mammal"],
                &["0", "yes", "big", "mammal"],
            ]),
            "class",
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_ensemble_size() {
        assert!(matches!(
            RandomForestClassifier::with_params(Some(0), None, None),
            Err(Id3Error::InvalidEnsembleSize { ntree: 0 })
        ));
    }

    #[test]
    fn test_fit_builds_num_trees() {
        let mut forest = RandomForestClassifier::with_params(Some(7), None, None).unwrap();
        forest.fit(&animals(), &mut seeded_rng(Some(3))).unwrap();
        assert_eq!(forest.trees().len(), 7);
    }

    #[test]
    fn test_same_seed_same_predictions() {
        let dataset = animals();
        let mut first = RandomForestClassifier::with_params(Some(15), None, Some(2)).unwrap();
        let mut second = RandomForestClassifier::with_params(Some(15), None, Some(2)).unwrap();
        first.fit(&dataset, &mut seeded_rng(Some(42))).unwrap();
        second.fit(&dataset, &mut seeded_rng(Some(42))).unwrap();

        assert_eq!(first.predict(&dataset).unwrap(), second.predict(&dataset).unwrap());
        for (a, b) in first.trees().iter().zip(second.trees()) {
            assert_eq!(a.root(), b.root());
        }
    }

    #[test]
    fn test_single_tree_without_resampling_matches_tree() {
        let dataset = animals();
        let mut forest = RandomForestClassifier::with_params(Some(1), None, None).unwrap();
        forest.params_mut().set_bootstrap(false);
        forest.fit(&dataset, &mut seeded_rng(Some(9))).unwrap();

        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&dataset).unwrap();

        assert_eq!(forest.predict(&dataset).unwrap(), tree.predict(&dataset).unwrap());
        assert_eq!(forest.trees()[0].root(), tree.root());
    }

    #[test]
    fn test_invalid_max_features() {
        let mut forest = RandomForestClassifier::with_params(Some(2), None, Some(4)).unwrap();
        let result = forest.fit(&animals(), &mut seeded_rng(Some(1)));
        assert!(matches!(
            result,
            Err(Id3Error::InvalidMaxFeatures {
                max_features: 4,
                n_attributes: 3
            })
        ));
    }

    #[test]
    fn test_classify_known_rows() {
        let dataset = weather();
        let mut forest = RandomForestClassifier::with_params(Some(5), None, None).unwrap();
        forest.params_mut().set_bootstrap(false);
        forest.fit(&dataset, &mut seeded_rng(None)).unwrap();

        let sunny = Row::new(None, vec![Value::from("sunny")], "?");
        let rainy = Row::new(None, vec![Value::from("rainy")], "?");
        assert_eq!(forest.classify(&sunny).unwrap(), "play");
        assert_eq!(forest.classify(&rainy).unwrap(), "noplay");
    }

    #[test]
    fn test_vote_tie_goes_to_first_class() {
        let dataset = Dataset::new(
            table(&[&["a", "class"], &["0", "x"], &["1", "y"]]),
            "class",
            None,
        )
        .unwrap();
        let mut only_x = DecisionTreeClassifier::new();
        only_x.fit(&dataset.subset(&[0])).unwrap();
        let mut only_y = DecisionTreeClassifier::new();
        only_y.fit(&dataset.subset(&[1])).unwrap();

        let row = Row::new(None, vec![Value::from(0.0)], "x");
        for trees in [
            vec![only_x.clone(), only_y.clone()],
            vec![only_y, only_x],
        ] {
            let forest = RandomForestClassifier {
                trees,
                classes: dataset.classes().to_vec(),
                params: ForestParams::new(),
            };
            assert_eq!(forest.classify(&row).unwrap(), "x");
        }
    }

    #[test]
    fn test_fit_on_empty_subset() {
        let empty = animals().subset(&[]);
        let mut forest = RandomForestClassifier::with_params(Some(3), None, None).unwrap();
        forest.fit(&empty, &mut seeded_rng(Some(2))).unwrap();

        let row = Row::new(
            None,
            vec![Value::from(4.0), Value::from("yes"), Value::from("big")],
            "?",
        );
        assert_eq!(forest.classify(&row).unwrap(), "mammal");
    }

    #[test]
    fn test_not_fitted() {
        let forest = RandomForestClassifier::new();
        let row = Row::new(None, vec![Value::from("sunny")], "play");
        assert!(matches!(forest.classify(&row), Err(Id3Error::NotFitted)));
    }
}
