use crate::error::Id3Error;
use crate::trees::params::TreeParams;

/// Ensemble settings for [`RandomForestClassifier`](super::classifier::RandomForestClassifier).
#[derive(Clone, Debug)]
pub struct ForestParams {
    num_trees: usize,
    sample_size: Option<usize>,
    bootstrap: bool,
    max_features: Option<usize>,
    tree_params: TreeParams,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ForestParams {
    /// Ten fully grown trees, each on a bootstrap sample as large as the
    /// training set, with every attribute available to every tree.
    pub fn new() -> Self {
        Self {
            num_trees: 10,
            sample_size: None,
            bootstrap: true,
            max_features: None,
            tree_params: TreeParams::new(),
        }
    }

    pub fn set_num_trees(&mut self, num_trees: usize) -> Result<(), Id3Error> {
        if num_trees < 1 {
            return Err(Id3Error::InvalidEnsembleSize { ntree: num_trees });
        }
        self.num_trees = num_trees;
        Ok(())
    }

    /// `None` samples as many rows as the training set has.
    pub fn set_sample_size(&mut self, sample_size: Option<usize>) -> Result<(), Id3Error> {
        if let Some(sample_size @ 0) = sample_size {
            return Err(Id3Error::InvalidSampleSize { sample_size });
        }
        self.sample_size = sample_size;
        Ok(())
    }

    /// Without bootstrapping every tree is trained on the full training set.
    pub fn set_bootstrap(&mut self, bootstrap: bool) {
        self.bootstrap = bootstrap;
    }

    /// Number of attributes drawn at random for each tree. Checked against
    /// the attribute count when the forest is trained.
    pub fn set_max_features(&mut self, max_features: Option<usize>) -> Result<(), Id3Error> {
        if let Some(max_features @ 0) = max_features {
            return Err(Id3Error::InvalidFeatureCount { max_features });
        }
        self.max_features = max_features;
        Ok(())
    }

    pub fn set_tree_params(&mut self, tree_params: TreeParams) {
        self.tree_params = tree_params;
    }

    pub fn num_trees(&self) -> usize {
        self.num_trees
    }

    pub fn sample_size(&self) -> Option<usize> {
        self.sample_size
    }

    pub fn bootstrap(&self) -> bool {
        self.bootstrap
    }

    pub fn max_features(&self) -> Option<usize> {
        self.max_features
    }

    pub fn tree_params(&self) -> &TreeParams {
        &self.tree_params
    }

    /// Resolves the per-tree attribute count for `n_attributes` attributes.
    pub(crate) fn resolve_max_features(&self, n_attributes: usize) -> Result<usize, Id3Error> {
        match self.max_features {
            None => Ok(n_attributes),
            Some(max_features) if max_features >= 1 && max_features <= n_attributes => {
                Ok(max_features)
            }
            Some(max_features) => Err(Id3Error::InvalidMaxFeatures {
                max_features,
                n_attributes,
            }),
        }
    }
}
