//! ID3 Decision Tree Classifier
use super::{node::TreeNode, params::TreeParams};
use crate::{
    classifier::Classifier,
    data::dataset::{Dataset, Row},
    error::Id3Error,
    metrics::entropy::{class_counts, information_gain, majority_class},
};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use tracing::{debug, instrument};

/// Decision tree induced with ID3 over categorical attributes.
#[derive(Clone, Debug, Default)]
pub struct DecisionTreeClassifier {
    root: Option<TreeNode>,
    attributes: Vec<String>,
    tree_params: TreeParams,
}

impl DecisionTreeClassifier {
    /// Creates an untrained tree that grows until its leaves are pure or it
    /// runs out of attributes.
    pub fn new() -> Self {
        Self {
            root: None,
            attributes: Vec::new(),
            tree_params: TreeParams::new(),
        }
    }

    /// Creates an untrained tree with custom stopping criteria.
    ///
    /// # Arguments
    ///
    /// * `min_samples_split` - The minimum number of rows required to split a node.
    /// * `max_depth` - The maximum depth of the tree.
    ///
    /// # Errors
    ///
    /// This method will return an error if the minimum number of samples to split is less than 2 or if the maximum depth is less than 1.
    pub fn with_params(
        min_samples_split: Option<usize>,
        max_depth: Option<usize>,
    ) -> Result<Self, Id3Error> {
        let mut tree = Self::new();

        tree.set_min_samples_split(min_samples_split.unwrap_or(2))?;
        tree.set_max_depth(max_depth)?;
        Ok(tree)
    }

    pub(crate) fn from_params(tree_params: TreeParams) -> Self {
        Self {
            tree_params,
            ..Self::new()
        }
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: usize) -> Result<(), Id3Error> {
        self.tree_params.set_min_samples_split(min_samples_split)
    }

    pub fn set_max_depth(&mut self, max_depth: Option<usize>) -> Result<(), Id3Error> {
        self.tree_params.set_max_depth(max_depth)
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.tree_params.max_depth()
    }

    pub fn min_samples_split(&self) -> usize {
        self.tree_params.min_samples_split()
    }

    /// The induced tree, if trained.
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    /// Attribute names the node attribute indices refer to.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Builds the tree using every attribute of `dataset` as a candidate.
    /// A dataset without rows yields a single leaf labelled with its first
    /// class.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::EmptyDataset`] if `dataset` has no class labels.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<(), Id3Error> {
        self.fit_indices(dataset, (0..dataset.attributes().len()).collect())
    }

    /// Builds the tree choosing splits only among `candidates`.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::UnknownAttribute`] for a candidate that isn't an
    /// attribute of `dataset`, and [`Id3Error::EmptyDataset`] if it has no class
    /// labels.
    pub fn fit_with_attributes(
        &mut self,
        dataset: &Dataset,
        candidates: &[&str],
    ) -> Result<(), Id3Error> {
        let candidates = candidates
            .iter()
            .map(|name| dataset.attribute_index(name))
            .collect::<Result<Vec<_>, _>>()?;
        self.fit_indices(dataset, candidates)
    }

    #[instrument(skip_all, fields(rows = dataset.nrows(), candidates = candidates.len()))]
    pub(crate) fn fit_indices(
        &mut self,
        dataset: &Dataset,
        mut candidates: Vec<usize>,
    ) -> Result<(), Id3Error> {
        // an empty subset still yields a leaf, but needs a class to name it
        if dataset.classes().is_empty() {
            return Err(Id3Error::EmptyDataset);
        }
        // ties between equally good attributes go to declaration order
        candidates.sort_unstable();
        candidates.dedup();

        let rows: Vec<&Row> = dataset.rows().iter().collect();
        let root = self.build_tree(&rows, &candidates, dataset.classes(), 0);
        debug!(depth = root.depth(), leaves = root.leaves(), "built decision tree");

        self.attributes = dataset.attributes().to_vec();
        self.root = Some(root);
        Ok(())
    }

    fn build_tree(
        &self,
        rows: &[&Row],
        candidates: &[usize],
        classes: &[String],
        depth: usize,
    ) -> TreeNode {
        let counts = class_counts(rows.iter().copied(), classes);
        let majority = classes
            .get(majority_class(&counts))
            .cloned()
            .unwrap_or_default();
        let leaf = |label: String| TreeNode::Leaf {
            label,
            samples: rows.len(),
        };

        if counts.iter().filter(|count| **count > 0).count() == 1 {
            return leaf(majority);
        }

        // attributes constant over this subset carry no information here or below
        let informative: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&attribute| {
                rows.iter()
                    .any(|row| row.value(attribute) != rows[0].value(attribute))
            })
            .collect();

        let depth_reached = self.max_depth().is_some_and(|max_depth| depth >= max_depth);
        if informative.is_empty() || rows.len() < self.min_samples_split() || depth_reached {
            return leaf(majority);
        }

        let mut best = (informative[0], f64::NEG_INFINITY);
        for &attribute in &informative {
            let gain = information_gain(rows, attribute, classes);
            if gain > best.1 {
                best = (attribute, gain);
            }
        }
        let attribute = best.0;

        let mut partitions: BTreeMap<_, Vec<&Row>> = BTreeMap::new();
        for row in rows {
            if let Some(value) = row.value(attribute) {
                partitions.entry(value.clone()).or_default().push(*row);
            }
        }
        let remaining: Vec<usize> = informative
            .into_iter()
            .filter(|candidate| *candidate != attribute)
            .collect();
        let children = partitions
            .into_iter()
            .map(|(value, subset)| {
                let child = self.build_tree(&subset, &remaining, classes, depth + 1);
                (value, child)
            })
            .collect();

        TreeNode::Internal {
            attribute,
            children,
            majority,
            samples: rows.len(),
        }
    }

    fn render(&self, f: &mut Formatter<'_>, node: &TreeNode, depth: usize) -> fmt::Result {
        let indent = "|   ".repeat(depth);
        match node {
            TreeNode::Leaf { label, samples } => writeln!(f, "{}{} ({})", indent, label, samples),
            TreeNode::Internal {
                attribute,
                children,
                ..
            } => {
                let name = self
                    .attributes
                    .get(*attribute)
                    .map(String::as_str)
                    .unwrap_or("?");
                for (value, child) in children {
                    match child {
                        TreeNode::Leaf { label, samples } => {
                            writeln!(f, "{}{} = {}: {} ({})", indent, name, value, label, samples)?
                        }
                        TreeNode::Internal { .. } => {
                            writeln!(f, "{}{} = {}", indent, name, value)?;
                            self.render(f, child, depth + 1)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

impl Classifier for DecisionTreeClassifier {
    fn classify(&self, row: &Row) -> Result<&str, Id3Error> {
        self.root
            .as_ref()
            .map(|root| root.classify(row))
            .ok_or(Id3Error::NotFitted)
    }
}

/// Renders the induced structure, one line per branch.
impl Display for DecisionTreeClassifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => self.render(f, root, 0),
            None => writeln!(f, "(untrained)"),
        }
    }
}
