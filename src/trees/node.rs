use std::collections::BTreeMap;

use crate::data::dataset::Row;
use crate::data::value::Value;

/// Decision tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    Leaf {
        label: String,
        samples: usize,
    },
    Internal {
        /// Index into the training dataset's attributes.
        attribute: usize,
        children: BTreeMap<Value, TreeNode>,
        /// Most frequent class of the training rows that reached this node.
        majority: String,
        samples: usize,
    },
}

impl TreeNode {
    /// Walks down from this node. Values never seen here during training
    /// resolve to the node's majority class.
    pub fn classify(&self, row: &Row) -> &str {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { label, .. } => return label,
                TreeNode::Internal {
                    attribute,
                    children,
                    majority,
                    ..
                } => match row.value(*attribute).and_then(|value| children.get(value)) {
                    Some(child) => node = child,
                    None => return majority,
                },
            }
        }
    }

    pub fn samples(&self) -> usize {
        match self {
            TreeNode::Leaf { samples, .. } | TreeNode::Internal { samples, .. } => *samples,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { children, .. } => {
                1 + children.values().map(TreeNode::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { children, .. } => children.values().map(TreeNode::leaves).sum(),
        }
    }
}
