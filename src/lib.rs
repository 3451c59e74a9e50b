//! # id3-forest
//!
//! `id3-forest` builds ID3 decision trees and bagged random forests over
//! discretized tabular data, and reports k-fold cross-validated accuracy.
//!
//! ## Example Usage
//!
//! Discretize a small dataset, train a tree on it and classify a row:
//!
//! ```rust
//! use id3_forest::classifier::Classifier;
//! use id3_forest::data::dataset::Dataset;
//! use id3_forest::trees::classifier::DecisionTreeClassifier;
//!
//! let table = vec![
//!     vec!["temperature", "outlook", "play"],
//!     vec!["30", "sunny", "no"],
//!     vec!["18", "sunny", "yes"],
//!     vec!["21", "rainy", "yes"],
//!     vec!["33", "rainy", "no"],
//! ];
//! let table = table
//!     .into_iter()
//!     .map(|row| row.into_iter().map(String::from).collect())
//!     .collect();
//!
//! let dataset = Dataset::new(table, "play", None).unwrap();
//! let discretized = dataset.discretize_mean().unwrap();
//!
//! let mut tree = DecisionTreeClassifier::new();
//! tree.fit(&discretized).unwrap();
//!
//! assert_eq!(tree.classify(&discretized.rows()[0]).unwrap(), "no");
//! ```

/// The trait shared by trained models
pub mod classifier;
/// Data set presets and learner choices
pub mod config;
/// Datasets, values, discretization and file reading
pub mod data;
/// Error taxonomy
pub mod error;
/// End-to-end experiment runs
pub mod experiment;
/// Random Forests
pub mod forests;
/// Entropy, confusion matrices and statistics reports
pub mod metrics;
/// ID3 decision trees
pub mod trees;
/// k-fold cross-validation
pub mod validation;

pub use error::Id3Error;
