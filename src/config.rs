//! Run configuration: data set presets and learner choices.
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Id3Error;

pub use crate::data::discretize::Discretization;

/// Number of trees in a forest unless configured otherwise.
pub const DEFAULT_NTREE: usize = 10;
/// Number of cross-validation folds unless configured otherwise.
pub const DEFAULT_FOLDS: usize = 10;

/// Reading instructions for one of the bundled data sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSetPreset {
    pub name: &'static str,
    pub file_name: &'static str,
    pub delimiter: u8,
    pub class_attribute: &'static str,
    pub id_attribute: Option<&'static str>,
}

const PRESETS: [DataSetPreset; 5] = [
    DataSetPreset {
        name: "benchmark",
        file_name: "benchmark.csv",
        delimiter: b';',
        class_attribute: "Joga",
        id_attribute: None,
    },
    DataSetPreset {
        name: "diabetes",
        file_name: "diabetes.csv",
        delimiter: b',',
        class_attribute: "Outcome",
        id_attribute: None,
    },
    DataSetPreset {
        name: "wine",
        file_name: "wine.csv",
        delimiter: b',',
        class_attribute: "Type",
        id_attribute: None,
    },
    DataSetPreset {
        name: "ionosphere",
        file_name: "ionosphere.csv",
        delimiter: b',',
        class_attribute: "radar",
        id_attribute: None,
    },
    DataSetPreset {
        name: "cancer",
        file_name: "cancer.csv",
        delimiter: b',',
        class_attribute: "diagnosis",
        id_attribute: Some("id"),
    },
];

impl DataSetPreset {
    pub fn all() -> &'static [DataSetPreset] {
        &PRESETS
    }

    /// Location of the data set's file inside `sets_dir`.
    pub fn path(&self, sets_dir: &Path) -> PathBuf {
        sets_dir.join(self.file_name)
    }
}

impl FromStr for DataSetPreset {
    type Err = Id3Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim();
        PRESETS
            .iter()
            .find(|preset| preset.name == name)
            .cloned()
            .ok_or_else(|| Id3Error::UnsupportedDataSet {
                name: name.to_string(),
            })
    }
}

/// Which learner an experiment trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    DecisionTree,
    RandomForest,
}

impl FromStr for Algorithm {
    type Err = Id3Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim() {
            "id3_decision_tree" => Ok(Algorithm::DecisionTree),
            "id3_random_forest" => Ok(Algorithm::RandomForest),
            other => Err(Id3Error::UnsupportedAlgorithm {
                name: other.to_string(),
            }),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::DecisionTree => write!(f, "id3_decision_tree"),
            Algorithm::RandomForest => write!(f, "id3_random_forest"),
        }
    }
}
