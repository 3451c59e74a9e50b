/// Errors from dataset handling, induction, and evaluation.
#[derive(Debug, thiserror::Error)]
pub enum Id3Error {
    /// Returned when an attribute mixes numeric and non-numeric values.
    #[error("attribute `{attribute}` mixes numeric and non-numeric values")]
    UnsupportedAttributeType {
        /// The offending attribute.
        attribute: String,
    },

    /// Returned when a forest is asked for zero trees.
    #[error("ensemble size must be at least 1, got {ntree}")]
    InvalidEnsembleSize {
        /// The invalid tree count.
        ntree: usize,
    },

    /// Returned when the fold count is below 2 or above the number of rows.
    #[error("invalid fold count {k}: must be at least 2 and at most the number of rows")]
    InvalidFoldCount {
        /// The invalid fold count.
        k: usize,
    },

    /// Returned when a row has no value for a declared attribute.
    #[error("row {row} has no value for attribute `{attribute}`")]
    MissingValue {
        /// Zero-based data row index (header excluded).
        row: usize,
        /// The attribute without a value.
        attribute: String,
    },

    /// Returned when two rows share an identifier value.
    #[error("identifier `{id}` appears more than once")]
    DuplicateIdentifier {
        /// The repeated identifier.
        id: String,
    },

    /// Returned when a row has more cells than the header has columns.
    #[error("row {row} has {found} values but the header has {expected} columns")]
    RowLength {
        /// Zero-based data row index (header excluded).
        row: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of cells in the row.
        found: usize,
    },

    /// Returned when an attribute name is not part of the dataset header.
    #[error("unknown attribute `{attribute}`")]
    UnknownAttribute {
        /// The name that was looked up.
        attribute: String,
    },

    /// Returned when there are no rows (or no header) to work with.
    #[error("dataset has no rows")]
    EmptyDataset,

    /// Returned when a classifier is used before it was trained.
    #[error("classifier wasn't trained yet")]
    NotFitted,

    /// Returned when statistics are requested over zero predictions.
    #[error("no predictions to summarize")]
    NoPredictions,

    /// Returned when min_samples_split is less than 2.
    #[error("min_samples_split must be at least 2, got {min_samples_split}")]
    InvalidMinSamplesSplit {
        /// The invalid value.
        min_samples_split: usize,
    },

    /// Returned when max_depth is zero.
    #[error("max_depth must be at least 1, got {max_depth}")]
    InvalidMaxDepth {
        /// The invalid value.
        max_depth: usize,
    },

    /// Returned when max_features is set to zero.
    #[error("max_features must be at least 1, got {max_features}")]
    InvalidFeatureCount {
        /// The invalid value.
        max_features: usize,
    },

    /// Returned when max_features exceeds the attribute count.
    #[error("max_features is {max_features}, but must be in [1, {n_attributes}]")]
    InvalidMaxFeatures {
        /// The requested number of attributes per tree.
        max_features: usize,
        /// The number of learning attributes available.
        n_attributes: usize,
    },

    /// Returned when the bootstrap sample size is zero.
    #[error("sample size must be at least 1, got {sample_size}")]
    InvalidSampleSize {
        /// The invalid value.
        sample_size: usize,
    },

    /// Returned for an unknown data set name.
    #[error("data set `{name}` is not supported (expected one of benchmark, diabetes, wine, ionosphere, cancer)")]
    UnsupportedDataSet {
        /// The requested name.
        name: String,
    },

    /// Returned for an unknown algorithm name.
    #[error("algorithm `{name}` is not supported (expected id3_decision_tree or id3_random_forest)")]
    UnsupportedAlgorithm {
        /// The requested name.
        name: String,
    },

    /// Returned for an unknown discretization name.
    #[error("discretization `{name}` is not supported (expected mean, quartiles or information_gain)")]
    UnsupportedDiscretization {
        /// The requested name.
        name: String,
    },

    /// Wraps failures of the CSV reader.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
