use crate::data::dataset::{Dataset, Row};
use crate::error::Id3Error;

/// A trained model that assigns a class label to a row.
pub trait Classifier {
    /// Predicts the class label of a single row.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::NotFitted`] if the model wasn't trained yet.
    fn classify(&self, row: &Row) -> Result<&str, Id3Error>;

    /// Predicts the class label of every row of `dataset`, in row order.
    fn predict(&self, dataset: &Dataset) -> Result<Vec<String>, Id3Error> {
        dataset
            .rows()
            .iter()
            .map(|row| self.classify(row).map(str::to_string))
            .collect()
    }
}
