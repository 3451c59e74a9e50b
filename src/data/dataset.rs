use rand::Rng;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashSet;
use std::fmt::{self, Debug, Formatter};

use super::value::Value;
use crate::error::Id3Error;

/// Builds the random source threaded through fold assignment and bootstrap
/// sampling. Without a seed the generator is seeded from system entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// One data row: learning attribute values, class label and optional identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    id: Option<String>,
    values: Vec<Value>,
    class: String,
}

impl Row {
    pub fn new(id: Option<String>, values: Vec<Value>, class: impl Into<String>) -> Self {
        Self {
            id,
            values,
            class: class.into(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Values aligned with [`Dataset::attributes`].
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, attribute_index: usize) -> Option<&Value> {
        self.values.get(attribute_index)
    }

    pub fn class(&self) -> &str {
        &self.class
    }
}

/// Tabular data with one designated class attribute.
///
/// A dataset is read-only once built: transforms such as
/// [`Dataset::discretize`] and [`Dataset::subset`]
/// return a new dataset that owns its own row copies.
#[derive(Clone)]
pub struct Dataset {
    attributes: Vec<String>,
    class_attribute: String,
    id_attribute: Option<String>,
    classes: Vec<String>,
    rows: Vec<Row>,
}

impl Debug for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset {{")?;
        writeln!(f, "    attributes: {:?},", self.attributes)?;
        writeln!(f, "    class: {:?},", self.class_attribute)?;
        writeln!(f, "    rows: [")?;
        for row in &self.rows {
            write!(f, "        [")?;
            for value in &row.values {
                write!(f, "{}, ", value)?;
            }
            writeln!(f, "] -> {},", row.class)?;
        }
        write!(f, "    ]\n}}")
    }
}

impl Dataset {
    /// Builds a dataset from raw parsed rows whose first row is the header.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::EmptyDataset`] | No header or no data rows |
    /// | [`Id3Error::UnknownAttribute`] | Class or identifier column not in the header |
    /// | [`Id3Error::MissingValue`] | A row is short or has an empty cell |
    /// | [`Id3Error::RowLength`] | A row has more cells than the header |
    /// | [`Id3Error::DuplicateIdentifier`] | Two rows share an identifier |
    pub fn new(
        table: Vec<Vec<String>>,
        class_attribute: &str,
        id_attribute: Option<&str>,
    ) -> Result<Self, Id3Error> {
        let mut table = table.into_iter();
        let header = table.next().ok_or(Id3Error::EmptyDataset)?;
        Self::from_records(&header, table.collect(), class_attribute, id_attribute)
    }

    /// Builds a dataset from a header and the data rows that follow it.
    pub fn from_records(
        header: &[String],
        records: Vec<Vec<String>>,
        class_attribute: &str,
        id_attribute: Option<&str>,
    ) -> Result<Self, Id3Error> {
        if records.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }
        let header: Vec<String> = header.iter().map(|name| name.trim().to_string()).collect();
        let position = |name: &str| {
            header
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| Id3Error::UnknownAttribute {
                    attribute: name.to_string(),
                })
        };
        let class_index = position(class_attribute)?;
        let id_index = id_attribute.map(position).transpose()?;

        let attribute_columns: Vec<usize> = (0..header.len())
            .filter(|&column| column != class_index && Some(column) != id_index)
            .collect();
        let attributes = attribute_columns
            .iter()
            .map(|&column| header[column].clone())
            .collect();

        let mut classes: Vec<String> = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut rows = Vec::with_capacity(records.len());

        for (row_index, record) in records.into_iter().enumerate() {
            if record.len() > header.len() {
                return Err(Id3Error::RowLength {
                    row: row_index,
                    expected: header.len(),
                    found: record.len(),
                });
            }
            let cell = |column: usize| {
                match record.get(column).map(|raw| raw.trim()) {
                    Some(raw) if !raw.is_empty() => Ok(raw),
                    _ => Err(Id3Error::MissingValue {
                        row: row_index,
                        attribute: header[column].clone(),
                    }),
                }
            };

            let values = attribute_columns
                .iter()
                .map(|&column| cell(column).map(Value::parse))
                .collect::<Result<Vec<_>, _>>()?;

            let class = cell(class_index)?.to_string();
            if !classes.contains(&class) {
                classes.push(class.clone());
            }

            let id = match id_index {
                Some(column) => {
                    let id = cell(column)?.to_string();
                    if !seen_ids.insert(id.clone()) {
                        return Err(Id3Error::DuplicateIdentifier { id });
                    }
                    Some(id)
                }
                None => None,
            };

            rows.push(Row { id, values, class });
        }

        Ok(Self {
            attributes,
            class_attribute: class_attribute.to_string(),
            id_attribute: id_attribute.map(str::to_string),
            classes,
            rows,
        })
    }

    /// Learning attributes in declaration order; class and identifier excluded.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn attribute_index(&self, name: &str) -> Result<usize, Id3Error> {
        self.attributes
            .iter()
            .position(|attribute| attribute == name)
            .ok_or_else(|| Id3Error::UnknownAttribute {
                attribute: name.to_string(),
            })
    }

    pub fn class_attribute(&self) -> &str {
        &self.class_attribute
    }

    pub fn id_attribute(&self) -> Option<&str> {
        self.id_attribute.as_deref()
    }

    /// Class labels in order of first appearance. Every tie between classes
    /// is broken in favour of the label listed first here.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Looks up the value of `attribute` in row `row`.
    pub fn value(&self, row: usize, attribute: &str) -> Result<&Value, Id3Error> {
        let index = self.attribute_index(attribute)?;
        self.rows
            .get(row)
            .and_then(|row| row.value(index))
            .ok_or_else(|| Id3Error::MissingValue {
                row,
                attribute: attribute.to_string(),
            })
    }

    /// New dataset with the same schema and class list holding `rows`.
    pub(crate) fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            attributes: self.attributes.clone(),
            class_attribute: self.class_attribute.clone(),
            id_attribute: self.id_attribute.clone(),
            classes: self.classes.clone(),
            rows,
        }
    }

    /// Copies the rows at `indices`, in that order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        self.with_rows(indices.iter().map(|&index| self.rows[index].clone()).collect())
    }

    /// Draws `sample_size` rows with replacement.
    pub fn samples(&self, sample_size: usize, rng: &mut impl Rng) -> Self {
        let nrows = self.nrows();
        if nrows == 0 {
            return self.with_rows(Vec::new());
        }
        let sample_indices = (0..sample_size)
            .map(|_| rng.gen_range(0..nrows))
            .collect::<Vec<_>>();
        self.subset(&sample_indices)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    pub(crate) fn weather() -> Dataset {
        Dataset::new(
            table(&[
                &["A", "class"],
                &["sunny", "play"],
                &["sunny", "play"],
                &["rainy", "noplay"],
                &["rainy", "noplay"],
            ]),
            "class",
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_dataset_new() {
        let dataset = Dataset::new(
            table(&[
                &["id", "width", "colour", "kind"],
                &["a", "1.5", "red", "x"],
                &["b", "2", "blue", "y"],
            ]),
            "kind",
            Some("id"),
        )
        .unwrap();

        assert_eq!(dataset.attributes(), &["width".to_string(), "colour".to_string()]);
        assert_eq!(dataset.class_attribute(), "kind");
        assert_eq!(dataset.id_attribute(), Some("id"));
        assert_eq!(dataset.classes(), &["x".to_string(), "y".to_string()]);
        assert_eq!(dataset.nrows(), 2);
        assert_eq!(dataset.rows()[1].id(), Some("b"));
        assert_eq!(dataset.value(0, "width").unwrap(), &Value::Numeric(1.5));
        assert_eq!(dataset.value(1, "colour").unwrap(), &Value::from("blue"));
    }

    #[test]
    fn test_dataset_missing_value() {
        let result = Dataset::new(
            table(&[&["a", "b", "class"], &["1", "2", "x"], &["1", " ", "y"]]),
            "class",
            None,
        );
        assert!(matches!(
            result,
            Err(Id3Error::MissingValue { row: 1, ref attribute }) if attribute == "b"
        ));

        let short = Dataset::new(table(&[&["a", "class"], &["1"]]), "class", None);
        assert!(matches!(short, Err(Id3Error::MissingValue { row: 0, .. })));
    }

    #[test]
    fn test_dataset_row_longer_than_header() {
        let result = Dataset::new(
            table(&[&["a", "class"], &["1", "x"], &["2", "y", "extra"]]),
            "class",
            None,
        );
        assert!(matches!(
            result,
            Err(Id3Error::RowLength {
                row: 1,
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_dataset_duplicate_identifier() {
        let result = Dataset::new(
            table(&[&["id", "a", "class"], &["7", "1", "x"], &["7", "2", "y"]]),
            "class",
            Some("id"),
        );
        assert!(matches!(result, Err(Id3Error::DuplicateIdentifier { ref id }) if id == "7"));
    }

    #[test]
    fn test_dataset_unknown_class_attribute() {
        let result = Dataset::new(table(&[&["a", "b"], &["1", "2"]]), "class", None);
        assert!(matches!(result, Err(Id3Error::UnknownAttribute { .. })));
    }

    #[test]
    fn test_dataset_empty() {
        assert!(matches!(
            Dataset::new(Vec::new(), "class", None),
            Err(Id3Error::EmptyDataset)
        ));
        assert!(matches!(
            Dataset::new(table(&[&["a", "class"]]), "class", None),
            Err(Id3Error::EmptyDataset)
        ));
    }

    #[test]
    fn test_dataset_subset() {
        let dataset = weather();
        let subset = dataset.subset(&[3, 0]);
        assert_eq!(subset.nrows(), 2);
        assert_eq!(subset.rows()[0].class(), "noplay");
        assert_eq!(subset.rows()[1].class(), "play");
        assert_eq!(subset.classes(), dataset.classes());
        assert_eq!(dataset.nrows(), 4);
    }

    #[test]
    fn test_dataset_samples_with_seed() {
        let dataset = weather();
        let first = dataset.samples(10, &mut seeded_rng(Some(1000)));
        let second = dataset.samples(10, &mut seeded_rng(Some(1000)));
        assert_eq!(first.nrows(), 10);
        assert_eq!(first.rows(), second.rows());
    }

    #[test]
    fn test_dataset_formatting() {
        let dataset = Dataset::new(table(&[&["a", "class"], &["1", "x"]]), "class", None).unwrap();
        let expected = "\
Dataset {
    attributes: [\"a\"],
    class: \"class\",
    rows: [
        [1, ] -> x,
    ]
}";
        assert_eq!(format!("{:?}", dataset), expected);
    }
}
