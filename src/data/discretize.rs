//! Discretization of numeric attributes into categorical buckets.
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use tracing::{debug, instrument};

use super::dataset::{Dataset, Row};
use super::value::Value;
use crate::error::Id3Error;
use crate::metrics::entropy::split_gain;

/// How numeric attributes are turned into buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discretization {
    /// Two buckets around the attribute mean.
    Mean,
    /// Four buckets bounded by the quartiles.
    Quartiles,
    /// Two buckets around the midpoint with the highest information gain.
    InformationGain,
}

impl FromStr for Discretization {
    type Err = Id3Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim() {
            "mean" => Ok(Discretization::Mean),
            "quartiles" | "quartile" => Ok(Discretization::Quartiles),
            "information_gain" => Ok(Discretization::InformationGain),
            other => Err(Id3Error::UnsupportedDiscretization {
                name: other.to_string(),
            }),
        }
    }
}

impl Display for Discretization {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Discretization::Mean => "mean",
            Discretization::Quartiles => "quartiles",
            Discretization::InformationGain => "information_gain",
        };
        write!(f, "{}", name)
    }
}

/// Ordered buckets: a value goes to the first bucket whose upper bound it
/// does not exceed, or to the last bucket.
#[derive(Debug, Clone, PartialEq)]
struct Buckets {
    bounds: Vec<f64>,
    labels: Vec<String>,
}

impl Buckets {
    fn label(&self, value: f64) -> &str {
        let index = self
            .bounds
            .iter()
            .position(|bound| value <= *bound)
            .unwrap_or(self.bounds.len());
        &self.labels[index]
    }

    fn mean(values: &[f64]) -> Self {
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Self {
            bounds: vec![mean],
            labels: vec!["<=mean".to_string(), ">mean".to_string()],
        }
    }

    fn quartiles(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Self {
            bounds: vec![
                percentile(&sorted, 0.25),
                percentile(&sorted, 0.5),
                percentile(&sorted, 0.75),
            ],
            labels: vec![
                "<=Q1".to_string(),
                "(Q1,Q2]".to_string(),
                "(Q2,Q3]".to_string(),
                ">Q3".to_string(),
            ],
        }
    }

    fn information_gain(values: &[f64], rows: &[Row], classes: &[String]) -> Self {
        let threshold = best_threshold(values, rows, classes);
        Self {
            bounds: vec![threshold],
            labels: vec![format!("<={}", threshold), format!(">{}", threshold)],
        }
    }
}

/// Percentile of sorted, non-empty values with linear interpolation between
/// closest ranks.
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let position = fraction * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

/// Midpoint between consecutive distinct values that maximizes the gain of
/// a binary split. Constant columns yield their only value.
fn best_threshold(values: &[f64], rows: &[Row], classes: &[String]) -> f64 {
    let mut pairs: Vec<(f64, usize)> = values
        .iter()
        .zip(rows)
        .map(|(value, row)| {
            let class = classes
                .iter()
                .position(|class| class == row.class())
                .unwrap_or_default();
            (*value, class)
        })
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut total = vec![0; classes.len()];
    for (_, class) in &pairs {
        total[*class] += 1;
    }

    let mut left = vec![0; classes.len()];
    let mut best = (pairs[0].0, f64::NEG_INFINITY);
    for window in pairs.windows(2) {
        let ((value, class), (next, _)) = (window[0], window[1]);
        left[class] += 1;
        if value == next {
            continue;
        }
        let right: Vec<usize> = total.iter().zip(&left).map(|(t, l)| t - l).collect();
        let gain = split_gain(&total, &[left.clone(), right]);
        if gain > best.1 {
            best = ((value + next) / 2.0, gain);
        }
    }
    best.0
}

/// Numeric values of one attribute, `None` when the attribute is categorical.
fn numeric_column(dataset: &Dataset, index: usize) -> Result<Option<Vec<f64>>, Id3Error> {
    let values: Vec<Option<f64>> = dataset
        .rows()
        .iter()
        .map(|row| row.value(index).and_then(Value::as_f64))
        .collect();
    let numeric = values.iter().filter(|value| value.is_some()).count();
    if numeric == 0 {
        Ok(None)
    } else if numeric == values.len() {
        Ok(Some(values.into_iter().flatten().collect()))
    } else {
        Err(Id3Error::UnsupportedAttributeType {
            attribute: dataset.attributes()[index].clone(),
        })
    }
}

impl Dataset {
    /// Returns a new dataset whose numeric attributes are replaced by bucket
    /// labels. Categorical attributes, the class, and identifiers are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::UnsupportedAttributeType`] if an attribute mixes
    /// numeric and non-numeric values.
    #[instrument(skip_all, fields(strategy = %strategy, rows = self.nrows()))]
    pub fn discretize(&self, strategy: Discretization) -> Result<Dataset, Id3Error> {
        let mut buckets = Vec::with_capacity(self.attributes().len());
        for (index, attribute) in self.attributes().iter().enumerate() {
            let column = numeric_column(self, index)?.map(|values| match strategy {
                Discretization::Mean => Buckets::mean(&values),
                Discretization::Quartiles => Buckets::quartiles(&values),
                Discretization::InformationGain => {
                    Buckets::information_gain(&values, self.rows(), self.classes())
                }
            });
            if let Some(column) = &column {
                debug!(attribute = %attribute, bounds = ?column.bounds, "discretized attribute");
            }
            buckets.push(column);
        }

        let rows = self
            .rows()
            .iter()
            .map(|row| {
                let values = row
                    .values()
                    .iter()
                    .zip(&buckets)
                    .map(|(value, buckets)| match (value, buckets) {
                        (Value::Numeric(number), Some(buckets)) => {
                            Value::Categorical(buckets.label(*number).to_string())
                        }
                        (value, _) => value.clone(),
                    })
                    .collect();
                Row::new(row.id().map(str::to_string), values, row.class())
            })
            .collect();
        Ok(self.with_rows(rows))
    }

    /// Buckets every numeric attribute into `<=mean` / `>mean`.
    pub fn discretize_mean(&self) -> Result<Dataset, Id3Error> {
        self.discretize(Discretization::Mean)
    }

    /// Buckets every numeric attribute by its quartiles.
    pub fn discretize_quartile(&self) -> Result<Dataset, Id3Error> {
        self.discretize(Discretization::Quartiles)
    }

    /// Buckets every numeric attribute around its best information-gain threshold.
    pub fn discretize_information_gain(&self) -> Result<Dataset, Id3Error> {
        self.discretize(Discretization::InformationGain)
    }
}
