//! Class impurity measures shared by tree induction and discretization.
use std::collections::BTreeMap;

use crate::data::dataset::Row;

/// Shannon entropy, in bits, of a class count distribution.
///
/// Empty classes contribute nothing (`0 log 0 = 0`) and an empty
/// distribution has zero entropy.
pub fn entropy(counts: &[usize]) -> f64 {
    let total = counts.iter().sum::<usize>() as f64;
    if total == 0.0 {
        return 0.0;
    }
    counts
        .iter()
        .filter(|count| **count > 0)
        .map(|count| *count as f64 / total)
        .map(|frac| -frac * frac.log2())
        .fold(0., |acc, v| acc + v)
}

/// Counts the rows of each class, indexed like `classes`.
pub fn class_counts<'a>(rows: impl IntoIterator<Item = &'a Row>, classes: &[String]) -> Vec<usize> {
    let mut counts = vec![0; classes.len()];
    for row in rows {
        if let Some(index) = classes.iter().position(|class| class == row.class()) {
            counts[index] += 1;
        }
    }
    counts
}

/// Index of the most frequent class. Ties go to the lowest index, and an
/// all-zero distribution yields 0.
pub fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (index, count) in counts.iter().enumerate() {
        if *count > counts[best] {
            best = index;
        }
    }
    best
}

/// Entropy of the parent minus the size-weighted entropy of its partitions.
pub fn split_gain(parent: &[usize], partitions: &[Vec<usize>]) -> f64 {
    let total = parent.iter().sum::<usize>() as f64;
    if total == 0.0 {
        return 0.0;
    }
    let remainder = partitions
        .iter()
        .map(|counts| counts.iter().sum::<usize>() as f64 / total * entropy(counts))
        .fold(0., |acc, v| acc + v);
    entropy(parent) - remainder
}

/// Information gain of splitting `rows` on every distinct value of the
/// attribute at `attribute`.
pub fn information_gain(rows: &[&Row], attribute: usize, classes: &[String]) -> f64 {
    let parent = class_counts(rows.iter().copied(), classes);
    let mut partitions: BTreeMap<_, Vec<usize>> = BTreeMap::new();
    for row in rows {
        let Some(value) = row.value(attribute) else {
            continue;
        };
        let counts = partitions
            .entry(value)
            .or_insert_with(|| vec![0; classes.len()]);
        if let Some(index) = classes.iter().position(|class| class == row.class()) {
            counts[index] += 1;
        }
    }
    split_gain(&parent, &partitions.into_values().collect::<Vec<_>>())
}
