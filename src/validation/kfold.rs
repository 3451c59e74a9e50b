use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Id3Error;

/// Partition of row indices into `k` disjoint folds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KFold {
    k: usize,
}

impl KFold {
    /// # Errors
    ///
    /// Returns [`Id3Error::InvalidFoldCount`] if `k` < 2.
    pub fn new(k: usize) -> Result<Self, Id3Error> {
        if k < 2 {
            return Err(Id3Error::InvalidFoldCount { k });
        }
        Ok(Self { k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Shuffles `0..nrows` and slices it into `k` contiguous folds whose
    /// sizes differ by at most one; the first `nrows % k` folds are larger.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::InvalidFoldCount`] if `k` > `nrows`, which would
    /// leave a fold empty.
    pub fn split(&self, nrows: usize, rng: &mut impl Rng) -> Result<Vec<Vec<usize>>, Id3Error> {
        if self.k > nrows {
            return Err(Id3Error::InvalidFoldCount { k: self.k });
        }
        let mut indices = (0..nrows).collect::<Vec<_>>();
        indices.shuffle(rng);

        let base = nrows / self.k;
        let larger = nrows % self.k;
        let mut folds = Vec::with_capacity(self.k);
        let mut start = 0;
        for fold in 0..self.k {
            let size = base + usize::from(fold < larger);
            folds.push(indices[start..start + size].to_vec());
            start += size;
        }
        Ok(folds)
    }
}
