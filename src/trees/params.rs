use crate::error::Id3Error;

/// Stopping criteria for ID3 induction. The defaults grow the full tree.
#[derive(Clone, Debug)]
pub struct TreeParams {
    pub min_samples_split: usize,
    pub max_depth: Option<usize>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParams {
    pub fn new() -> Self {
        Self {
            min_samples_split: 2,
            max_depth: None,
        }
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: usize) -> Result<(), Id3Error> {
        if min_samples_split < 2 {
            return Err(Id3Error::InvalidMinSamplesSplit { min_samples_split });
        }
        self.min_samples_split = min_samples_split;
        Ok(())
    }

    pub fn set_max_depth(&mut self, max_depth: Option<usize>) -> Result<(), Id3Error> {
        if let Some(max_depth @ 0) = max_depth {
            return Err(Id3Error::InvalidMaxDepth { max_depth });
        }
        self.max_depth = max_depth;
        Ok(())
    }

    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_params_defaults() {
        let params = TreeParams::default();
        assert_eq!(params.min_samples_split(), 2);
        assert_eq!(params.max_depth(), None);
    }

    #[test]
    fn test_tree_params_validation() {
        let mut params = TreeParams::new();
        assert!(matches!(
            params.set_min_samples_split(1),
            Err(Id3Error::InvalidMinSamplesSplit { min_samples_split: 1 })
        ));
        assert!(matches!(
            params.set_max_depth(Some(0)),
            Err(Id3Error::InvalidMaxDepth { max_depth: 0 })
        ));
        params.set_max_depth(Some(3)).unwrap();
        params.set_min_samples_split(5).unwrap();
        assert_eq!(params.max_depth(), Some(3));
        assert_eq!(params.min_samples_split(), 5);
    }
}
