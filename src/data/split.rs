use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::{Error, Result};

/// Row indices of a single train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Split {
    /// Materializes the (train, test) rows of `rows`.
    pub fn select<T: Clone>(&self, rows: &[T]) -> (Vec<T>, Vec<T>) {
        let pick = |idx: &[usize]| -> Vec<T> { idx.iter().map(|&i| rows[i].clone()).collect() };
        (pick(&self.train), pick(&self.test))
    }
}

/// Shuffles `0..n` with a seeded RNG and holds out `ceil(test_size · n)`
/// samples for testing.
///
/// `test_size` must lie strictly between 0 and 1 and leave at least one
/// sample on each side.
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> Result<Split> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(Error::Config(format!("test_size must be in (0, 1), got {}", test_size)));
    }
    let n_test = (test_size * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(Error::Dataset(format!(
            "cannot split {} samples with test_size {}: one side would be empty", n, test_size
        )));
    }

    let mut permutation: Vec<usize> = (0..n).collect();
    permutation.shuffle(&mut StdRng::seed_from_u64(seed));
    let train = permutation.split_off(n_test);

    Ok(Split { train, test: permutation })
}
