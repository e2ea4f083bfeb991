// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles row indices with a seeded RNG and cuts them into a test
// set and a training set:
//   - Training set: used to fit each model
//   - Test set:     held out, used only for scoring
//
// Sizes:
//   n_test  = ceil(test_fraction * n)
//   n_train = n - n_test
//
// The first n_test indices of the permutation form the test set.
// The same seed always yields the same permutation, so two runs on
// the same data produce the same partition (and the same scores).
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom on a StdRng
// seeded from the run seed.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::error::{PipelineError, PipelineResult};

/// Row indices of each partition, in permuted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test:  Vec<usize>,
}

/// Partition `0..n_rows` into (train, test) index sets.
///
/// Fails with InvalidSplit when `test_fraction` is not strictly
/// between 0 and 1, or when either partition would be empty.
pub fn split_indices(n_rows: usize, test_fraction: f64, seed: u64) -> PipelineResult<SplitIndices> {
    let invalid = || PipelineError::InvalidSplit { rows: n_rows, test_fraction };

    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(invalid());
    }

    let n_test  = (test_fraction * n_rows as f64).ceil() as usize;
    let n_train = n_rows.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(invalid());
    }

    let mut rng     = StdRng::seed_from_u64(seed);
    let mut indices = (0..n_rows).collect::<Vec<_>>();
    indices.shuffle(&mut rng);

    // split_off(n) removes [n..] → indices = test, rest = train
    let train = indices.split_off(n_test);

    tracing::debug!(
        "Dataset split: {} training, {} test (seed {})",
        train.len(),
        indices.len(),
        seed,
    );

    Ok(SplitIndices { train, test: indices })
}
