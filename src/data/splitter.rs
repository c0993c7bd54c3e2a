// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles row indices with a seeded RNG and cuts them into a
// test partition and a train partition.
//
//   n_test  = ceil(test_size * n)
//   n_train = n - n_test
//
// The first n_test shuffled rows form the test set and the rest
// form the train set, each kept in shuffled order.
//
// Determinism: the RNG is a StdRng seeded from `seed`, so the
// same (table, test_size, seed) always yields the same
// membership. Nothing is drawn from thread_rng().
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: rand crate documentation (SeedableRng)

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::error::PipelineError;
use crate::domain::table::Table;

/// Reject test fractions outside the open interval (0, 1).
pub fn validate_test_size(test_size: f64) -> Result<(), PipelineError> {
    if test_size.is_finite() && test_size > 0.0 && test_size < 1.0 {
        Ok(())
    } else {
        Err(PipelineError::InvalidArgument(format!(
            "test_size must be in (0, 1), got {test_size}"
        )))
    }
}

/// Split `table` into (train, test).
///
/// # Arguments
/// * `test_size` - Proportion of rows that go to the test set, in (0, 1)
/// * `seed`      - Seed for the shuffle; fixes partition membership
pub fn split(table: &Table, test_size: f64, seed: u64) -> Result<(Table, Table), PipelineError> {
    validate_test_size(test_size)?;

    let total = table.len();
    if total == 0 {
        return Err(PipelineError::EmptyData(
            "cannot split a table with no rows".to_string(),
        ));
    }

    let n_test = ((total as f64) * test_size).ceil() as usize;
    if n_test >= total {
        return Err(PipelineError::InvalidArgument(format!(
            "test_size {test_size} with {total} rows leaves the train partition empty"
        )));
    }

    let mut indices: Vec<usize> = (0..total).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    let train = table.select_rows(train_idx);
    let test  = table.select_rows(test_idx);

    tracing::debug!(
        "Dataset split: {} train, {} test (test_size={}, seed={})",
        train.len(),
        test.len(),
        test_size,
        seed,
    );

    Ok((train, test))
}
