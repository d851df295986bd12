use std::ops::Range;

use rand::{Rng, SeedableRng, rngs::StdRng};

mod backtrack;

use crate::{error::MazeError, maze::Grid, observer::StepObserver};
use backtrack::randomized_dfs;

/// Source of uniform random choices used by the generator.
///
/// Every [`rand::Rng`] is a `RandomSource`; tests can plug in a deterministic one.
pub trait RandomSource {
    /// Pick an index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
    /// Pick a value in `range`. The range must be non-empty.
    fn pick_range(&mut self, range: Range<u16>) -> u16;
}

impl<R: Rng> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    fn pick_range(&mut self, range: Range<u16>) -> u16 {
        self.random_range(range)
    }
}

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Carve a perfect maze into a fresh grid with randomized depth-first search.
///
/// # Errors
/// * `AlreadyGenerated` if any cell of `grid` is carved already; the grid is left untouched.
/// * `Aborted` if `observer` returned `Break`; the grid is left partially carved.
pub fn generate<R, O>(grid: &mut Grid, rng: &mut R, observer: &mut O) -> Result<(), MazeError>
where
    R: RandomSource + ?Sized,
    O: StepObserver + ?Sized,
{
    if grid.is_touched() {
        return Err(MazeError::AlreadyGenerated);
    }
    tracing::debug!(
        "[generate] carving {}x{} grid",
        grid.width(),
        grid.height()
    );
    let result = randomized_dfs(grid, rng, observer);
    match &result {
        Ok(()) => tracing::debug!(
            "[generate] done, {} passages opened",
            grid.passage_count()
        ),
        Err(e) => tracing::debug!("[generate] stopped: {}", e),
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Always picks the first candidate and the lowest value in a range.
    pub(crate) struct FirstPick;

    impl RandomSource for FirstPick {
        fn pick_index(&mut self, _len: usize) -> usize {
            0
        }

        fn pick_range(&mut self, range: Range<u16>) -> u16 {
            range.start
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = get_rng(Some(7));
        let mut b = get_rng(Some(7));
        let picks_a = (0..16).map(|_| a.pick_index(10)).collect::<Vec<_>>();
        let picks_b = (0..16).map(|_| b.pick_index(10)).collect::<Vec<_>>();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_rng_picks_stay_in_range() {
        let mut rng = get_rng(Some(1));
        for _ in 0..100 {
            assert!(rng.pick_index(3) < 3);
            assert!((4..9).contains(&rng.pick_range(4..9)));
        }
    }
}
