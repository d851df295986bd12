mod dfs;

use crate::{
    error::MazeError,
    maze::{Coord, Grid},
    observer::StepObserver,
};
use dfs::solve_dfs;

/// A walk through the maze from a start cell to a goal cell, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Coord>);

impl Path {
    pub fn as_slice(&self) -> &[Coord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn start(&self) -> Option<Coord> {
        self.0.first().copied()
    }

    pub fn goal(&self) -> Option<Coord> {
        self.0.last().copied()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.0.contains(&coord)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Coord> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Solve a generated maze from the top-left corner to the bottom-right corner.
///
/// # Errors
/// See [`solve_between`].
pub fn solve<O>(grid: &mut Grid, observer: &mut O) -> Result<Path, MazeError>
where
    O: StepObserver + ?Sized,
{
    let (start, goal) = (grid.start(), grid.goal());
    solve_between(grid, start, goal, observer)
}

/// Solve a generated maze between two arbitrary cells.
///
/// Visited flags from a previous run are cleared first, so the same grid can be
/// solved repeatedly.
///
/// # Errors
/// * `OutOfBounds` if `start` or `goal` lies outside the grid.
/// * `NotGenerated` if the grid still has uncarved cells.
/// * `Unsolvable` if every reachable cell was explored without finding `goal`.
/// * `Aborted` if `observer` returned `Break`.
pub fn solve_between<O>(
    grid: &mut Grid,
    start: Coord,
    goal: Coord,
    observer: &mut O,
) -> Result<Path, MazeError>
where
    O: StepObserver + ?Sized,
{
    grid.cell(start)?;
    grid.cell(goal)?;
    if !grid.is_generated() {
        return Err(MazeError::NotGenerated);
    }
    grid.clear_visited();

    tracing::debug!("[solve] searching from {:?} to {:?}", start, goal);
    let result = solve_dfs(grid, start, goal, observer).map(Path);
    match &result {
        Ok(path) => tracing::debug!("[solve] path found with {} cells", path.len()),
        Err(e) => tracing::debug!("[solve] stopped: {}", e),
    }
    result
}
