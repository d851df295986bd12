use thiserror::Error;

use crate::maze::Coord;

/// Errors returned by grid access, generation and solving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// A coordinate outside the grid was requested.
    #[error("coordinate ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },
    /// `generate` was called on a grid that already has carved cells.
    #[error("the grid has already been generated")]
    AlreadyGenerated,
    /// `solve` was called on a grid that still has uncarved cells.
    #[error("the grid has not been generated yet")]
    NotGenerated,
    /// The solver ran out of cells to explore before reaching the goal.
    #[error("no path from {start:?} to {goal:?}")]
    Unsolvable { start: Coord, goal: Coord },
    /// The step observer asked the algorithm to stop.
    #[error("aborted by step observer")]
    Aborted,
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
}
