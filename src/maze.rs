pub mod cell;
pub mod grid;

pub use cell::{Cell, Passages};
pub use grid::Grid;

/// A cell position as `(x, y)`, with `(0, 0)` in the top-left corner.
pub type Coord = (u16, u16);

/// One of the four cardinal directions a passage can lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions in the order neighbours are examined by the generator
    /// and passages are tried by the solver.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The direction pointing back from the neighbour.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// The `(dx, dy)` step taken when moving in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub(crate) fn bit(self) -> u8 {
        match self {
            Direction::Left => 0b0001,
            Direction::Right => 0b0010,
            Direction::Up => 0b0100,
            Direction::Down => 0b1000,
        }
    }

    /// The direction leading from `from` to the adjacent cell `to`, if they are adjacent.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        Direction::ALL.into_iter().find(|&direction| {
            let (dx, dy) = direction.offset();
            i32::from(from.0) + dx == i32::from(to.0) && i32::from(from.1) + dy == i32::from(to.1)
        })
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Get the in-bounds neighbours of a cell, paired with the direction leading to them.
/// Neighbours are yielded in [`Direction::ALL`] order.
pub fn get_neighbors(grid: &Grid, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| grid.neighbor(coord, direction).map(|n| (direction, n)))
}
