//! Perfect maze generation by randomized depth-first carving, and path finding by
//! depth-first search with backtracking.
//!
//! ```
//! use dfsmaze::{Grid, NoopObserver, generate, get_rng, solve};
//!
//! let mut grid = Grid::new(10, 10)?;
//! generate(&mut grid, &mut get_rng(Some(1)), &mut NoopObserver)?;
//! let path = solve(&mut grid, &mut NoopObserver)?;
//! assert_eq!(path.start(), Some((0, 0)));
//! assert_eq!(path.goal(), Some((9, 9)));
//! # Ok::<(), dfsmaze::MazeError>(())
//! ```
//!
//! The [`app`] module holds the terminal front end; the rest of the crate knows
//! nothing about drawing.

pub mod app;
pub mod error;
pub mod generators;
pub mod maze;
pub mod observer;
pub mod solvers;

pub use error::MazeError;
pub use generators::{RandomSource, generate, get_rng};
pub use maze::{Cell, Coord, Direction, Grid, Passages};
pub use observer::{ChannelObserver, NoopObserver, Phase, StepEvent, StepKind, StepObserver};
pub use solvers::{Path, solve, solve_between};
