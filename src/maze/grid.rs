use crate::{
    error::MazeError,
    maze::{Cell, Coord, Direction},
};

/// A rectangular grid of maze cells addressed by `(x, y)`.
///
/// The grid is written only by the generator (passages and carved flags) and the
/// solver (visited flags); everything else gets read access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Cell]>,
    width: u16,
    height: u16,
}

impl Grid {
    /// Creates a grid where every cell is uncarved, unvisited and walled on all sides.
    pub fn new(width: u16, height: u16) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::EmptyGrid { width, height });
        }
        let data = vec![Cell::default(); width as usize * height as usize].into_boxed_slice();
        Ok(Grid {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false, a grid holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The top-left corner, where solving starts by default.
    pub fn start(&self) -> Coord {
        (0, 0)
    }

    /// The bottom-right corner, where solving ends by default.
    pub fn goal(&self) -> Coord {
        (self.width - 1, self.height - 1)
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }

    fn checked_index(&self, coord: Coord) -> Result<usize, MazeError> {
        if self.is_in_bounds(coord) {
            Ok(self.ravel_index(coord.0, coord.1))
        } else {
            Err(MazeError::OutOfBounds {
                x: coord.0,
                y: coord.1,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Returns the cell at `(x, y)`, or `OutOfBounds`.
    pub fn at(&self, x: u16, y: u16) -> Result<&Cell, MazeError> {
        self.cell((x, y))
    }

    pub fn cell(&self, coord: Coord) -> Result<&Cell, MazeError> {
        let idx = self.checked_index(coord)?;
        Ok(&self.data[idx])
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Result<&mut Cell, MazeError> {
        let idx = self.checked_index(coord)?;
        Ok(&mut self.data[idx])
    }

    /// The in-bounds neighbour of `coord` in `direction`, if any.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        if !self.is_in_bounds(coord) {
            return None;
        }
        let (x, y) = coord;
        // NOTE: wrapping_sub turns 0 - 1 into u16::MAX and saturating_add clamps at
        // u16::MAX, both of which fail the bounds check below since dimensions are at most u16::MAX.
        let next = match direction {
            Direction::Left => (x.wrapping_sub(1), y),
            Direction::Right => (x.saturating_add(1), y),
            Direction::Up => (x, y.wrapping_sub(1)),
            Direction::Down => (x, y.saturating_add(1)),
        };
        self.is_in_bounds(next).then_some(next)
    }

    /// Iterate all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Iterate all cells with their coordinates in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.coords().zip(self.data.iter())
    }

    /// True when at least one cell has been carved.
    pub fn is_touched(&self) -> bool {
        self.data.iter().any(Cell::is_carved)
    }

    /// True when every cell has been carved into the spanning tree.
    pub fn is_generated(&self) -> bool {
        self.data.iter().all(Cell::is_carved)
    }

    /// Number of undirected passages. Each passage is stored on both of its cells,
    /// so only `Right` and `Down` openings are counted.
    pub fn passage_count(&self) -> usize {
        self.data
            .iter()
            .map(|cell| {
                usize::from(cell.has_passage(Direction::Right))
                    + usize::from(cell.has_passage(Direction::Down))
            })
            .sum()
    }

    /// True when `from` has an open passage in `direction` to an in-bounds neighbour.
    pub fn is_open(&self, from: Coord, direction: Direction) -> bool {
        self.neighbor(from, direction).is_some()
            && self
                .cell(from)
                .is_ok_and(|cell| cell.has_passage(direction))
    }

    /// Opens a passage from `from` towards `direction` on both cells and returns the neighbour.
    pub(crate) fn open_passage(
        &mut self,
        from: Coord,
        direction: Direction,
    ) -> Result<Coord, MazeError> {
        let to = self.neighbor(from, direction).ok_or_else(|| {
            let (dx, dy) = direction.offset();
            MazeError::OutOfBounds {
                x: (i32::from(from.0) + dx).clamp(0, i32::from(u16::MAX)) as u16,
                y: (i32::from(from.1) + dy).clamp(0, i32::from(u16::MAX)) as u16,
                width: self.width,
                height: self.height,
            }
        })?;
        self.cell_mut(from)?.open(direction);
        self.cell_mut(to)?.open(direction.opposite());
        Ok(to)
    }

    pub(crate) fn mark_carved(&mut self, coord: Coord) -> Result<(), MazeError> {
        self.cell_mut(coord)?.carve();
        Ok(())
    }

    pub(crate) fn mark_visited(&mut self, coord: Coord) -> Result<(), MazeError> {
        self.cell_mut(coord)?.visit();
        Ok(())
    }

    /// Resets every visited flag so the grid can be solved again.
    pub fn clear_visited(&mut self) {
        self.data.iter_mut().for_each(Cell::unvisit);
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        assert!(
            self.is_in_bounds(index),
            "coordinate {index:?} is out of bounds for a {}x{} grid",
            self.width,
            self.height
        );
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_blank() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.size(), (4, 3));
        assert_eq!(grid.len(), 12);
        assert!(!grid.is_touched());
        assert!(!grid.is_generated());
        assert_eq!(grid.passage_count(), 0);
        assert_eq!(grid.goal(), (3, 2));
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(MazeError::EmptyGrid {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::new(5, 0).is_err());
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(grid.at(4, 4).is_ok());
        assert_eq!(
            grid.at(5, 0),
            Err(MazeError::OutOfBounds {
                x: 5,
                y: 0,
                width: 5,
                height: 5
            })
        );
        assert!(grid.at(0, 5).is_err());
        assert!(!grid.is_in_bounds((5, 5)));
    }

    #[test]
    fn test_neighbor_at_edges() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.neighbor((0, 0), Direction::Left), None);
        assert_eq!(grid.neighbor((0, 0), Direction::Up), None);
        assert_eq!(grid.neighbor((0, 0), Direction::Right), Some((1, 0)));
        assert_eq!(grid.neighbor((1, 1), Direction::Down), None);
        assert_eq!(grid.neighbor((1, 1), Direction::Up), Some((1, 0)));
        assert_eq!(grid.neighbor((7, 7), Direction::Up), None);
    }

    #[test]
    fn test_open_passage_is_reciprocal() {
        let mut grid = Grid::new(3, 3).unwrap();
        let to = grid.open_passage((1, 1), Direction::Up).unwrap();
        assert_eq!(to, (1, 0));
        assert!(grid[(1, 1)].has_passage(Direction::Up));
        assert!(grid[(1, 0)].has_passage(Direction::Down));
        assert!(grid.is_open((1, 0), Direction::Down));
        assert_eq!(grid.passage_count(), 1);
    }

    #[test]
    fn test_open_passage_off_the_edge_fails() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(matches!(
            grid.open_passage((2, 2), Direction::Right),
            Err(MazeError::OutOfBounds { x: 3, y: 2, .. })
        ));
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn test_clear_visited() {
        let mut grid = Grid::new(2, 1).unwrap();
        grid.mark_visited((1, 0)).unwrap();
        assert!(grid[(1, 0)].is_visited());
        grid.clear_visited();
        assert!(grid.cells().all(|(_, cell)| !cell.is_visited()));
    }

    #[test]
    fn test_coords_are_row_major() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            grid.coords().collect::<Vec<_>>(),
            vec![(0, 0), (1, 0), (0, 1), (1, 1)]
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let grid = Grid::new(2, 2).unwrap();
        let _cell = &grid[(2, 0)];
    }
}
