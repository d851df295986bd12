use crate::maze::Direction;

/// The set of directions in which a cell has an open passage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Passages(u8);

impl Passages {
    pub const NONE: Passages = Passages(0);

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the open directions in [`Direction::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| self.contains(direction))
    }

    pub(crate) fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }
}

impl FromIterator<Direction> for Passages {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        let mut passages = Passages::NONE;
        iter.into_iter().for_each(|direction| passages.insert(direction));
        passages
    }
}

/// A single maze cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Directions with an open passage to the neighbouring cell
    passages: Passages,
    /// Set once the cell joins the spanning tree, never reset
    carved: bool,
    /// Set once the solver steps onto the cell during the current run
    visited: bool,
}

impl Cell {
    pub fn passages(&self) -> Passages {
        self.passages
    }

    pub fn has_passage(&self, direction: Direction) -> bool {
        self.passages.contains(direction)
    }

    pub fn is_carved(&self) -> bool {
        self.carved
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn open(&mut self, direction: Direction) {
        self.passages.insert(direction);
    }

    pub(crate) fn carve(&mut self) {
        self.carved = true;
    }

    pub(crate) fn visit(&mut self) {
        self.visited = true;
    }

    pub(crate) fn unvisit(&mut self) {
        self.visited = false;
    }
}
