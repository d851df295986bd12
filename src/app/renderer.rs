use std::{collections::HashSet, fmt, io::Write};

use crossterm::{
    cursor, queue,
    style::{self, Color, Stylize},
};

use crate::{
    maze::{Coord, Direction, Grid},
    solvers::Path,
};

/// One square of the drawing. The drawing has a square for every cell and one for
/// every wall slot between and around cells, so an `n x m` grid draws as
/// `(2n + 1) x (2m + 1)` glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Open,
    Visited,
    Route,
    Goal,
    /// The cell the running algorithm just touched
    Cursor,
}

impl Glyph {
    /// The width of each glyph when rendered, in character widths.
    pub const WIDTH: u16 = 2;

    pub fn symbol(self) -> &'static str {
        match self {
            Glyph::Wall => "██",
            Glyph::Open => "  ",
            Glyph::Visited => "░░",
            Glyph::Route => "()",
            Glyph::Goal => "[]",
            Glyph::Cursor => "@@",
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.symbol();

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                symbol.width(),
                Glyph::WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        let styled_symbol = match self {
            Glyph::Wall => symbol.with(Color::White),
            Glyph::Open => symbol.with(Color::Reset),
            Glyph::Visited => symbol.with(Color::DarkGrey),
            Glyph::Route => symbol.with(Color::Blue),
            Glyph::Goal => symbol.with(Color::Yellow),
            Glyph::Cursor => symbol.with(Color::Green),
        };
        write!(f, "{}", styled_symbol)
    }
}

/// What to draw on top of the bare walls.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overlay<'a> {
    pub path: Option<&'a Path>,
    pub cursor: Option<Coord>,
    pub goal: Option<Coord>,
    pub show_visited: bool,
}

/// A snapshot of the grid as glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    glyphs: Box<[Glyph]>,
    width: usize,
    height: usize,
}

impl Frame {
    /// Glyph columns and rows needed to draw `grid`.
    /// n cells in each dimension -> n + 1 walls -> 2n + 1 total
    pub fn dimensions(grid: &Grid) -> (usize, usize) {
        (
            usize::from(grid.width()) * 2 + 1,
            usize::from(grid.height()) * 2 + 1,
        )
    }

    pub fn new(grid: &Grid, overlay: &Overlay<'_>) -> Self {
        let (width, height) = Frame::dimensions(grid);
        let mut frame = Frame {
            glyphs: vec![Glyph::Wall; width * height].into_boxed_slice(),
            width,
            height,
        };

        let route = overlay
            .path
            .map(|path| path.iter().copied().collect::<HashSet<_>>())
            .unwrap_or_default();
        let cell_glyph = |coord: Coord| {
            if overlay.cursor == Some(coord) {
                Glyph::Cursor
            } else if overlay.goal == Some(coord) {
                Glyph::Goal
            } else if route.contains(&coord) {
                Glyph::Route
            } else if overlay.show_visited && grid[coord].is_visited() {
                Glyph::Visited
            } else {
                Glyph::Open
            }
        };

        for (coord, cell) in grid.cells() {
            // Positions are computed in usize, 2n + 1 overflows u16 past 32767 cells
            let (fx, fy) = (usize::from(coord.0) * 2 + 1, usize::from(coord.1) * 2 + 1);
            frame.set((fx, fy), cell_glyph(coord));

            // Walls on the left and top are drawn by the neighbour in that direction
            for direction in [Direction::Right, Direction::Down] {
                let Some(neighbor) = grid.neighbor(coord, direction) else {
                    continue;
                };
                if !cell.has_passage(direction) {
                    continue;
                }
                let glyph = if route.contains(&coord) && route.contains(&neighbor) {
                    Glyph::Route
                } else if overlay.show_visited
                    && cell.is_visited()
                    && grid[neighbor].is_visited()
                {
                    Glyph::Visited
                } else {
                    Glyph::Open
                };
                let slot = match direction {
                    Direction::Right => (fx + 1, fy),
                    _ => (fx, fy + 1),
                };
                frame.set(slot, glyph);
            }
        }
        frame
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Terminal columns needed to show the frame.
    pub fn columns(&self) -> usize {
        self.width * usize::from(Glyph::WIDTH)
    }

    fn ravel_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn set(&mut self, coord: (usize, usize), glyph: Glyph) {
        let idx = self.ravel_index(coord.0, coord.1);
        self.glyphs[idx] = glyph;
    }

    pub fn get(&self, coord: (usize, usize)) -> Option<Glyph> {
        (coord.0 < self.width && coord.1 < self.height)
            .then(|| self.glyphs[self.ravel_index(coord.0, coord.1)])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.glyphs.chunks(self.width)
    }

    /// The frame as uncoloured text, one string per row.
    pub fn to_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|glyph| glyph.symbol()).collect())
            .collect()
    }

    /// Queue the frame at the top-left corner of a raw-mode terminal and flush.
    pub fn draw<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        for row in self.rows() {
            for glyph in row {
                queue!(out, style::Print(glyph))?;
            }
            queue!(out, style::Print("\r\n"))?;
        }
        out.flush()
    }

    /// Print the frame as plain lines, for use outside raw mode.
    pub fn print<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in self.rows() {
            for glyph in row {
                write!(out, "{}", glyph)?;
            }
            writeln!(out)?;
        }
        out.flush()
    }
}
