//! The playing field.
//!
//! A fixed `height x width` array of [`Cell`]s stored row-major. Every cell
//! carries its own countdown, so the snake is never stored as a list of
//! positions: a body segment simply knows how many more ticks it stays.

use crate::error::{Result, SnakeError};
use crate::Coords;

/// Smallest allowed height and width.
pub const MIN_SIZE: usize = 5;

/// Content of a single grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Head,
    /// Ticks left before this segment vacates.
    Body(u32),
    /// Ticks left before this fruit despawns (only counts down when despawning is on).
    Fruit(u32),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_body(&self) -> bool {
        matches!(self, Cell::Body(_))
    }

    pub fn is_fruit(&self) -> bool {
        matches!(self, Cell::Fruit(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid with the head on the centre cell.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height < MIN_SIZE || width < MIN_SIZE {
            return Err(SnakeError::InvalidDimension { height, width });
        }

        let mut grid = Grid { height, width, cells: vec![Cell::Empty; height * width] };
        grid.set(grid.center(), Cell::Head);
        Ok(grid)
    }

    /// A grid of the same size with every cell empty. Used as the scratch
    /// buffer for a transition.
    pub(crate) fn blank_like(other: &Grid) -> Self {
        Grid { height: other.height, width: other.width, cells: vec![Cell::Empty; other.cells.len()] }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn center(&self) -> Coords {
        (self.height / 2, self.width / 2)
    }

    #[inline]
    fn index(&self, (row, col): Coords) -> Option<usize> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Cell at `pos`, `None` when out of bounds.
    pub fn get(&self, pos: Coords) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub(crate) fn set(&mut self, pos: Coords, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Every cell in row-major order together with its position.
    pub fn iter(&self) -> impl Iterator<Item = (Coords, Cell)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, cell)| ((i / width, i % width), *cell))
    }

    /// The grid split into rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Read-only copy for a renderer.
    pub fn snapshot(&self) -> Grid {
        self.clone()
    }

    pub fn head(&self) -> Option<Coords> {
        self.iter().find(|(_, cell)| *cell == Cell::Head).map(|(pos, _)| pos)
    }

    pub fn fruit(&self) -> Option<Coords> {
        self.iter().find(|(_, cell)| cell.is_fruit()).map(|(pos, _)| pos)
    }

    pub fn count(&self, pred: impl Fn(&Cell) -> bool) -> usize {
        self.cells.iter().filter(|&cell| pred(cell)).count()
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(Cell::is_empty)
    }

    /// Remove any fruit from the grid.
    pub(crate) fn clear_fruit(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_fruit()) {
            *cell = Cell::Empty;
        }
    }
}
