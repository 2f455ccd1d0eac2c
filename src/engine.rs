//! One simulation step.
//!
//! Every cell is aged into a fresh grid in row-major order, reading only the
//! pre-tick grid; the new head is stamped on afterwards because its destination
//! may be scanned before or after the old head.

use std::fmt;

use crate::direction::Direction;
use crate::grid::{Cell, Grid};
use crate::Coords;

/// Rules that stay fixed for a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Leaving the grid re-enters on the opposite edge instead of killing the snake.
    pub wrap: bool,
    /// Uneaten fruit disappears when its counter runs out.
    pub fruits_despawn: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Rules { wrap: true, fruits_despawn: false }
    }
}

/// A successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub grid: Grid,
    pub head: Coords,
    /// Snake length after this step (one more than before if a fruit was eaten).
    pub length: u32,
    pub ate_fruit: bool,
    /// The fruit was eaten or despawned; a new one should be placed.
    pub need_fruit: bool,
}

/// Why the snake died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Wall => write!(f, "hit the wall"),
            Collision::SelfBite => write!(f, "bit itself"),
        }
    }
}

/// True if stepping from `pos` towards `direction` leaves the grid.
pub fn will_hit_wall(grid: &Grid, (row, col): Coords, direction: Direction) -> bool {
    match direction {
        Direction::Up => row == 0,
        Direction::Right => col == grid.width() - 1,
        Direction::Down => row == grid.height() - 1,
        Direction::Left => col == 0,
    }
}

/// Cell the head moves into, or `None` if it runs into a wall with wrapping off.
pub fn destination(grid: &Grid, pos: Coords, direction: Direction, wrap: bool) -> Option<Coords> {
    let (row, col) = pos;

    if will_hit_wall(grid, pos, direction) {
        if !wrap {
            return None;
        }
        return Some(match direction {
            Direction::Up => (grid.height() - 1, col),
            Direction::Right => (row, 0),
            Direction::Down => (0, col),
            Direction::Left => (row, grid.width() - 1),
        });
    }

    let (dr, dc) = direction.delta();
    Some(((row as isize + dr) as usize, (col as isize + dc) as usize))
}

/// Compute the grid after one tick.
///
/// On `Err` nothing of the partial grid is returned; the caller keeps `grid`.
pub fn advance(grid: &Grid, direction: Direction, length: u32, rules: Rules) -> Result<Transition, Collision> {
    let mut next = Grid::blank_like(grid);
    let mut length = length;
    let mut ate_fruit = false;
    let mut need_fruit = false;
    let mut new_head = None;

    for (pos, cell) in grid.iter() {
        let aged = match cell {
            Cell::Empty => Cell::Empty,
            Cell::Body(n) if n > 1 => Cell::Body(n - 1),
            Cell::Body(_) => Cell::Empty,
            Cell::Fruit(n) if rules.fruits_despawn => {
                if n > 1 {
                    Cell::Fruit(n - 1)
                } else {
                    need_fruit = true;
                    Cell::Empty
                }
            }
            Cell::Fruit(n) => Cell::Fruit(n),
            Cell::Head => {
                let dest = destination(grid, pos, direction, rules.wrap).ok_or(Collision::Wall)?;

                match grid.get(dest) {
                    Some(Cell::Body(_)) => return Err(Collision::SelfBite),
                    Some(Cell::Fruit(_)) => {
                        length += 1;
                        ate_fruit = true;
                        need_fruit = true;
                    }
                    _ => {}
                }

                new_head = Some(dest);
                Cell::Body(length)
            }
        };
        next.set(pos, aged);
    }

    // Grids from `Grid::new` always hold a head; a headless one counts as dead.
    let head = new_head.ok_or(Collision::SelfBite)?;
    next.set(head, Cell::Head);

    Ok(Transition { grid: next, head, length, ate_fruit, need_fruit })
}
