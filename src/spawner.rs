use std::ops::RangeInclusive;

use log::debug;
use rand::Rng;

use crate::error::{Result, SnakeError};
use crate::grid::{Cell, Grid};
use crate::Coords;

/// Places fruit on random empty cells.
pub struct FruitSpawner<R: Rng> {
    rng: R,
    lifetime: RangeInclusive<u32>,
}

impl<R: Rng> FruitSpawner<R> {
    /// `lifetime` is the inclusive range of ticks a new fruit lives for.
    pub fn new(rng: R, lifetime: RangeInclusive<u32>) -> Self {
        FruitSpawner { rng, lifetime }
    }

    /// Put one fruit on a random empty cell and return where it went.
    ///
    /// Draws random coordinates until one lands on an empty cell. A full grid
    /// is checked first so this never loops forever.
    pub fn try_spawn(&mut self, grid: &mut Grid) -> Result<Coords> {
        if !grid.has_empty_cell() {
            return Err(SnakeError::NoEmptyCellAvailable);
        }

        let pos = loop {
            let pos = (self.rng.gen_range(0..grid.height()), self.rng.gen_range(0..grid.width()));
            if grid.get(pos) == Some(Cell::Empty) {
                break pos;
            }
        };

        let ticks = self.rng.gen_range(self.lifetime.clone());
        grid.set(pos, Cell::Fruit(ticks));
        debug!("fruit at {:?} for {} ticks", pos, ticks);
        Ok(pos)
    }
}
