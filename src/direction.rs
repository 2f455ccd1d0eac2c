use Direction::*;

/// Heading of the snake, in clockwise order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Right, Down, Left];

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Right => Left,
            Down => Up,
            Left => Right,
        }
    }

    /// Next direction clockwise.
    pub fn clockwise(self) -> Direction {
        match self {
            Up => Right,
            Right => Down,
            Down => Left,
            Left => Up,
        }
    }

    /// `(row, col)` step for one move.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Up => (-1, 0),
            Right => (0, 1),
            Down => (1, 0),
            Left => (0, -1),
        }
    }
}

/// Buffers the player's next turn until the session commits it on a tick.
///
/// Reversals are checked against the *active* heading, so two quick turns
/// (e.g. Up then Left while heading Right) still resolve to the latest valid one.
#[derive(Debug, Clone)]
pub struct DirectionController {
    active: Direction,
    pending: Direction,
}

impl DirectionController {
    pub fn new(initial: Direction) -> Self {
        DirectionController { active: initial, pending: initial }
    }

    /// Queue `new_direction` unless it would reverse the snake onto itself.
    /// Invalid reversals are ignored.
    pub fn propose(&mut self, new_direction: Direction) {
        if new_direction != self.active.opposite() {
            self.pending = new_direction;
        }
    }

    /// Make the pending direction the active one. Called once per tick.
    pub fn commit(&mut self) -> Direction {
        self.active = self.pending;
        self.active
    }

    pub fn active(&self) -> Direction {
        self.active
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }
}

impl Default for DirectionController {
    fn default() -> Self {
        DirectionController::new(Right)
    }
}
