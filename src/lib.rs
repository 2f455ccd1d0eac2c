//! Terminal Snake.
//!
//! The simulation lives in [`grid`], [`engine`], [`spawner`], [`direction`] and
//! [`session`]; none of those touch the terminal. [`input`], [`term`] and
//! [`game`] are the crossterm front end that drives a [`session::GameSession`].

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod session;
pub mod spawner;
pub mod term;

/// Grid position as `(row, col)`, row 0 at the top.
pub type Coords = (usize, usize);

pub use config::Config;
pub use direction::{Direction, DirectionController};
pub use error::{Result, SnakeError};
pub use grid::{Cell, Grid};
pub use session::{GameSession, Status};
