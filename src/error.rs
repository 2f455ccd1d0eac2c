use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnakeError {
    #[error("grid must be at least 5x5, got {height}x{width}")]
    InvalidDimension { height: usize, width: usize },
    #[error("no empty cell left for a fruit")]
    NoEmptyCellAvailable,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
