use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game is not running, no ticks or turns are accepted")]
    NotRunning,
    #[error("Grid is too small to hold the starting snake")]
    GridTooSmall,
}

pub type Result<T> = core::result::Result<T, GameError>;
