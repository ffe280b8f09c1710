use crate::*;
pub use random::*;

mod random;

/// Picks where the next fruit appears.
pub trait FruitPlacer {
    /// Returns a cell inside `grid`, or `None` if there is nowhere to put it.
    fn place(&mut self, grid: GridSize, snake: &Snake) -> Option<Cell>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SpawnPolicy {
    /// Uniform over the cells the snake does not cover.
    #[default]
    AvoidSnake,
    /// Uniform over the whole grid, fruit may land under the snake.
    AnyCell,
}
