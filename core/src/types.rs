use serde::{Deserialize, Serialize};

/// Single coordinate axis, signed so a step past the left/top wall is representable.
pub type Coord = i16;

/// Count type used for scores and high scores.
pub type Score = u32;

/// One tile on the play grid, compared by value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
}

impl Cell {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step along `direction`, which may lie outside any grid.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(Coord, Coord)> for Cell {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector, with `y` growing downwards like the canvas.
    pub const fn delta(self) -> (Coord, Coord) {
        use Direction::*;
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub const fn is_perpendicular_to(self, other: Self) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }

    /// Maps a `KeyboardEvent.key` value to a direction. Unknown keys map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        use Direction::*;
        match key {
            "ArrowUp" | "w" | "W" => Some(Up),
            "ArrowDown" | "s" | "S" => Some(Down),
            "ArrowLeft" | "a" | "A" => Some(Left),
            "ArrowRight" | "d" | "D" => Some(Right),
            _ => None,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Right
    }
}

/// Grid bounds in tiles. Valid cells satisfy `0 <= x < width` and `0 <= y < height`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: Coord,
    pub height: Coord,
}

impl GridSize {
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self { width, height }
    }

    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub const fn total_cells(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }

    /// Shape for an `ndarray` mask indexed as `[x, y]`.
    pub(crate) const fn to_nd_shape(self) -> (usize, usize) {
        if self.is_empty() {
            (0, 0)
        } else {
            (self.width as usize, self.height as usize)
        }
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Cell {
    type Output = [usize; 2];

    /// Callers must check the cell against the grid first.
    fn to_nd_index(self) -> Self::Output {
        [self.x as usize, self.y as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_never_perpendicular() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert!(!dir.is_perpendicular_to(dir.opposite()));
            assert!(!dir.is_perpendicular_to(dir));
        }
        assert!(Direction::Up.is_perpendicular_to(Direction::Left));
    }

    #[test]
    fn step_can_leave_the_grid() {
        let grid = GridSize::new(20, 20);
        let left_edge = Cell::new(0, 3);

        let next = left_edge.step(Direction::Left);

        assert_eq!(next, Cell::new(-1, 3));
        assert!(!grid.contains(next));
        assert!(!grid.contains(Cell::new(20, 3)));
        assert!(grid.contains(Cell::new(19, 19)));
    }

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("D"), Some(Direction::Right));
        assert_eq!(Direction::from_key("Enter"), None);
        assert_eq!(Direction::from_key(""), None);
    }

    #[test]
    fn empty_grid_has_no_cells() {
        assert_eq!(GridSize::new(0, 9).total_cells(), 0);
        assert_eq!(GridSize::new(-3, 9).to_nd_shape(), (0, 0));
        assert_eq!(GridSize::new(90, 51).total_cells(), 4590);
    }
}
