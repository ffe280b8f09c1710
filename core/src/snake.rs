use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// Which direction changes the snake accepts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPolicy {
    /// Anything except reversing into the neck.
    #[default]
    RejectReverse,
    /// Only quarter turns; repeating the current heading is also rejected.
    OrthogonalOnly,
}

impl TurnPolicy {
    pub const fn allows(self, current: Direction, requested: Direction) -> bool {
        match self {
            Self::RejectReverse => !matches!(
                (current, requested),
                (Direction::Up, Direction::Down)
                    | (Direction::Down, Direction::Up)
                    | (Direction::Left, Direction::Right)
                    | (Direction::Right, Direction::Left)
            ),
            Self::OrthogonalOnly => current.is_perpendicular_to(requested),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved {
        new_head: Cell,
        old_tail: Option<Cell>,
    },
    Crashed(Collision),
}

/// Ordered body with the head at index 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Option<Direction>,
}

impl Snake {
    pub fn new(head: Cell, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction,
            pending: None,
        }
    }

    /// Builds a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Option<Self> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            direction,
            pending: None,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Direction the next step will take.
    pub fn heading(&self) -> Direction {
        self.pending.unwrap_or(self.direction)
    }

    /// Queues a turn for the next step.
    ///
    /// Requests are checked against the direction of the last step, so several presses
    /// inside one tick can never add up to a reversal. The latest accepted request wins.
    pub fn request_turn(&mut self, requested: Direction, policy: TurnPolicy) -> bool {
        if policy.allows(self.direction, requested) {
            self.pending = Some(requested);
            true
        } else {
            false
        }
    }

    /// Advances one cell, growing by one when `grow` is set.
    ///
    /// The tail cell only counts as an obstacle when growing, since otherwise it is
    /// vacated during the same step.
    pub fn move_step(&mut self, grid: GridSize, grow: bool) -> MoveResult {
        if let Some(dir) = self.pending.take() {
            self.direction = dir;
        }

        let new_head = self.head().step(self.direction);

        if !grid.contains(new_head) {
            return MoveResult::Crashed(Collision::Wall);
        }

        if self.blocks(new_head, grow) {
            return MoveResult::Crashed(Collision::Body);
        }

        self.body.push_front(new_head);

        let old_tail = if grow { None } else { self.body.pop_back() };
        MoveResult::Moved { new_head, old_tail }
    }

    fn blocks(&self, cell: Cell, grow: bool) -> bool {
        let solid = if grow {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(solid).any(|&segment| segment == cell)
    }

    /// Whether any two segments share a cell.
    pub fn has_overlap(&self) -> bool {
        self.body
            .iter()
            .enumerate()
            .any(|(i, cell)| self.body.iter().skip(i + 1).any(|other| other == cell))
    }
}
