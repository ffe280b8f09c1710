use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    HitWall,
    HitSelf,
    /// The snake covers every cell, there is nowhere left for fruit.
    BoardFilled,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Idle,
    Running,
    GameOver {
        reason: EndReason,
        score: Score,
    },
}

impl EngineState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameOverReport {
    pub reason: EndReason,
    pub score: Score,
    pub previous_high_score: Score,
    /// Set when `score` beat the previous high score and should be persisted.
    pub new_high_score: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate { score: Score },
    GameOver(GameOverReport),
}

impl TickOutcome {
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver(_))
    }
}

/// One play session: the snake, its fruit, the running score and the best score so far.
///
/// The engine holds no timer; whoever owns it calls [`SnakeEngine::tick`] once per
/// [`GameConfig::tick_period_ms`].
#[derive(Clone, Debug)]
pub struct SnakeEngine<P = RandomFruitPlacer> {
    config: GameConfig,
    grid: GridSize,
    placer: P,
    state: EngineState,
    snake: Snake,
    fruit: Option<Cell>,
    score: Score,
    high_score: Score,
}

impl<P: FruitPlacer> SnakeEngine<P> {
    pub fn new(config: GameConfig, grid: GridSize, placer: P, high_score: Score) -> Self {
        Self {
            snake: Snake::new(config.start, config.start_direction),
            config,
            grid,
            placer,
            state: EngineState::Idle,
            fruit: None,
            score: 0,
            high_score,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Option<Cell> {
        self.fruit
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn high_score(&self) -> Score {
        self.high_score
    }

    /// Starts a fresh round from any state, discarding the previous snake and fruit.
    pub fn start(&mut self) -> Result<()> {
        if !self.grid.contains(self.config.start) {
            log::warn!(
                "Start cell {:?} is outside the {:?} grid",
                self.config.start,
                self.grid
            );
            return Err(GameError::GridTooSmall);
        }

        self.score = 0;
        self.snake = Snake::new(self.config.start, self.config.start_direction);
        self.fruit = self.placer.place(self.grid, &self.snake);
        self.state = EngineState::Running;

        if self.fruit.is_none() {
            self.finish(EndReason::BoardFilled);
        }

        log::debug!(
            "Game started on {:?}, snake at {:?}, fruit at {:?}",
            self.grid,
            self.snake.head(),
            self.fruit
        );
        Ok(())
    }

    /// Queues a direction change for the next tick.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if !self.state.is_running() {
            return false;
        }
        let accepted = self.snake.request_turn(direction, self.config.turn_policy);
        log::trace!("turn {:?} accepted: {}", direction, accepted);
        accepted
    }

    /// Advances the game by one step: move, collide, eat.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.check_running()?;

        let next_head = self.snake.head().step(self.snake.heading());
        let eats = self.fruit == Some(next_head);

        let new_head = match self.snake.move_step(self.grid, eats) {
            MoveResult::Crashed(Collision::Wall) => {
                return Ok(TickOutcome::GameOver(self.finish(EndReason::HitWall)));
            }
            MoveResult::Crashed(Collision::Body) => {
                return Ok(TickOutcome::GameOver(self.finish(EndReason::HitSelf)));
            }
            MoveResult::Moved { new_head, old_tail } => {
                log::trace!("snake moved to {:?}, freed {:?}", new_head, old_tail);
                new_head
            }
        };

        if !eats {
            return Ok(TickOutcome::Moved);
        }

        self.score = self.score.saturating_add(1);
        self.fruit = self.placer.place(self.grid, &self.snake);
        log::debug!("fruit eaten, score {}, next fruit at {:?}", self.score, self.fruit);

        match self.fruit {
            Some(_) => Ok(TickOutcome::Ate { score: self.score }),
            None => Ok(TickOutcome::GameOver(self.finish(EndReason::BoardFilled))),
        }
    }

    /// Replaces the grid bounds, e.g. after the viewport changed.
    ///
    /// While a round is running, a fruit left outside the new bounds is placed again.
    /// Otherwise the fruit stays put until the next [`SnakeEngine::start`].
    pub fn resize(&mut self, grid: GridSize) {
        if grid == self.grid {
            return;
        }
        log::debug!("grid resized from {:?} to {:?}", self.grid, grid);
        self.grid = grid;

        if !self.state.is_running() {
            return;
        }
        let Some(fruit) = self.fruit else {
            return;
        };
        if grid.contains(fruit) {
            return;
        }

        self.fruit = self.placer.place(grid, &self.snake);
        log::debug!("fruit {:?} out of bounds, moved to {:?}", fruit, self.fruit);
        if self.fruit.is_none() {
            self.finish(EndReason::BoardFilled);
        }
    }

    fn finish(&mut self, reason: EndReason) -> GameOverReport {
        let previous_high_score = self.high_score;
        let new_high_score = self.score > previous_high_score;
        if new_high_score {
            self.high_score = self.score;
        }

        self.state = EngineState::GameOver {
            reason,
            score: self.score,
        };
        log::debug!(
            "Game over ({:?}) with score {}, high score {}",
            reason,
            self.score,
            self.high_score
        );

        GameOverReport {
            reason,
            score: self.score,
            previous_high_score,
            new_high_score,
        }
    }

    fn check_running(&self) -> Result<()> {
        if self.state.is_running() {
            Ok(())
        } else {
            Err(GameError::NotRunning)
        }
    }
}
