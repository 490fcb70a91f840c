use std::collections::VecDeque;

use tracing::{debug, info};

use super::{
    collision::{self, CollisionType},
    config::GameConfig,
    direction::Direction,
    error::GameError,
    events::{EventSink, GameEvent},
    food::{FoodPlacer, RandomCellSource, RngCellSource},
    snake::{Cell, SnakeBody},
};

/// Whether ticks currently move the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Stopped after a crash until the player picks a direction
    Paused,
    /// The snake covers every cell; a direction input starts a new game
    Full,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is paused; nothing moved
    Idle,
    Moved,
    /// Food was eaten; carries the new score
    Ate { score: u32 },
    /// The snake crashed and the board was reset
    Crashed {
        collision: CollisionType,
        final_score: u32,
    },
}

/// Complete game state, advanced one tick at a time
pub struct GameState<S = RngCellSource<rand::rngs::StdRng>> {
    snake: SnakeBody,
    food: FoodPlacer<S>,
    grid_size: i32,
    status: Status,
    score: u32,
    steps: u32,
    pending_direction: Option<Direction>,
}

impl GameState {
    /// Create a game drawing food positions from OS entropy
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::with_source(config, RngCellSource::from_entropy())
    }
}

impl<S: RandomCellSource> GameState<S> {
    pub fn with_source(config: &GameConfig, source: S) -> Result<Self, GameError> {
        let snake = SnakeBody::new(config.initial_body.clone(), config.initial_direction);
        let food = FoodPlacer::new(
            source,
            config.grid_size,
            config.food_sample_attempts,
            snake.occupancy(),
        )?;

        Ok(Self {
            snake,
            food,
            grid_size: config.grid_size,
            status: Status::Running,
            score: 0,
            steps: 0,
            pending_direction: None,
        })
    }

    /// Execute one tick of the game
    ///
    /// Filling the grid returns [`GameError::WorldFull`] after the last
    /// food has been scored. The game then stays [`Status::Full`] and has no
    /// food until the next direction input.
    pub fn advance(&mut self, events: &mut impl EventSink) -> Result<TickOutcome, GameError> {
        if self.status != Status::Running {
            return Ok(TickOutcome::Idle);
        }

        let direction = self
            .pending_direction
            .take()
            .unwrap_or(self.snake.direction());
        let next_head = self.snake.head().moved_in_direction(direction);
        let ate = self
            .food
            .position()
            .is_some_and(|food| collision::ate_food(next_head, food));
        if ate {
            self.snake.grow();
        }
        self.snake.advance(direction);
        self.steps += 1;

        if let Some(collision) = collision::detect(self.snake.cells(), self.grid_size) {
            let final_score = self.score;
            self.game_over(events)?;
            info!(?collision, final_score, steps = self.steps, "snake crashed");
            return Ok(TickOutcome::Crashed {
                collision,
                final_score,
            });
        }

        if ate {
            self.score += 1;
            events.notify(GameEvent::Ate);
            debug!(score = self.score, length = self.snake.len(), "food eaten");

            if let Err(err) = self.food.relocate(self.snake.occupancy()) {
                self.status = Status::Full;
                self.pending_direction = None;
                info!(score = self.score, steps = self.steps, "board filled");
                return Err(err);
            }
            return Ok(TickOutcome::Ate { score: self.score });
        }

        Ok(TickOutcome::Moved)
    }

    /// Queue a turn for the next tick. Reversing into the body is refused.
    /// An accepted turn also resumes a paused game. On a full board any
    /// input first resets the board, then is checked like a turn after a
    /// crash.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if self.status == Status::Full && self.restart().is_err() {
            return false;
        }

        if self.snake.direction().is_opposite(direction) {
            return false;
        }

        self.pending_direction = Some(direction);
        if self.status == Status::Paused {
            debug!(?direction, "resuming");
            self.status = Status::Running;
        }
        true
    }

    fn game_over(&mut self, events: &mut impl EventSink) -> Result<(), GameError> {
        self.restart()?;
        events.notify(GameEvent::Crashed);
        Ok(())
    }

    /// Back to the starting layout, paused, with a score of 0
    fn restart(&mut self) -> Result<(), GameError> {
        self.snake.reset();
        self.food.relocate(self.snake.occupancy())?;
        self.status = Status::Paused;
        self.score = 0;
        self.pending_direction = None;
        Ok(())
    }

    pub fn cells(&self) -> &VecDeque<Cell> {
        self.snake.cells()
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    /// `None` only while the board is full
    pub fn food_position(&self) -> Option<Cell> {
        self.food.position()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    #[cfg(test)]
    pub(crate) fn food_mut(&mut self) -> &mut FoodPlacer<S> {
        &mut self.food
    }
}
