use std::cmp::{max, min};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Coords;
use crate::snake::{Snake, Direction::{*, self}};

pub const WIDTH: i32 = 600;
pub const HEIGHT: i32 = 600;
pub const DOT_SIZE: i32 = 20;
pub const ALL_DOTS: usize = 900;
pub const RAND_POS: i32 = 29;

pub const DEFAULT_SPEED_MS: u64 = 120;
pub const MIN_SPEED_MS: u64 = 20;
pub const MAX_SPEED_MS: u64 = 200;
pub const SPEED_STEP_MS: i64 = 20;

const INITIAL_SNAKE_LENGTH: usize = 3;
const START_POSITION: Coords = (50, 50);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already over, nothing moved
    Idle,
    Moved,
    Ate,
    GameOver(DeathReason),
}

impl TickOutcome {
    /// The clock has to be stopped by whoever drives it.
    pub fn stops_clock(&self) -> bool {
        matches!(self, TickOutcome::GameOver(_))
    }
}

/// Everything a renderer needs, detached from the live state.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub state: RunState,
    pub segments: Vec<Coords>,
    pub food: Coords,
    pub fruits_eaten: u32,
    pub high_score: u32,
    pub speed_ms: u64,
}

pub struct GameState {
    snake: Snake,
    food: Coords,
    fruits_eaten: u32,
    high_score: u32,
    speed_ms: u64,
    state: RunState,
    rng: StdRng,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        let mut game = GameState {
            snake: Self::initial_snake(),
            food: (0, 0),
            fruits_eaten: 0,
            high_score: 0,
            speed_ms: DEFAULT_SPEED_MS,
            state: RunState::Running,
            rng: StdRng::seed_from_u64(seed),
        };
        game.reset();
        game
    }

    /// Starts a fresh game. The high score survives.
    pub fn reset(&mut self) {
        self.snake = Self::initial_snake();
        self.fruits_eaten = 0;
        self.speed_ms = DEFAULT_SPEED_MS;
        self.state = RunState::Running;
        self.place_food();
    }

    pub fn set_direction(&mut self, dir: Direction) {
        self.snake.set_direction(dir);
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != RunState::Running {
            return TickOutcome::Idle;
        }

        let head = self.snake.move_step();
        let mut outcome = TickOutcome::Moved;

        if self.food_hit(head) {
            self.snake.grow();
            self.fruits_eaten += 1;
            self.high_score = max(self.high_score, self.fruits_eaten);
            self.place_food();
            outcome = TickOutcome::Ate;
        }

        let reason = if head.0 < 0 || head.0 >= WIDTH || head.1 < 0 || head.1 >= HEIGHT {
            Some(DeathReason::WallCollision)
        } else if self.snake.bites_itself() {
            Some(DeathReason::SelfCollision)
        } else {
            None
        };

        if let Some(reason) = reason {
            self.state = RunState::GameOver;
            log!(
                "Game over: {:?} heading {:?}, score {}, high score {}",
                reason, self.snake.get_direction(), self.fruits_eaten, self.high_score
            );
            return TickOutcome::GameOver(reason);
        }

        outcome
    }

    /// Picks a random cell anywhere in the field, snake or not. The anchor lands
    /// half a cell into the chosen index.
    pub fn place_food(&mut self) {
        let x = self.rng.gen_range(0..RAND_POS);
        let y = self.rng.gen_range(0..RAND_POS);
        self.food = (x * DOT_SIZE + DOT_SIZE / 2, y * DOT_SIZE + DOT_SIZE / 2);
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::GameOver => RunState::GameOver,
        };
    }

    /// Returns the new tick interval, which the caller hands to its clock.
    pub fn change_speed(&mut self, delta: i64) -> u64 {
        let wanted = max((self.speed_ms as i64).saturating_add(delta), MIN_SPEED_MS as i64) as u64;
        self.speed_ms = min(wanted, MAX_SPEED_MS);
        self.speed_ms
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            segments: self.snake.body().iter().copied().collect(),
            food: self.food,
            fruits_eaten: self.fruits_eaten,
            high_score: self.high_score,
            speed_ms: self.speed_ms,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn fruits_eaten(&self) -> u32 {
        self.fruits_eaten
    }

    ///////////////////////////////////////////////////////////////////////////

    fn initial_snake() -> Snake {
        Snake::new(START_POSITION, INITIAL_SNAKE_LENGTH, Right, DOT_SIZE, ALL_DOTS)
    }

    fn food_hit(&self, head: Coords) -> bool {
        let half = DOT_SIZE / 2;
        let (fx, fy) = self.food;
        head.0 >= fx - half && head.0 <= fx + half && head.1 >= fy - half && head.1 <= fy + half
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Coords) {
        self.food = food;
    }

    #[cfg(test)]
    fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}
