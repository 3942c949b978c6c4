use super::{
    action::{ActionVec, Direction, Turn},
    config::GameConfig,
    state::{GameState, Position, Snake},
};
use rand::Rng;

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Snake hit a wall
    WallCollision,
    /// Snake hit itself
    SelfCollision,
    /// Snake wandered too long without the episode ending
    Starvation,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: f32,
    /// Whether the game has terminated
    pub done: bool,
    /// Current score (food eaten)
    pub score: u32,
    /// Set when this step ended the episode
    pub cause: Option<GameOverCause>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let food = self.spawn_food_avoid_snake(&snake);

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
    }

    /// Advance the simulation one tick given a one-hot action selection
    pub fn play_step(&mut self, state: &mut GameState, action: ActionVec) -> StepResult {
        if !state.is_alive {
            return StepResult {
                reward: 0.0,
                done: true,
                score: state.score,
                cause: None,
            };
        }

        state.steps += 1;

        // Apply the relative turn; 180-degree turns are unrepresentable
        let turn = Turn::from_one_hot(&action);
        state.snake.direction = state.snake.direction.turned(turn);

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        let starved = state.steps > self.config.starvation_factor * state.snake.len() as u32;
        let cause = self
            .check_collision(state, new_head)
            .or(if starved { Some(GameOverCause::Starvation) } else { None });

        if let Some(cause) = cause {
            state.is_alive = false;

            return StepResult {
                reward: self.config.death_penalty,
                done: true,
                score: state.score,
                cause: Some(cause),
            };
        }

        // Check if snake ate food
        let ate_food = new_head == state.food;

        // Move snake (grow if ate food)
        state.snake.move_snake(ate_food);

        let mut reward = self.config.step_reward;

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food_avoid_snake(&state.snake);
            reward += self.config.food_reward;
        }

        StepResult {
            reward,
            done: false,
            score: state.score,
            cause: None,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<GameOverCause> {
        if !state.is_in_bounds(pos) {
            return Some(GameOverCause::WallCollision);
        }

        if state.snake.collides_with_body(pos) {
            return Some(GameOverCause::SelfCollision);
        }

        None
    }

    /// Spawn food at a random position not occupied by the snake
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.body.contains(&pos) {
                return pos;
            }
        }
    }
}
