//! State encoding for the Snake agent
//!
//! Builds the 11-element feature vector the Q-network consumes:
//!
//! ```text
//! [0]  danger straight ahead
//! [1]  danger to the right of the heading
//! [2]  danger to the left of the heading
//! [3..7]  one-hot heading: left, right, up, down
//! [7..11] food relative to head: left, right, above, below
//! ```
//!
//! The vector is recomputed fresh from the game state each tick and never
//! persisted.

use burn::tensor::{Tensor, TensorData, backend::Backend};

use crate::game::{Direction, GameState, Turn};

/// Size of the state feature vector
pub const STATE_DIM: usize = 11;

/// The encoded state the agent and trainer operate on
pub type StateVec = [f32; STATE_DIM];

/// Encode the game state into the 11-element feature vector
///
/// Pure function of the game geometry: head position, heading, food
/// position, and the collision predicate. Does not mutate the state.
pub fn encode_state(state: &GameState) -> StateVec {
    let head = state.snake.head();
    let heading = state.snake.direction;
    let food = state.food;

    let danger_straight = state.is_collision(head.moved_in_direction(heading));
    let danger_right = state.is_collision(head.moved_in_direction(heading.turned(Turn::Right)));
    let danger_left = state.is_collision(head.moved_in_direction(heading.turned(Turn::Left)));

    [
        flag(danger_straight),
        flag(danger_right),
        flag(danger_left),
        flag(heading == Direction::Left),
        flag(heading == Direction::Right),
        flag(heading == Direction::Up),
        flag(heading == Direction::Down),
        flag(food.x < head.x),
        flag(food.x > head.x),
        flag(food.y < head.y),
        flag(food.y > head.y),
    ]
}

fn flag(condition: bool) -> f32 {
    if condition { 1.0 } else { 0.0 }
}

/// Convert a single state vector into a `[1, 11]` tensor
pub fn state_to_tensor<B: Backend>(state: &StateVec, device: &B::Device) -> Tensor<B, 2> {
    let data = TensorData::new(state.to_vec(), [1, STATE_DIM]);
    Tensor::from_data(data, device)
}

/// Convert a batch of state vectors into a `[batch, 11]` tensor
pub fn batch_to_tensor<B: Backend>(states: &[StateVec], device: &B::Device) -> Tensor<B, 2> {
    let mut data = Vec::with_capacity(states.len() * STATE_DIM);
    for state in states {
        data.extend_from_slice(state);
    }
    let tensor_data = TensorData::new(data, [states.len(), STATE_DIM]);
    Tensor::from_data(tensor_data, device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};
    use burn::backend::NdArray;
    use burn::backend::ndarray::NdArrayDevice;

    type TestBackend = NdArray<f32>;

    fn open_field_state(head: Position, direction: Direction, food: Position) -> GameState {
        GameState::new(Snake::new(head, direction, 3), food, 20, 20)
    }

    #[test]
    fn test_heading_right_food_up_left() {
        // Heading right in open space, food to the left and above the head
        let state = open_field_state(
            Position::new(10, 10),
            Direction::Right,
            Position::new(5, 5),
        );

        let encoded = encode_state(&state);

        assert_eq!(encoded, [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_heading_flags_one_hot() {
        for (direction, expected) in [
            (Direction::Left, [1.0, 0.0, 0.0, 0.0]),
            (Direction::Right, [0.0, 1.0, 0.0, 0.0]),
            (Direction::Up, [0.0, 0.0, 1.0, 0.0]),
            (Direction::Down, [0.0, 0.0, 0.0, 1.0]),
        ] {
            let state = open_field_state(Position::new(10, 10), direction, Position::new(5, 5));
            let encoded = encode_state(&state);
            assert_eq!(&encoded[3..7], &expected);
        }
    }

    #[test]
    fn test_danger_straight_at_wall() {
        // Head against the right wall, heading right
        let state = open_field_state(
            Position::new(19, 10),
            Direction::Right,
            Position::new(5, 5),
        );

        let encoded = encode_state(&state);

        assert_eq!(encoded[0], 1.0); // straight ahead is the wall
        assert_eq!(encoded[1], 0.0); // right turn (down) is open
        assert_eq!(encoded[2], 0.0); // left turn (up) is open
    }

    #[test]
    fn test_danger_in_corner() {
        // Top-right corner, heading up: wall ahead and to the right
        let state = open_field_state(Position::new(19, 0), Direction::Up, Position::new(5, 5));

        let encoded = encode_state(&state);

        assert_eq!(encoded[0], 1.0); // up is out of bounds
        assert_eq!(encoded[1], 1.0); // right turn (right) is out of bounds
        assert_eq!(encoded[2], 0.0); // left turn (left) is open
    }

    #[test]
    fn test_danger_from_own_body() {
        // Snake curled so its body sits above the head
        let mut state = open_field_state(
            Position::new(10, 10),
            Direction::Right,
            Position::new(5, 15),
        );
        state.snake.body = vec![
            Position::new(10, 10),
            Position::new(10, 9),
            Position::new(9, 9),
        ];

        let encoded = encode_state(&state);

        assert_eq!(encoded[2], 1.0); // left turn (up) hits the body
        assert_eq!(encoded[0], 0.0);
        assert_eq!(encoded[1], 0.0);
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let state = open_field_state(
            Position::new(10, 10),
            Direction::Down,
            Position::new(3, 17),
        );

        assert_eq!(encode_state(&state), encode_state(&state));
    }

    #[test]
    fn test_values_are_binary() {
        let state = open_field_state(Position::new(1, 1), Direction::Up, Position::new(18, 18));

        for value in encode_state(&state) {
            assert!(value == 0.0 || value == 1.0);
        }
    }

    #[test]
    fn test_state_to_tensor_shape() {
        let device = NdArrayDevice::default();
        let state = open_field_state(
            Position::new(10, 10),
            Direction::Right,
            Position::new(5, 5),
        );

        let tensor = state_to_tensor::<TestBackend>(&encode_state(&state), &device);
        assert_eq!(tensor.shape().dims, [1, STATE_DIM]);
    }

    #[test]
    fn test_batch_to_tensor_shape_and_content() {
        let device = NdArrayDevice::default();
        let a: StateVec = [1.0; STATE_DIM];
        let b: StateVec = [0.0; STATE_DIM];

        let tensor = batch_to_tensor::<TestBackend>(&[a, b], &device);
        assert_eq!(tensor.shape().dims, [2, STATE_DIM]);

        let data = tensor.into_data();
        let values = data.as_slice::<f32>().unwrap();
        assert_eq!(values[0], 1.0);
        assert_eq!(values[STATE_DIM], 0.0);
    }
}
