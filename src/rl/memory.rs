//! Experience replay memory

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use super::observation::StateVec;
use crate::game::ActionVec;

/// A single state transition observed during play
///
/// Immutable once created; the action is the one-hot selection vector the
/// agent returned for `state`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: StateVec,
    pub action: ActionVec,
    pub reward: f32,
    pub next_state: StateVec,
    pub done: bool,
}

/// Fixed-capacity ring buffer of transitions
///
/// Push is O(1); once the buffer is full the oldest transition is
/// overwritten, so the length never exceeds the capacity.
pub struct ReplayMemory {
    buffer: Vec<Transition>,
    capacity: usize,
    position: usize,
    rng: StdRng,
}

impl ReplayMemory {
    pub fn new(capacity: usize) -> Self {
        ReplayMemory {
            buffer: Vec::new(),
            capacity,
            position: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Add a transition. Overwrites the oldest when full.
    pub fn push(&mut self, transition: Transition) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(transition);
        } else {
            self.buffer[self.position] = transition;
        }
        self.position = (self.position + 1) % self.capacity;
    }

    /// Sample a batch uniformly without replacement
    pub fn sample(&mut self, batch_size: usize) -> Vec<Transition> {
        assert!(
            batch_size <= self.buffer.len(),
            "Not enough transitions to sample"
        );
        let indices = index::sample(&mut self.rng, self.buffer.len(), batch_size);
        indices.iter().map(|i| self.buffer[i].clone()).collect()
    }

    /// Copy of the entire memory, for when it is smaller than a batch
    pub fn snapshot(&self) -> Vec<Transition> {
        self.buffer.clone()
    }

    /// True if the given transition is currently held
    pub fn contains(&self, transition: &Transition) -> bool {
        self.buffer.contains(transition)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
