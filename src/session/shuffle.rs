//! Permutations for question and choice shuffling.
//!
//! A [`Permutation`] stores, for every new position, the old index that
//! moves there: `order[new] == old`. Remapping an answer index therefore
//! means finding where the old index ended up.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::models::{Answer, Question};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermutationError {
    #[error("index {index} is out of range for a permutation of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("index {0} appears more than once")]
    Repeated(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
}

impl Permutation {
    /// Builds a permutation from `order[new] = old`, rejecting anything
    /// that is not a rearrangement of `0..order.len()`.
    pub fn new(order: Vec<usize>) -> Result<Self, PermutationError> {
        let len = order.len();
        let mut seen = vec![false; len];
        for &index in &order {
            let slot = seen
                .get_mut(index)
                .ok_or(PermutationError::OutOfRange { index, len })?;
            if *slot {
                return Err(PermutationError::Repeated(index));
            }
            *slot = true;
        }
        Ok(Self { order })
    }

    pub fn identity(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    pub fn reversed(len: usize) -> Self {
        Self {
            order: (0..len).rev().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// The mapping from old index to new position.
    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.order.len()];
        for (new, &old) in self.order.iter().enumerate() {
            inverse[old] = new;
        }
        Self { order: inverse }
    }

    /// New position of the item that used to sit at `old`.
    pub fn new_index_of(&self, old: usize) -> Option<usize> {
        self.order.iter().position(|&index| index == old)
    }

    /// Rearranges `items` into the permuted order.
    ///
    /// Returns `None` if the lengths differ.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Option<Vec<T>> {
        if items.len() != self.order.len() {
            return None;
        }
        Some(self.order.iter().map(|&old| items[old].clone()).collect())
    }
}

/// Source of permutations for shuffling.
pub trait Permuter {
    fn permutation(&mut self, len: usize) -> Permutation;
}

impl<F> Permuter for F
where
    F: FnMut(usize) -> Permutation,
{
    fn permutation(&mut self, len: usize) -> Permutation {
        self(len)
    }
}

/// Uniformly random permutations backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomPermuter {
    rng: StdRng,
}

impl RandomPermuter {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPermuter {
    fn default() -> Self {
        Self::new()
    }
}

impl Permuter for RandomPermuter {
    fn permutation(&mut self, len: usize) -> Permutation {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        Permutation { order }
    }
}

/// Reorders a question's choices and rewrites its answer so every correct
/// index still points at the same choice text.
///
/// A permutation of the wrong length leaves the question untouched.
pub fn permute_choices(question: &Question, permutation: &Permutation) -> Question {
    let Some(choices) = permutation.apply(&question.choices) else {
        tracing::warn!(
            id = question.id,
            choices = question.choices.len(),
            permutation = permutation.len(),
            "permutation length does not match choices, keeping original order"
        );
        return question.clone();
    };

    let position = permutation.inverse();
    let remap = |old: usize| position.as_slice().get(old).copied().unwrap_or(old);
    let answer = match &question.answer {
        Answer::Single(index) => Answer::Single(remap(*index)),
        Answer::Multiple(indices) => {
            let mut remapped: Vec<usize> = indices.iter().map(|&i| remap(i)).collect();
            remapped.sort_unstable();
            Answer::Multiple(remapped)
        }
    };

    Question {
        choices,
        answer,
        ..question.clone()
    }
}
