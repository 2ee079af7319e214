use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{SeedableRng, rng};

use quiz_core::model::QuestionId;

/// Produces the traversal order of a quiz pass.
///
/// Implementations return a permutation of `ids`: same ids, no duplicates, no
/// omissions. Consecutive calls need not be related.
pub trait Sequencer: Send {
    fn shuffle(&mut self, ids: Vec<QuestionId>) -> Vec<QuestionId>;
}

/// Uniform shuffle from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSequencer;

impl Sequencer for RandomSequencer {
    fn shuffle(&mut self, mut ids: Vec<QuestionId>) -> Vec<QuestionId> {
        ids.as_mut_slice().shuffle(&mut rng());
        ids
    }
}

/// Uniform shuffle from a seeded generator; the same seed replays the same orders.
#[derive(Debug, Clone)]
pub struct SeededSequencer {
    rng: StdRng,
}

impl SeededSequencer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sequencer for SeededSequencer {
    fn shuffle(&mut self, mut ids: Vec<QuestionId>) -> Vec<QuestionId> {
        ids.as_mut_slice().shuffle(&mut self.rng);
        ids
    }
}

/// Keeps the given order. Used where a test needs to know which question comes first.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySequencer;

impl Sequencer for IdentitySequencer {
    fn shuffle(&mut self, ids: Vec<QuestionId>) -> Vec<QuestionId> {
        ids
    }
}

/// Pick a sequencer from an optional seed.
#[must_use]
pub fn sequencer_for_seed(seed: Option<u64>) -> Box<dyn Sequencer> {
    match seed {
        Some(seed) => Box::new(SeededSequencer::new(seed)),
        None => Box::new(RandomSequencer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(raw: &[u64]) -> Vec<QuestionId> {
        raw.iter().copied().map(QuestionId::new).collect()
    }

    #[test]
    fn empty_input_gives_empty_order() {
        assert!(RandomSequencer.shuffle(Vec::new()).is_empty());
        assert!(SeededSequencer::new(7).shuffle(Vec::new()).is_empty());
    }

    #[test]
    fn same_seed_same_order() {
        let input = ids(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let first = SeededSequencer::new(42).shuffle(input.clone());
        let second = SeededSequencer::new(42).shuffle(input);
        assert_eq!(first, second);
    }

    #[test]
    fn identity_keeps_order() {
        let input = ids(&[3, 1, 2]);
        assert_eq!(IdentitySequencer.shuffle(input.clone()), input);
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(raw in proptest::collection::btree_set(0_u64..1_000, 0..64), seed in any::<u64>()) {
            let input: Vec<QuestionId> = raw.iter().copied().map(QuestionId::new).collect();

            let mut seeded = SeededSequencer::new(seed).shuffle(input.clone());
            seeded.sort();
            prop_assert_eq!(&seeded, &input);

            let mut random = RandomSequencer.shuffle(input.clone());
            random.sort();
            prop_assert_eq!(&random, &input);
        }
    }
}
