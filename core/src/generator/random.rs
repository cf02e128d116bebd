use alloc::vec::Vec;

use super::*;

/// Takes the first faces of the alphabet, doubles them and shuffles the result uniformly.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Deck {
        use rand::prelude::*;

        let mut faces: Vec<FaceValue> = (0..difficulty.pair_count())
            .filter_map(FaceValue::new)
            .flat_map(|face| [face, face])
            .collect();

        // Fisher-Yates, last position first
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in (1..faces.len()).rev() {
            let j = rng.random_range(0..=i);
            faces.swap(i, j);
        }

        log::trace!("dealt {} cards with seed {:#x}", faces.len(), self.seed);
        Deck::new_unchecked(difficulty, faces)
    }
}
