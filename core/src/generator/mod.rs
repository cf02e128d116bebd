use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Deck;
}

/// Deals a shuffled deck for `pair_count` pairs, seeded by `seed`.
pub fn build_deck(pair_count: u8, seed: u64) -> Result<Deck> {
    let difficulty = Difficulty::from_pair_count(pair_count)?;
    Ok(RandomDeckGenerator::new(seed).generate(difficulty))
}
