#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use history::*;
pub use presentation::*;
pub use types::*;

mod card;
mod clock;
mod engine;
mod error;
mod generator;
mod history;
mod presentation;
mod types;

/// Face values in board order, every value present exactly twice.
///
/// Serialized as the plain face sequence; deserializing runs the same checks as
/// [`Deck::from_faces`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FaceValue>", into = "Vec<FaceValue>")]
pub struct Deck {
    difficulty: Difficulty,
    faces: Vec<FaceValue>,
}

impl Deck {
    pub(crate) fn new_unchecked(difficulty: Difficulty, faces: Vec<FaceValue>) -> Self {
        debug_assert_eq!(faces.len(), difficulty.card_count());
        Self { difficulty, faces }
    }

    /// Builds a deck from a prepared face sequence, e.g. a fixed deal.
    pub fn from_faces(faces: Vec<FaceValue>) -> Result<Self> {
        if faces.len() % 2 != 0 {
            return Err(GameError::InvalidDeck);
        }
        let pair_count = u8::try_from(faces.len() / 2)
            .map_err(|_| GameError::InvalidDifficulty(u8::MAX))?;
        let difficulty = Difficulty::from_pair_count(pair_count)?;

        let mut counts: BTreeMap<FaceValue, u8> = BTreeMap::new();
        for &face in &faces {
            *counts.entry(face).or_default() += 1;
        }
        if counts.values().any(|&count| count != 2) {
            return Err(GameError::InvalidDeck);
        }

        Ok(Self { difficulty, faces })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn pair_count(&self) -> u8 {
        self.difficulty.pair_count()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn faces(&self) -> &[FaceValue] {
        &self.faces
    }

    pub fn face_at(&self, index: CardIndex) -> Option<FaceValue> {
        self.faces.get(index).copied()
    }

    /// Index of the other card carrying the same face.
    pub fn partner_of(&self, index: CardIndex) -> Option<CardIndex> {
        let face = self.face_at(index)?;
        self.faces
            .iter()
            .enumerate()
            .find(|&(other, &other_face)| other != index && other_face == face)
            .map(|(other, _)| other)
    }
}

impl TryFrom<Vec<FaceValue>> for Deck {
    type Error = GameError;

    fn try_from(faces: Vec<FaceValue>) -> Result<Self> {
        Self::from_faces(faces)
    }
}

impl From<Deck> for Vec<FaceValue> {
    fn from(deck: Deck) -> Self {
        deck.faces
    }
}

impl Index<CardIndex> for Deck {
    type Output = FaceValue;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.faces[index]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PickOutcome {
    Ignored,
    Revealed,
    Matched,
    Mismatched(PendingRevert),
    Won(FinishedGame),
}

impl PickOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn faces(indices: &[u8]) -> Vec<FaceValue> {
        indices
            .iter()
            .map(|&index| FaceValue::new(index).unwrap())
            .collect()
    }

    #[test]
    fn from_faces_accepts_pairs() {
        let deck = Deck::from_faces(faces(&[0, 1, 2, 3, 3, 2, 1, 0])).unwrap();

        assert_eq!(deck.difficulty(), Difficulty::Four);
        assert_eq!(deck.len(), 8);
        assert_eq!(deck.partner_of(0), Some(7));
        assert_eq!(deck.partner_of(2), Some(5));
        assert_eq!(deck.partner_of(8), None);
    }

    #[test]
    fn from_faces_rejects_triples() {
        let result = Deck::from_faces(faces(&[0, 0, 0, 1, 2, 2, 3, 3]));

        assert_eq!(result, Err(GameError::InvalidDeck));
    }

    #[test]
    fn from_faces_rejects_unsupported_sizes() {
        assert_eq!(
            Deck::from_faces(faces(&[0, 0, 1, 1, 2, 2])),
            Err(GameError::InvalidDifficulty(3))
        );
        assert_eq!(Deck::from_faces(vec![]), Err(GameError::InvalidDifficulty(0)));
        assert_eq!(
            Deck::from_faces(faces(&[0, 0, 1])),
            Err(GameError::InvalidDeck)
        );
    }

    #[test]
    fn deserialized_deck_is_validated() {
        let deck: Deck = serde_json::from_str("[0,1,2,3,3,2,1,0]").unwrap();
        assert_eq!(deck.difficulty(), Difficulty::Four);
        assert_eq!(serde_json::to_string(&deck).unwrap(), "[0,1,2,3,3,2,1,0]");

        for raw in [
            "[200,200]",
            "[200,200,1,1,2,2,3,3]",
            "[0,0,1,1]",
            "[0,0,0,1,2,2,3,3]",
            r#"{"difficulty":4,"faces":[0,0,1,1,2,2,3,3]}"#,
        ] {
            assert!(serde_json::from_str::<Deck>(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn pick_outcome_update_flags() {
        assert!(!PickOutcome::Ignored.has_update());
        assert!(PickOutcome::Revealed.has_update());
        assert!(PickOutcome::Matched.has_update());
    }
}
