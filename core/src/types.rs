use core::fmt;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Card faces, in the order they are drawn into a deck.
pub const ALPHABET: [&str; 18] = [
    "🐶", "🐱", "🦊", "🐼", "🐸", "🦁", "🐵", "🦄", "🦉", "🐙", "🐢", "🦖", "🐝", "🦋", "🐞", "🍎",
    "🍕", "⚽️",
];

/// Position of a card on the board.
pub type CardIndex = usize;

/// A card face, stored as its position in [`ALPHABET`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FaceValue(u8);

impl FaceValue {
    pub fn new(index: u8) -> Option<Self> {
        (usize::from(index) < ALPHABET.len()).then_some(Self(index))
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub fn symbol(self) -> &'static str {
        ALPHABET[usize::from(self.0)]
    }
}

impl fmt::Display for FaceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<u8> for FaceValue {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index).ok_or(GameError::InvalidFace(index))
    }
}

impl From<FaceValue> for u8 {
    fn from(face: FaceValue) -> Self {
        face.0
    }
}

/// Supported board sizes, named by pair count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Four,
    Six,
    Eight,
    Twelve,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Four, Self::Six, Self::Eight, Self::Twelve];

    pub const fn pair_count(self) -> u8 {
        use Difficulty::*;
        match self {
            Four => 4,
            Six => 6,
            Eight => 8,
            Twelve => 12,
        }
    }

    pub const fn card_count(self) -> usize {
        self.pair_count() as usize * 2
    }

    pub fn from_pair_count(pair_count: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.pair_count() == pair_count)
            .filter(|difficulty| usize::from(difficulty.pair_count()) <= ALPHABET.len())
            .ok_or(GameError::InvalidDifficulty(pair_count))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Eight
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(pair_count: u8) -> Result<Self> {
        Self::from_pair_count(pair_count)
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.pair_count()
    }
}
