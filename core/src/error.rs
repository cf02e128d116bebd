use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unsupported difficulty: {0} pairs")]
    InvalidDifficulty(u8),
    #[error("Deck must hold every face value exactly twice")]
    InvalidDeck,
    #[error("No card face with index {0}")]
    InvalidFace(u8),
}

pub type Result<T> = core::result::Result<T, GameError>;
