/// Player-visible state of a single card on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

impl CardState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::Hidden
    }
}
