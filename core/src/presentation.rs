use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::*;

/// Display side of the game, called by [`Session`] as the board changes.
pub trait Presentation {
    fn render_board(&mut self, deck: &Deck);
    fn reveal(&mut self, index: CardIndex, face: FaceValue);
    fn hide(&mut self, index: CardIndex);
    fn mark_matched(&mut self, index: CardIndex);
    fn on_match_feedback(&mut self);
    fn on_fail_feedback(&mut self);
    fn on_win(&mut self, time: &str, moves: u32);
}

impl Presentation for () {
    fn render_board(&mut self, _deck: &Deck) {}
    fn reveal(&mut self, _index: CardIndex, _face: FaceValue) {}
    fn hide(&mut self, _index: CardIndex) {}
    fn mark_matched(&mut self, _index: CardIndex) {}
    fn on_match_feedback(&mut self) {}
    fn on_fail_feedback(&mut self) {}
    fn on_win(&mut self, _time: &str, _moves: u32) {}
}

/// A recorded [`Presentation`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    RenderBoard { cards: usize },
    Reveal { index: CardIndex, face: FaceValue },
    Hide { index: CardIndex },
    MarkMatched { index: CardIndex },
    MatchFeedback,
    FailFeedback,
    Win { time: String, moves: u32 },
}

impl Presentation for Vec<ViewEvent> {
    fn render_board(&mut self, deck: &Deck) {
        self.push(ViewEvent::RenderBoard { cards: deck.len() });
    }

    fn reveal(&mut self, index: CardIndex, face: FaceValue) {
        self.push(ViewEvent::Reveal { index, face });
    }

    fn hide(&mut self, index: CardIndex) {
        self.push(ViewEvent::Hide { index });
    }

    fn mark_matched(&mut self, index: CardIndex) {
        self.push(ViewEvent::MarkMatched { index });
    }

    fn on_match_feedback(&mut self) {
        self.push(ViewEvent::MatchFeedback);
    }

    fn on_fail_feedback(&mut self) {
        self.push(ViewEvent::FailFeedback);
    }

    fn on_win(&mut self, time: &str, moves: u32) {
        self.push(ViewEvent::Win {
            time: time.to_string(),
            moves,
        });
    }
}
