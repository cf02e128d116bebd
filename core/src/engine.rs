use alloc::vec;
use alloc::vec::Vec;

use crate::*;

/// How long a mismatched pair stays face up before [`Session::resolve_mismatch`] is due.
pub const MISMATCH_DELAY_MS: u32 = 700;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingFirstPick,
    AwaitingSecondPick,
    Evaluating,
    Won,
}

impl SessionState {
    pub const fn accepts_picks(self) -> bool {
        matches!(self, Self::AwaitingFirstPick | Self::AwaitingSecondPick)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Token for the delayed flip-back of a mismatched pair.
///
/// It carries the generation of the session that produced it, a token from an earlier deal is
/// discarded when it finally fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingRevert {
    generation: u32,
    first: CardIndex,
    second: CardIndex,
}

impl PendingRevert {
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    pub const fn cards(&self) -> (CardIndex, CardIndex) {
        (self.first, self.second)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    deck: Option<Deck>,
    cards: Vec<CardState>,
    first_pick: Option<CardIndex>,
    second_pick: Option<CardIndex>,
    moves: u32,
    matched_pairs: u8,
    clock: Clock,
    state: SessionState,
    generation: u32,
}

impl Session {
    pub fn new() -> Self {
        Self {
            deck: None,
            cards: Vec::new(),
            first_pick: None,
            second_pick: None,
            moves: 0,
            matched_pairs: 0,
            clock: Clock::new(),
            state: SessionState::Idle,
            generation: 0,
        }
    }

    /// Deals a fresh shuffled deck and resets the session.
    pub fn start<P: Presentation + ?Sized>(
        &mut self,
        pair_count: u8,
        seed: u64,
        view: &mut P,
    ) -> Result<()> {
        let deck = build_deck(pair_count, seed)?;
        self.start_with_deck(deck, view);
        Ok(())
    }

    /// Resets the session around an already dealt deck.
    pub fn start_with_deck<P: Presentation + ?Sized>(&mut self, deck: Deck, view: &mut P) {
        self.cards = vec![CardState::Hidden; deck.len()];
        self.first_pick = None;
        self.second_pick = None;
        self.moves = 0;
        self.matched_pairs = 0;
        self.clock.reset();
        self.state = SessionState::AwaitingFirstPick;
        self.generation = self.generation.wrapping_add(1);

        log::debug!(
            "new game: {} pairs, generation {}",
            deck.pair_count(),
            self.generation
        );
        view.render_board(&deck);
        self.deck = Some(deck);
    }

    /// Flips the card at `index`; anything not allowed right now is ignored.
    pub fn pick<P: Presentation + ?Sized>(&mut self, index: CardIndex, view: &mut P) -> PickOutcome {
        if !self.state.accepts_picks() || self.first_pick == Some(index) {
            return PickOutcome::Ignored;
        }
        let Some(face) = self.deck.as_ref().and_then(|deck| deck.face_at(index)) else {
            return PickOutcome::Ignored;
        };
        if !self.cards[index].is_hidden() {
            return PickOutcome::Ignored;
        }

        if !self.clock.is_running() {
            self.clock.start();
        }
        self.cards[index] = CardState::Revealed;
        view.reveal(index, face);

        let Some(first) = self.first_pick else {
            log::trace!("first pick: {}", index);
            self.first_pick = Some(index);
            self.state = SessionState::AwaitingSecondPick;
            return PickOutcome::Revealed;
        };

        log::trace!("second pick: {}", index);
        self.second_pick = Some(index);
        self.moves = self.moves.saturating_add(1);
        self.state = SessionState::Evaluating;

        if self.face_at(first) == Some(face) {
            self.settle_match(first, index, view)
        } else {
            view.on_fail_feedback();
            PickOutcome::Mismatched(PendingRevert {
                generation: self.generation,
                first,
                second: index,
            })
        }
    }

    /// Flips a mismatched pair back over; returns false when the token is stale.
    pub fn resolve_mismatch<P: Presentation + ?Sized>(
        &mut self,
        pending: PendingRevert,
        view: &mut P,
    ) -> bool {
        let expected = (self.first_pick, self.second_pick);
        if pending.generation != self.generation
            || self.state != SessionState::Evaluating
            || expected != (Some(pending.first), Some(pending.second))
        {
            log::debug!(
                "dropping stale revert from generation {} (now {})",
                pending.generation,
                self.generation
            );
            return false;
        }

        for index in [pending.first, pending.second] {
            self.cards[index] = CardState::Hidden;
            view.hide(index);
        }
        self.clear_picks();
        self.state = SessionState::AwaitingFirstPick;
        true
    }

    /// One second of wall time has passed.
    pub fn tick(&mut self) -> bool {
        self.clock.tick()
    }

    fn settle_match<P: Presentation + ?Sized>(
        &mut self,
        first: CardIndex,
        second: CardIndex,
        view: &mut P,
    ) -> PickOutcome {
        for index in [first, second] {
            self.cards[index] = CardState::Matched;
            view.mark_matched(index);
        }
        self.matched_pairs += 1;
        view.on_match_feedback();
        self.clear_picks();

        if self.matched_pairs == self.pair_count() {
            self.clock.stop();
            self.state = SessionState::Won;
            let finished = FinishedGame {
                pair_count: self.pair_count(),
                elapsed_secs: self.clock.elapsed_secs(),
                moves: self.moves,
            };
            log::debug!(
                "won in {} with {} moves",
                self.clock.formatted(),
                self.moves
            );
            view.on_win(&self.clock.formatted(), self.moves);
            PickOutcome::Won(finished)
        } else {
            self.state = SessionState::AwaitingFirstPick;
            PickOutcome::Matched
        }
    }

    fn clear_picks(&mut self) {
        self.first_pick = None;
        self.second_pick = None;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, SessionState::Evaluating)
    }

    pub fn is_won(&self) -> bool {
        self.state.is_finished()
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.deck.as_ref().map(Deck::difficulty)
    }

    pub fn pair_count(&self) -> u8 {
        self.deck.as_ref().map_or(0, Deck::pair_count)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn card_at(&self, index: CardIndex) -> Option<CardState> {
        self.cards.get(index).copied()
    }

    pub fn face_at(&self, index: CardIndex) -> Option<FaceValue> {
        self.deck.as_ref().and_then(|deck| deck.face_at(index))
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> u8 {
        self.matched_pairs
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.elapsed_secs()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// faces 0..4 laid out as `0 1 2 3 0 1 2 3`
    fn fixed_deck() -> Deck {
        let faces = [0, 1, 2, 3, 0, 1, 2, 3]
            .into_iter()
            .map(|index| FaceValue::new(index).unwrap())
            .collect();
        Deck::from_faces(faces).unwrap()
    }

    fn started() -> Session {
        let mut session = Session::new();
        session.start_with_deck(fixed_deck(), &mut ());
        session
    }

    fn expect_mismatch(outcome: PickOutcome) -> PendingRevert {
        match outcome {
            PickOutcome::Mismatched(pending) => pending,
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn new_session_is_idle_and_ignores_picks() {
        let mut session = Session::new();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.pick(0, &mut ()), PickOutcome::Ignored);
        assert!(!session.tick());
    }

    #[test]
    fn start_resets_and_renders() {
        let mut session = Session::new();
        let mut events: Vec<ViewEvent> = Vec::new();

        session.start(4, 9, &mut events).unwrap();

        assert_eq!(session.state(), SessionState::AwaitingFirstPick);
        assert_eq!(session.card_count(), 8);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.matched_pairs(), 0);
        assert!(!session.clock().is_running());
        assert_eq!(events, vec![ViewEvent::RenderBoard { cards: 8 }]);
    }

    #[test]
    fn invalid_difficulty_leaves_session_untouched() {
        let mut session = started();
        session.pick(0, &mut ());
        let before = session.clone();
        let mut events: Vec<ViewEvent> = Vec::new();

        assert_eq!(
            session.start(5, 1, &mut events),
            Err(GameError::InvalidDifficulty(5))
        );
        assert_eq!(session, before);
        assert!(events.is_empty());
    }

    #[test]
    fn first_pick_starts_clock_and_reveals() {
        let mut session = started();
        let mut events: Vec<ViewEvent> = Vec::new();

        assert_eq!(session.pick(2, &mut events), PickOutcome::Revealed);

        assert_eq!(session.state(), SessionState::AwaitingSecondPick);
        assert!(session.clock().is_running());
        assert_eq!(session.card_at(2), Some(CardState::Revealed));
        assert_eq!(
            events,
            vec![ViewEvent::Reveal {
                index: 2,
                face: FaceValue::new(2).unwrap()
            }]
        );
    }

    #[test]
    fn repicking_first_card_is_a_no_op() {
        let mut session = started();
        session.pick(0, &mut ());
        let before = session.clone();

        assert_eq!(session.pick(0, &mut ()), PickOutcome::Ignored);
        assert_eq!(session, before);
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn out_of_range_pick_is_ignored() {
        let mut session = started();

        assert_eq!(session.pick(8, &mut ()), PickOutcome::Ignored);
        assert_eq!(session.pick(usize::MAX, &mut ()), PickOutcome::Ignored);
        assert_eq!(session.state(), SessionState::AwaitingFirstPick);
    }

    #[test]
    fn mismatch_counts_one_move_then_reverts() {
        let mut session = started();
        let mut events: Vec<ViewEvent> = Vec::new();

        session.pick(0, &mut events);
        let pending = expect_mismatch(session.pick(1, &mut events));

        assert_eq!(session.moves(), 1);
        assert_eq!(session.state(), SessionState::Evaluating);
        assert!(session.is_locked());
        assert_eq!(events.last(), Some(&ViewEvent::FailFeedback));

        // locked until the revert fires
        assert_eq!(session.pick(2, &mut events), PickOutcome::Ignored);
        assert_eq!(session.card_at(2), Some(CardState::Hidden));

        events.clear();
        assert!(session.resolve_mismatch(pending, &mut events));

        assert_eq!(session.state(), SessionState::AwaitingFirstPick);
        assert!(!session.is_locked());
        assert_eq!(session.moves(), 1);
        assert_eq!(session.card_at(0), Some(CardState::Hidden));
        assert_eq!(session.card_at(1), Some(CardState::Hidden));
        assert_eq!(
            events,
            vec![ViewEvent::Hide { index: 0 }, ViewEvent::Hide { index: 1 }]
        );
    }

    #[test]
    fn revert_token_is_single_use() {
        let mut session = started();
        session.pick(0, &mut ());
        let pending = expect_mismatch(session.pick(1, &mut ()));

        assert!(session.resolve_mismatch(pending, &mut ()));
        assert!(!session.resolve_mismatch(pending, &mut ()));
    }

    #[test]
    fn match_marks_both_cards() {
        let mut session = started();
        let mut events: Vec<ViewEvent> = Vec::new();

        session.pick(0, &mut events);
        let partner = session.deck().unwrap().partner_of(0).unwrap();
        assert_eq!(session.pick(partner, &mut events), PickOutcome::Matched);

        assert_eq!(session.matched_pairs(), 1);
        assert_eq!(session.moves(), 1);
        assert_eq!(session.state(), SessionState::AwaitingFirstPick);
        assert_eq!(session.card_at(0), Some(CardState::Matched));
        assert_eq!(session.card_at(partner), Some(CardState::Matched));
        assert!(events.contains(&ViewEvent::MarkMatched { index: 0 }));
        assert!(events.contains(&ViewEvent::MarkMatched { index: partner }));
        assert_eq!(events.last(), Some(&ViewEvent::MatchFeedback));
    }

    #[test]
    fn picking_matched_card_is_ignored() {
        let mut session = started();
        session.pick(0, &mut ());
        session.pick(4, &mut ());
        let before = session.clone();

        assert_eq!(session.pick(0, &mut ()), PickOutcome::Ignored);
        assert_eq!(session.pick(4, &mut ()), PickOutcome::Ignored);
        assert_eq!(session, before);
    }

    #[test]
    fn mismatch_then_match_scenario() {
        let mut session = Session::new();
        session.start(4, 1234, &mut ()).unwrap();
        let deck = session.deck().unwrap().clone();

        // find a second card that does not match card 0
        let other = (1..deck.len()).find(|&i| deck[i] != deck[0]).unwrap();
        session.pick(0, &mut ());
        let pending = expect_mismatch(session.pick(other, &mut ()));
        assert!(session.resolve_mismatch(pending, &mut ()));

        assert_eq!(session.state(), SessionState::AwaitingFirstPick);
        assert_eq!(session.moves(), 1);
        assert_eq!(session.card_at(0), Some(CardState::Hidden));
        assert_eq!(session.card_at(other), Some(CardState::Hidden));

        let partner = deck.partner_of(0).unwrap();
        session.pick(0, &mut ());
        assert_eq!(session.pick(partner, &mut ()), PickOutcome::Matched);
        assert_eq!(session.matched_pairs(), 1);
        assert_eq!(session.moves(), 2);
    }

    #[test]
    fn matching_every_pair_wins() {
        let mut session = Session::new();
        session.start(4, 99, &mut ()).unwrap();
        let deck = session.deck().unwrap().clone();
        let mut events: Vec<ViewEvent> = Vec::new();
        let mut outcome = PickOutcome::Ignored;

        for _ in 0..3 {
            session.tick();
        }
        for index in 0..deck.len() {
            if session.card_at(index) != Some(CardState::Hidden) {
                continue;
            }
            let partner = deck.partner_of(index).unwrap();
            session.pick(index, &mut events);
            outcome = session.pick(partner, &mut events);
            session.tick();
        }

        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.matched_pairs(), 4);
        assert_eq!(session.moves(), 4);
        assert!(!session.clock().is_running());
        // three ticks land between the first pick and the win
        let elapsed = session.elapsed_secs();
        assert_eq!(elapsed, 3);
        assert_eq!(
            outcome,
            PickOutcome::Won(FinishedGame {
                pair_count: 4,
                elapsed_secs: elapsed,
                moves: 4,
            })
        );
        assert_eq!(
            events.last(),
            Some(&ViewEvent::Win {
                time: format_elapsed(elapsed),
                moves: 4
            })
        );

        // terminal
        assert_eq!(session.pick(0, &mut ()), PickOutcome::Ignored);
        assert!(!session.tick());
    }

    #[test]
    fn matched_pairs_never_decrease_or_overflow() {
        for seed in 0..20 {
            let mut session = Session::new();
            session.start(6, seed, &mut ()).unwrap();
            let deck = session.deck().unwrap().clone();
            let mut last = 0;

            // scattered picks; a mismatch is reverted and the first card paired up right after
            for round in 0..500 {
                if session.is_won() {
                    break;
                }
                let a = round % deck.len();
                let b = (round * 7 + 3) % deck.len();
                session.pick(a, &mut ());
                if let PickOutcome::Mismatched(pending) = session.pick(b, &mut ()) {
                    assert!(session.resolve_mismatch(pending, &mut ()));
                    session.pick(a, &mut ());
                }
                if let Some(first) = session.first_pick {
                    session.pick(deck.partner_of(first).unwrap(), &mut ());
                }

                assert!(session.matched_pairs() >= last);
                assert!(session.matched_pairs() <= session.pair_count());
                assert_eq!(session.is_won(), session.matched_pairs() == session.pair_count());
                last = session.matched_pairs();
            }
            assert!(session.is_won());
        }
    }

    #[test]
    fn restart_discards_pending_revert() {
        let mut session = started();
        session.pick(0, &mut ());
        let stale = expect_mismatch(session.pick(1, &mut ()));

        session.start_with_deck(fixed_deck(), &mut ());
        session.pick(0, &mut ());
        session.pick(1, &mut ());
        let mut events: Vec<ViewEvent> = Vec::new();

        assert!(!session.resolve_mismatch(stale, &mut events));
        assert!(events.is_empty());
        assert_eq!(session.state(), SessionState::Evaluating);
        assert_eq!(session.card_at(0), Some(CardState::Revealed));
        assert_eq!(stale.generation() + 1, session.generation());
    }

    #[test]
    fn restart_stops_and_zeroes_clock() {
        let mut session = started();
        session.pick(0, &mut ());
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_secs(), 2);

        session.start_with_deck(fixed_deck(), &mut ());

        assert_eq!(session.elapsed_secs(), 0);
        assert!(!session.clock().is_running());
        assert!(!session.tick());
    }
}
