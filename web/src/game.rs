use crate::history::{HistoryProps, HistoryView, LocalHistory};
use crate::settings::{self, Settings, SettingsView};
use crate::sound::ToneSynth;
use crate::theme::Theme;
use crate::utils::*;
use gloo::timers::callback::{Interval, Timeout};
use memoria_core as game;
use game::{CardIndex, CardState, PickOutcome, ViewEvent};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

/// Delay between the winning pick and the congratulation alert.
const WIN_ALERT_DELAY_MS: u32 = 200;

/// Delay between a new deal and moving keyboard focus onto the board.
const BOARD_FOCUS_DELAY_MS: u32 = 200;

const CARD_CLASS: &str = "card-tile";

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pick(CardIndex),
    Tick,
    RevertMismatch(game::PendingRevert),
    NewGame,
    FocusBoard,
    UpdateSettings(Settings),
    ApplyTheme(Theme),
}

fn win_message(time: &str, moves: u32) -> String {
    format!("Congratulations! You won in {} with {} moves.", time, moves)
}

fn matches_label(session: &game::Session) -> String {
    format!("{}/{}", session.matched_pairs(), session.pair_count())
}

fn board_state_class(session: &game::Session) -> &'static str {
    if session.is_won() {
        "won"
    } else if session.is_locked() {
        "locked"
    } else {
        "playable"
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: CardIndex,
    state: CardState,
    symbol: &'static str,
    callback: Callback<CardIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        state,
        symbol,
        callback,
    } = props.clone();

    let class = classes!(
        CARD_CLASS,
        match state {
            CardState::Hidden => classes!(),
            CardState::Revealed => classes!("flipped"),
            CardState::Matched => classes!("flipped", "matched"),
        }
    );

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("card {} clicked", index);
            callback.emit(index);
        })
    };

    let onkeydown = Callback::from(move |e: KeyboardEvent| {
        let key = e.key();
        if key == "Enter" || key == " " {
            e.prevent_default();
            log::trace!("card {} picked with {:?}", index, key);
            callback.emit(index);
        }
    });

    html! {
        <button
            {class}
            data-idx={index.to_string()}
            aria-label="Card"
            tabindex="0"
            {onclick}
            {onkeydown}
        >
            { if state.is_face_up() { symbol } else { "" } }
        </button>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Deal every game from this seed instead of a random one
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    settings: Settings,
    theme: Theme,
    session: game::Session,
    history: game::HistoryStore<LocalHistory>,
    synth: Option<ToneSynth>,
    forced_seed: Option<u64>,
    _timer_interval: Interval,
    pending_revert: Option<Timeout>,
    pending_alert: Option<Timeout>,
    pending_focus: Option<Timeout>,
    board_ref: NodeRef,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1_000, move || link.send_message(Msg::Tick))
    }

    fn deal(&mut self) {
        // dropping a gloo timeout cancels it
        self.pending_revert = None;
        self.pending_alert = None;

        let seed = self.forced_seed.unwrap_or_else(js_random_seed);
        let pair_count = self.settings.difficulty.pair_count();
        let mut events: Vec<ViewEvent> = Vec::new();
        if let Err(err) = self.session.start(pair_count, seed, &mut events) {
            log::error!("failed to start a game: {}", err);
        }
        log::debug!("dealt {} pairs with seed {:#x}", pair_count, seed);
        self.present(events);
    }

    fn pick(&mut self, ctx: &Context<Self>, index: CardIndex) -> bool {
        let mut events: Vec<ViewEvent> = Vec::new();
        let outcome = self.session.pick(index, &mut events);

        match &outcome {
            PickOutcome::Mismatched(pending) => {
                let link = ctx.link().clone();
                let pending = *pending;
                self.pending_revert = Some(Timeout::new(game::MISMATCH_DELAY_MS, move || {
                    link.send_message(Msg::RevertMismatch(pending))
                }));
            }
            PickOutcome::Won(finished) => {
                self.history.record(finished.into_entry(locale_now()));
            }
            PickOutcome::Ignored | PickOutcome::Revealed | PickOutcome::Matched => {}
        }

        self.present(events);
        outcome.has_update()
    }

    /// Plays the feedback the engine asked for; the board itself is rendered from session state.
    fn present(&mut self, events: Vec<ViewEvent>) {
        for event in events {
            log::trace!("view event: {:?}", event);
            match event {
                ViewEvent::MatchFeedback => {
                    if let Some(synth) = &self.synth {
                        synth.play_match();
                    }
                }
                ViewEvent::FailFeedback => {
                    if let Some(synth) = &self.synth {
                        synth.play_fail();
                    }
                }
                ViewEvent::Win { time, moves } => {
                    let message = win_message(&time, moves);
                    self.pending_alert = Some(Timeout::new(WIN_ALERT_DELAY_MS, move || {
                        gloo::dialogs::alert(&message)
                    }));
                }
                ViewEvent::RenderBoard { .. }
                | ViewEvent::Reveal { .. }
                | ViewEvent::Hide { .. }
                | ViewEvent::MarkMatched { .. } => {}
            }
        }
    }

    fn board_columns(&self) -> u8 {
        let difficulty = self.session.difficulty().unwrap_or(self.settings.difficulty);
        settings::board_columns(difficulty)
    }

    fn schedule_board_focus(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        self.pending_focus = Some(Timeout::new(BOARD_FOCUS_DELAY_MS, move || {
            link.send_message(Msg::FocusBoard)
        }));
    }

    fn focus_first_card(&self) {
        match self.board_ref.cast::<Element>() {
            Some(board) => focus_first_card(&board),
            None => log::warn!("board is not mounted, cannot focus"),
        }
    }
}

fn focus_first_card(board: &Element) {
    let card = match board.query_selector(&format!(".{}", CARD_CLASS)) {
        Ok(Some(card)) => card,
        Ok(None) => return,
        Err(err) => {
            log::warn!("failed to look up the first card: {:?}", err);
            return;
        }
    };
    match card.dyn_into::<HtmlElement>() {
        Ok(card) => {
            if let Err(err) = card.focus() {
                log::warn!("failed to focus the first card: {:?}", err);
            }
        }
        Err(_) => log::warn!("first card is not an html element"),
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut view = Self {
            settings: LocalOrDefault::local_or_default(),
            theme: Theme::init(),
            session: game::Session::new(),
            history: game::HistoryStore::open(LocalHistory),
            synth: ToneSynth::new(),
            forced_seed: ctx.props().seed,
            _timer_interval: GameView::create_timer(ctx),
            pending_revert: None,
            pending_alert: None,
            pending_focus: None,
            board_ref: NodeRef::default(),
        };
        view.deal();
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Pick(index) => {
                log::debug!("pick card: {}", index);
                self.pick(ctx, index)
            }
            Tick => self.session.tick(),
            RevertMismatch(pending) => {
                self.pending_revert = None;
                let (first, second) = pending.cards();
                log::debug!("flip back cards {} and {}", first, second);
                let mut events: Vec<ViewEvent> = Vec::new();
                let updated = self.session.resolve_mismatch(pending, &mut events);
                self.present(events);
                updated
            }
            NewGame => {
                self.deal();
                self.schedule_board_focus(ctx);
                true
            }
            FocusBoard => {
                self.pending_focus = None;
                self.focus_first_card();
                false
            }
            UpdateSettings(settings) => {
                if self.settings != settings {
                    self.settings = settings;
                    self.settings.local_save();
                    self.deal();
                    true
                } else {
                    false
                }
            }
            ApplyTheme(theme) => {
                theme.apply();
                let updated = self.theme != theme;
                self.theme = theme;
                updated
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let session = &self.session;
        let card_callback = ctx.link().callback(Pick);
        let cb_new_game = ctx.link().callback(|_: MouseEvent| NewGame);
        let cb_settings = ctx.link().callback(UpdateSettings);
        let cb_theme = ctx.link().callback(ApplyTheme);
        let history = HistoryProps::from_store(&self.history);

        html! {
            <div class="memoria">
                <nav>
                    <a class="back" href="../index.html">{"Back"}</a>
                    <SettingsView
                        settings={self.settings}
                        theme={self.theme}
                        on_settings={cb_settings}
                        on_theme={cb_theme}
                    />
                    <button id="startBtn" onclick={cb_new_game}>{"New game"}</button>
                </nav>
                <ul class="status">
                    <li>{"Time "}<output id="timer">{session.clock().formatted()}</output></li>
                    <li>{"Moves "}<output id="moves">{session.moves()}</output></li>
                    <li>{"Matches "}<output id="matches">{matches_label(session)}</output></li>
                </ul>
                <section
                    id="board"
                    ref={self.board_ref.clone()}
                    class={classes!("board", board_state_class(session))}
                    style={format!("--cols: {}", self.board_columns())}
                >
                    {
                        for (0..session.card_count()).map(|index| {
                            let state = session.card_at(index).unwrap_or(CardState::Hidden);
                            let symbol = session.face_at(index).map_or("", |face| face.symbol());
                            let callback = card_callback.clone();
                            html! {
                                <CardView {index} {state} {symbol} {callback}/>
                            }
                        })
                    }
                </section>
                <HistoryView ..history/>
            </div>
        }
    }
}
