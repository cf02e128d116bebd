use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use memoria_core::{HISTORY_KEY, HistoryBackend, HistoryEntry, HistoryStore, best_label};
use yew::prelude::*;

/// History persisted in localStorage as the plain JSON array.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalHistory;

impl HistoryBackend for LocalHistory {
    type Error = StorageError;

    fn load(&self) -> Result<Vec<HistoryEntry>, Self::Error> {
        match LocalStorage::get(HISTORY_KEY) {
            Err(StorageError::KeyNotFound(_)) => Ok(Vec::new()),
            result => result,
        }
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), Self::Error> {
        LocalStorage::set(HISTORY_KEY, entries)
    }
}

pub(crate) fn format_entry(entry: &HistoryEntry) -> String {
    format!(
        "{} • {} pairs • {} • {} moves",
        entry.date, entry.difficulty, entry.time, entry.moves
    )
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct HistoryProps {
    pub entries: Vec<HistoryEntry>,
    pub best_time: AttrValue,
    pub best_moves: AttrValue,
}

impl HistoryProps {
    pub(crate) fn from_store<B: HistoryBackend>(store: &HistoryStore<B>) -> Self {
        Self {
            entries: store.entries().to_vec(),
            best_time: best_label(store.best_by_time().map(|entry| entry.time.as_str())).into(),
            best_moves: best_label(store.best_by_moves().map(|entry| entry.moves)).into(),
        }
    }
}

#[function_component]
pub(crate) fn HistoryView(props: &HistoryProps) -> Html {
    html! {
        <aside class="history">
            <dl>
                <dt>{"Best time"}</dt>
                <dd id="bestTime">{props.best_time.clone()}</dd>
                <dt>{"Best moves"}</dt>
                <dd id="bestMoves">{props.best_moves.clone()}</dd>
            </dl>
            <ol id="historyList">
                { for props.entries.iter().map(|entry| html! { <li>{format_entry(entry)}</li> }) }
            </ol>
        </aside>
    }
}
