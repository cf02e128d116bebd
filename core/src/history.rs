use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Display;
use serde::{Deserialize, Deserializer, Serialize};

use crate::*;

/// Maximum number of won games kept in the history.
pub const HISTORY_CAPACITY: usize = 30;

/// Storage key the history is serialized under.
pub const HISTORY_KEY: &str = "memory_history";

/// Ranking used for entries whose time cannot be read back.
pub const UNPARSEABLE_TIME_SECS: u32 = 999_999;

/// Summary of a won session, before it is stamped with a date.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FinishedGame {
    pub pair_count: u8,
    pub elapsed_secs: u32,
    pub moves: u32,
}

impl FinishedGame {
    pub fn into_entry(self, date: impl Into<String>) -> HistoryEntry {
        HistoryEntry {
            date: date.into(),
            difficulty: self.pair_count,
            time: format_elapsed(self.elapsed_secs),
            moves: self.moves,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub difficulty: u8,
    #[serde(default, deserialize_with = "time_or_empty")]
    pub time: String,
    pub moves: u32,
}

/// Reads `time` leniently: null or a non-string value becomes an empty, unrankable time.
fn time_or_empty<'de, D>(deserializer: D) -> core::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(time) => time,
        _ => String::new(),
    })
}

impl HistoryEntry {
    pub fn elapsed_secs(&self) -> u32 {
        parse_elapsed(&self.time).unwrap_or(UNPARSEABLE_TIME_SECS)
    }
}

/// Durable home of the serialized history.
pub trait HistoryBackend {
    type Error: Display;

    fn load(&self) -> core::result::Result<Vec<HistoryEntry>, Self::Error>;
    fn save(&mut self, entries: &[HistoryEntry]) -> core::result::Result<(), Self::Error>;
}

/// In-memory backend holding the history as a JSON string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonBackend {
    raw: Option<String>,
}

impl JsonBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl HistoryBackend for JsonBackend {
    type Error = serde_json::Error;

    fn load(&self) -> core::result::Result<Vec<HistoryEntry>, Self::Error> {
        match &self.raw {
            Some(raw) => serde_json::from_str(raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> core::result::Result<(), Self::Error> {
        self.raw = Some(serde_json::to_string(entries)?);
        Ok(())
    }
}

/// Won games, newest first, bounded by [`HISTORY_CAPACITY`].
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryStore<B> {
    backend: B,
    entries: Vec<HistoryEntry>,
}

impl<B: HistoryBackend> HistoryStore<B> {
    /// Reads the stored history; anything unreadable counts as empty.
    pub fn open(backend: B) -> Self {
        let mut entries = backend.load().unwrap_or_else(|err| {
            log::warn!("discarding unreadable history: {}", err);
            Vec::new()
        });
        entries.truncate(HISTORY_CAPACITY);
        Self { backend, entries }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        log::debug!(
            "history: {} pairs in {} with {} moves",
            entry.difficulty,
            entry.time,
            entry.moves
        );
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        if let Err(err) = self.backend.save(&self.entries) {
            log::warn!("failed to persist history: {}", err);
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best_by_time(&self) -> Option<&HistoryEntry> {
        self.entries.iter().min_by_key(|entry| entry.elapsed_secs())
    }

    pub fn best_by_moves(&self) -> Option<&HistoryEntry> {
        self.entries.iter().min_by_key(|entry| entry.moves)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Text for a best-of slot, `—` when there is nothing recorded.
pub fn best_label(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "—".to_string(), |value| value.to_string())
}
