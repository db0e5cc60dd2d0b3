//! The merged, deduplicated word catalog

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use super::models::WordEntry;

const EVENT_CAPACITY: usize = 64;

/// Notification sent to anything displaying catalog contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// The whole catalog was (re)built
    Reloaded { total: usize },
    /// A word was inserted or its definition changed
    WordUpserted(String),
    WordRemoved(String),
}

/// A catalog entry joined with its persisted per-word overrides
#[derive(Debug, Clone, PartialEq)]
pub struct MergedWord {
    pub entry: WordEntry,
    pub note: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

/// Merge the static dataset with learner data.
///
/// Custom entries replace dataset entries with the same id in place and
/// otherwise append in their own order (a later duplicate custom entry wins).
/// Notes and timestamps attach by id; blank notes are ignored.
pub fn merge_sources(
    dataset: &[WordEntry],
    custom: &[WordEntry],
    notes: &HashMap<String, String>,
    timestamps: &HashMap<String, DateTime<Utc>>,
) -> Vec<MergedWord> {
    let mut entries: Vec<WordEntry> = Vec::with_capacity(dataset.len() + custom.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for word in dataset {
        if positions.contains_key(word.id.as_str()) {
            continue;
        }
        positions.insert(word.id.as_str(), entries.len());
        entries.push(word.clone());
    }

    for word in custom {
        match positions.get(word.id.as_str()) {
            Some(&pos) => entries[pos] = word.clone(),
            None => {
                positions.insert(word.id.as_str(), entries.len());
                entries.push(word.clone());
            }
        }
    }

    entries
        .into_iter()
        .map(|entry| {
            let note = notes
                .get(&entry.id)
                .filter(|n| !n.trim().is_empty())
                .cloned();
            let last_updated_at = timestamps.get(&entry.id).copied();
            MergedWord {
                entry,
                note,
                last_updated_at,
            }
        })
        .collect()
}

/// Ordered word collection with id lookup and change notifications
pub struct Catalog {
    words: Vec<WordEntry>,
    index: HashMap<String, usize>,
    events: broadcast::Sender<CatalogEvent>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            words: Vec::new(),
            index: HashMap::new(),
            events,
        }
    }

    /// Receive a `CatalogEvent` after every change
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: CatalogEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Replace the contents wholesale
    pub fn replace_all(&mut self, words: Vec<WordEntry>) {
        self.words = words;
        self.reindex();
        self.emit(CatalogEvent::Reloaded {
            total: self.words.len(),
        });
    }

    /// Insert a new word at the end, or overwrite the existing one in place.
    /// Returns true when the word was not present before.
    pub fn upsert(&mut self, entry: WordEntry) -> bool {
        let id = entry.id.clone();
        let inserted = match self.index.get(&id) {
            Some(&pos) => {
                self.words[pos] = entry;
                false
            }
            None => {
                self.index.insert(id.clone(), self.words.len());
                self.words.push(entry);
                true
            }
        };
        self.emit(CatalogEvent::WordUpserted(id));
        inserted
    }

    pub fn remove(&mut self, id: &str) -> Option<WordEntry> {
        let pos = self.index.remove(id)?;
        let removed = self.words.remove(pos);
        self.reindex();
        self.emit(CatalogEvent::WordRemoved(id.to_string()));
        Some(removed)
    }

    fn reindex(&mut self) {
        self.index = self
            .words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id.clone(), i))
            .collect();
    }

    pub fn get(&self, id: &str) -> Option<&WordEntry> {
        self.index.get(id).map(|&pos| &self.words[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn custom_words(&self) -> Vec<WordEntry> {
        self.words.iter().filter(|w| w.is_custom()).cloned().collect()
    }
}
