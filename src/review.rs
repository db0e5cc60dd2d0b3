use serde::{Deserialize, Serialize};

/// Words waiting for reinforcement, oldest requeue at the front.
///
/// An id appears at most once; pushing an id again moves it to the back.
/// Reads never consume entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewQueue {
    items: Vec<String>,
}

impl ReviewQueue {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild from persisted ids, keeping the last occurrence of any repeat
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut queue = Self::new();
        for id in ids {
            queue.push(&id);
        }
        queue
    }

    /// Add an id to the back, dropping any earlier occurrence
    pub fn push(&mut self, id: &str) {
        self.items.retain(|existing| existing != id);
        self.items.push(id.to_string());
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| existing != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn ids(&self) -> &[String] {
        &self.items
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Front-to-back ids still worth reviewing, skipping anything `is_done` rejects
    pub fn pending<'a, F>(&'a self, is_done: F) -> impl Iterator<Item = &'a str> + 'a
    where
        F: Fn(&str) -> bool + 'a,
    {
        self.items
            .iter()
            .map(String::as_str)
            .filter(move |id| !is_done(id))
    }
}
