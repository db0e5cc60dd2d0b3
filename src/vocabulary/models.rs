//! Data models for the vocabulary catalog

use serde::{Deserialize, Serialize};

/// Proficiency tiers every catalog offers, even when no word carries them yet
pub const DEFAULT_LEVELS: [&str; 6] = ["A1", "A2", "B1", "B2", "C1", "C2"];

/// Where a word came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum WordOrigin {
    /// Shipped with the static dataset, cannot be deleted
    #[default]
    Builtin,
    /// Added by the learner
    Custom,
}

/// A catalog record. The literal word is its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    #[serde(rename = "word")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetics: Option<String>,
    /// Translation shown on the back of a card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    /// Monolingual explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default)]
    pub origin: WordOrigin,
}

impl WordEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level: None,
            category: None,
            part_of_speech: None,
            phonetics: None,
            meaning: None,
            explanation: None,
            examples: Vec::new(),
            origin: WordOrigin::Builtin,
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn is_custom(&self) -> bool {
        self.origin == WordOrigin::Custom
    }
}

/// Fields collected when the learner adds a word by hand
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomWordRequest {
    pub word: String,
    pub meaning: String,
    pub explanation: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl CustomWordRequest {
    /// Build the catalog entry, trimming input and dropping empty optionals.
    /// Returns `None` when the word itself is blank.
    pub fn to_entry(&self) -> Option<WordEntry> {
        let id = self.word.trim();
        if id.is_empty() {
            return None;
        }

        Some(WordEntry {
            id: id.to_string(),
            level: non_empty(self.level.as_deref()),
            category: non_empty(self.category.as_deref()),
            part_of_speech: None,
            phonetics: None,
            meaning: non_empty(Some(&self.meaning)),
            explanation: non_empty(Some(&self.explanation)),
            examples: non_empty(self.example.as_deref()).into_iter().collect(),
            origin: WordOrigin::Custom,
        })
    }

    pub fn trimmed_note(&self) -> Option<String> {
        non_empty(self.note.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
