//! Persisted shapes for the store
//!
//! Keys written to the durable store:
//! ```text
//! wordwise-storage            # StateSnapshot: words with mastery, filters, caches, queue
//! wordwise-custom-words       # Vec<WordEntry> added by the learner
//! wordwise-word-notes         # { word: note }
//! wordwise-word-last-updated  # { word: RFC 3339 timestamp }
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enrichment::{QuizQuestion, WordDefinition};
use crate::mastery::MasteryState;
use crate::review::ReviewQueue;
use crate::session::FilterState;
use crate::vocabulary::WordEntry;

pub const STATE_KEY: &str = "wordwise-storage";
pub const CUSTOM_WORDS_KEY: &str = "wordwise-custom-words";
pub const NOTES_KEY: &str = "wordwise-word-notes";
pub const LAST_UPDATED_KEY: &str = "wordwise-word-last-updated";

/// Bumped when the snapshot layout changes incompatibly
pub const SNAPSHOT_VERSION: u32 = 1;

/// One word as stored in the full snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedWord {
    #[serde(flatten)]
    pub entry: WordEntry,
    #[serde(flatten)]
    pub mastery: MasteryState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub words: Vec<PersistedWord>,
    #[serde(default)]
    pub filters: FilterState,
    #[serde(default)]
    pub review_queue: ReviewQueue,
    #[serde(default)]
    pub definition_cache: HashMap<String, WordDefinition>,
    #[serde(default)]
    pub quiz_cache: HashMap<String, QuizQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl StateSnapshot {
    pub fn mastery_states(&self) -> HashMap<String, MasteryState> {
        self.words
            .iter()
            .map(|w| (w.entry.id.clone(), w.mastery.clone()))
            .collect()
    }
}

pub type NoteMap = HashMap<String, String>;
pub type TimestampMap = HashMap<String, DateTime<Utc>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mastery::MasteryStatus;

    #[test]
    fn test_persisted_word_is_flat() {
        let mut entry = WordEntry::new("brave").with_level("A2");
        entry.meaning = Some("dũng cảm".into());
        let word = PersistedWord {
            entry,
            mastery: MasteryState {
                status: MasteryStatus::Learning,
                encounters: 2,
                ..Default::default()
            },
        };

        let json = serde_json::to_value(&word).unwrap();
        assert_eq!(json["word"], "brave");
        assert_eq!(json["level"], "A2");
        assert_eq!(json["status"], "learning");
        assert_eq!(json["encounters"], 2);

        let back: PersistedWord = serde_json::from_value(json).unwrap();
        assert_eq!(back, word);
    }

    #[test]
    fn test_older_snapshot_missing_fields_loads() {
        let snapshot: StateSnapshot =
            serde_json::from_str(r#"{"words":[{"word":"run"}],"reviewQueue":["run"]}"#).unwrap();

        assert_eq!(snapshot.version, 0);
        assert_eq!(snapshot.words[0].mastery.status, MasteryStatus::New);
        assert_eq!(snapshot.review_queue.ids(), ["run".to_string()]);
        assert!(snapshot.definition_cache.is_empty());
        assert_eq!(snapshot.filters, FilterState::default());
    }
}
