//! Static word dataset loading

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use super::models::{WordEntry, WordOrigin, DEFAULT_LEVELS};

const BUNDLED_DATASET: &str = include_str!("../../data/builtin_words.json");

/// The immutable base dictionary
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    words: Vec<WordEntry>,
}

impl Dataset {
    /// The word list compiled into the binary
    pub fn bundled() -> Self {
        match Self::from_json(BUNDLED_DATASET) {
            Ok(dataset) => dataset,
            Err(e) => {
                log::error!("Bundled dataset is malformed: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, std::io::Error> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let words: Vec<WordEntry> = serde_json::from_str(content)?;
        Ok(Self::from_words(words))
    }

    /// Build a dataset, forcing builtin origin and dropping repeated ids
    /// (first occurrence wins).
    pub fn from_words(words: Vec<WordEntry>) -> Self {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .filter(|w| !w.id.is_empty() && seen.insert(w.id.clone()))
            .map(|mut w| {
                w.origin = WordOrigin::Builtin;
                w
            })
            .collect();
        Self { words }
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn get(&self, id: &str) -> Option<&WordEntry> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The standard tiers plus any extra level labels found in `words`, sorted
pub fn collect_levels<'a>(words: impl IntoIterator<Item = &'a WordEntry>) -> Vec<String> {
    let mut levels: BTreeSet<String> = DEFAULT_LEVELS.iter().map(|l| l.to_string()).collect();
    for word in words {
        if let Some(level) = &word.level {
            levels.insert(level.clone());
        }
    }
    levels.into_iter().collect()
}

/// Distinct category labels present in `words`, sorted
pub fn collect_categories<'a>(words: impl IntoIterator<Item = &'a WordEntry>) -> Vec<String> {
    words
        .into_iter()
        .filter_map(|w| w.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
