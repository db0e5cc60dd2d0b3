//! The vocabulary store: one value holding the catalog, learner progress,
//! filters and content caches, persisted through a `DurableStore`.
//!
//! Mastery mutations never fail. If a write to the durable store fails the
//! error is logged and the in-memory state stays authoritative.

pub mod snapshot;

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::enrichment::{ContentCache, QuizQuestion, WordDefinition};
use crate::mastery::{
    percent, CompletionStats, MasteryState, MasteryStatus, MasteryTracker, WordStats,
};
use crate::practice::SessionOutcome;
use crate::review::ReviewQueue;
use crate::session::{select_session, FilterState, SelectionContext, SessionConfig};
use crate::storage::{DurableStore, StorageError};
use crate::vocabulary::dataset::{collect_categories, collect_levels};
use crate::vocabulary::{
    merge_sources, Catalog, CatalogEvent, CustomWordRequest, Dataset, WordEntry, WordOrigin,
};

use snapshot::{
    NoteMap, PersistedWord, StateSnapshot, TimestampMap, CUSTOM_WORDS_KEY, LAST_UPDATED_KEY,
    NOTES_KEY, SNAPSHOT_VERSION, STATE_KEY,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("A word is required")]
    EmptyWord,
}

pub type Result<T> = std::result::Result<T, StoreError>;

pub struct VocabularyStore {
    backend: Box<dyn DurableStore>,
    dataset: Dataset,
    catalog: Catalog,
    mastery: MasteryTracker,
    queue: ReviewQueue,
    filters: FilterState,
    definitions: ContentCache<WordDefinition>,
    quizzes: ContentCache<QuizQuestion>,
    loaded: bool,
    restored: bool,
}

impl VocabularyStore {
    pub fn new(backend: Box<dyn DurableStore>, dataset: Dataset) -> Self {
        Self {
            backend,
            dataset,
            catalog: Catalog::new(),
            mastery: MasteryTracker::new(),
            queue: ReviewQueue::new(),
            filters: FilterState::default(),
            definitions: ContentCache::new(),
            quizzes: ContentCache::new(),
            loaded: false,
            restored: false,
        }
    }

    /// Create and load in one step
    pub fn open(backend: Box<dyn DurableStore>, dataset: Dataset) -> Self {
        let mut store = Self::new(backend, dataset);
        store.load();
        store
    }

    // ===== Loading =====

    /// Build the catalog from the dataset and persisted learner data.
    ///
    /// The first call restores progress, filters, queue and caches from the
    /// saved snapshot. Later calls keep in-memory progress and only start
    /// tracking ids they have not seen before.
    pub fn load(&mut self) {
        let snapshot = if self.loaded {
            None
        } else {
            self.read_json::<StateSnapshot>(STATE_KEY)
        };

        let custom: Vec<WordEntry> = match self.read_json(CUSTOM_WORDS_KEY) {
            Some(words) => words,
            // Keep what is already in memory rather than dropping it with its progress
            None if self.loaded => self.catalog.custom_words(),
            // Fall back to custom words embedded in the snapshot
            None => snapshot
                .as_ref()
                .map(|s| {
                    s.words
                        .iter()
                        .filter(|w| w.entry.is_custom())
                        .map(|w| w.entry.clone())
                        .collect()
                })
                .unwrap_or_default(),
        };
        let custom: Vec<WordEntry> = custom
            .into_iter()
            .map(|mut w| {
                w.origin = WordOrigin::Custom;
                w
            })
            .collect();
        let notes: NoteMap = self.read_json(NOTES_KEY).unwrap_or_default();
        let timestamps: TimestampMap = self.read_json(LAST_UPDATED_KEY).unwrap_or_default();

        if let Some(snapshot) = snapshot {
            self.restore_snapshot(snapshot);
        }

        let merged = merge_sources(self.dataset.words(), &custom, &notes, &timestamps);
        let mut entries = Vec::with_capacity(merged.len());
        let mut fresh = 0;
        for word in merged {
            if self.mastery.ensure(&word.entry.id) {
                fresh += 1;
            }
            self.mastery
                .apply_persisted(&word.entry.id, word.note, word.last_updated_at);
            entries.push(word.entry);
        }

        self.catalog.replace_all(entries);
        // Drop progress for words that left the catalog
        self.mastery.retain(|id| self.catalog.contains(id));
        let queued: Vec<String> = self
            .queue
            .ids()
            .iter()
            .filter(|id| self.catalog.contains(id))
            .cloned()
            .collect();
        self.queue = ReviewQueue::from_ids(queued);

        self.loaded = true;
        log::info!(
            "Loaded {} words ({} custom, {} new to tracking)",
            self.catalog.len(),
            custom.len(),
            fresh
        );
    }

    /// Rebuild the catalog from persisted sources, keeping progress
    pub fn reload(&mut self) {
        self.load();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether `load` found a saved snapshot to restore
    pub fn has_saved_state(&self) -> bool {
        self.restored
    }

    fn restore_snapshot(&mut self, snapshot: StateSnapshot) {
        log::debug!(
            "Restoring snapshot v{} with {} words",
            snapshot.version,
            snapshot.words.len()
        );
        for (id, state) in snapshot.mastery_states() {
            self.mastery.ensure_with(&id, state);
        }
        self.queue = ReviewQueue::from_ids(snapshot.review_queue.ids().to_vec());
        self.filters = snapshot.filters;
        self.filters.session.length = SessionConfig::clamp_length(self.filters.session.length);
        for (id, definition) in snapshot.definition_cache {
            self.definitions.put(&id, definition);
        }
        for (id, quiz) in snapshot.quiz_cache {
            self.quizzes.put(&id, quiz);
        }
        self.restored = true;
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.read_key(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", key, e);
                None
            }
        }
    }

    // ===== Persistence =====

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.write_key(key, &json)?;
        Ok(())
    }

    /// Write every persisted key
    pub fn persist(&self) -> Result<()> {
        let snapshot = StateSnapshot {
            version: SNAPSHOT_VERSION,
            words: self
                .catalog
                .words()
                .iter()
                .map(|entry| PersistedWord {
                    entry: entry.clone(),
                    mastery: self.mastery.get(&entry.id).cloned().unwrap_or_default(),
                })
                .collect(),
            filters: self.filters.clone(),
            review_queue: self.queue.clone(),
            definition_cache: self.definitions.snapshot(),
            quiz_cache: self.quizzes.snapshot(),
            saved_at: Some(Utc::now()),
        };
        self.write_json(STATE_KEY, &snapshot)?;
        self.write_json(CUSTOM_WORDS_KEY, &self.catalog.custom_words())?;

        let mut notes = NoteMap::new();
        let mut timestamps = TimestampMap::new();
        for (id, state) in self.mastery.states() {
            if let Some(note) = &state.note {
                notes.insert(id.clone(), note.clone());
            }
            if let Some(ts) = state.last_updated_at {
                timestamps.insert(id.clone(), ts);
            }
        }
        self.write_json(NOTES_KEY, &notes)?;
        self.write_json(LAST_UPDATED_KEY, &timestamps)?;
        Ok(())
    }

    fn commit(&self) {
        if let Err(e) = self.persist() {
            log::warn!("Failed to persist vocabulary state: {}", e);
        }
    }

    // ===== Catalog =====

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.catalog.subscribe()
    }

    pub fn words(&self) -> &[WordEntry] {
        self.catalog.words()
    }

    pub fn word(&self, id: &str) -> Option<&WordEntry> {
        self.catalog.get(id)
    }

    pub fn mastery(&self, id: &str) -> Option<&MasteryState> {
        self.mastery.get(id)
    }

    pub fn review_queue(&self) -> &ReviewQueue {
        &self.queue
    }

    /// Review ids that still need practice, oldest first
    pub fn pending_reviews(&self) -> Vec<&str> {
        self.queue
            .pending(|id| self.mastery.status_of(id) == MasteryStatus::Known)
            .collect()
    }

    /// Add a learner word, or update it if it already exists
    pub fn add_custom_word(&mut self, request: &CustomWordRequest) -> Result<WordEntry> {
        let entry = request.to_entry().ok_or(StoreError::EmptyWord)?;
        let id = entry.id.clone();

        let inserted = self.catalog.upsert(entry.clone());
        self.mastery.ensure(&id);
        if let Some(note) = request.trimmed_note() {
            self.mastery.set_note(&id, Some(note));
        } else if let Some(state) = self.mastery.get_mut(&id) {
            state.last_updated_at = Some(Utc::now());
        }
        self.commit();

        log::info!(
            "{} custom word '{}'",
            if inserted { "Added" } else { "Updated" },
            id
        );
        Ok(entry)
    }

    /// Delete a learner word with its progress, note and cached content.
    /// A custom word that shadowed a dataset word gives its slot back to the
    /// dataset entry, which starts over as new.
    ///
    /// Returns `Ok(false)` for unknown ids. Dataset words cannot be removed.
    pub fn remove_word(&mut self, id: &str) -> Result<bool> {
        match self.catalog.get(id) {
            None => return Ok(false),
            Some(entry) if !entry.is_custom() => {
                return Err(StoreError::InvalidOperation(format!(
                    "'{}' is a built-in word and cannot be removed",
                    id
                )));
            }
            Some(_) => {}
        }

        self.mastery.forget(id);
        self.queue.remove(id);
        self.definitions.remove(id);
        self.quizzes.remove(id);
        match self.dataset.get(id).cloned() {
            Some(original) => {
                self.catalog.upsert(original);
                self.mastery.ensure(id);
                log::info!("Removed custom override of '{}'", id);
            }
            None => {
                self.catalog.remove(id);
                log::info!("Removed custom word '{}'", id);
            }
        }
        self.commit();
        Ok(true)
    }

    // ===== Mastery =====

    pub fn increment_encounters(&mut self, id: &str) -> Option<MasteryState> {
        let state = self
            .mastery
            .increment_encounters(id, &mut self.queue)
            .cloned()?;
        self.commit();
        Some(state)
    }

    pub fn set_status(&mut self, id: &str, status: MasteryStatus) -> Option<MasteryState> {
        let state = self.mastery.set_status(id, status, &mut self.queue).cloned()?;
        self.commit();
        Some(state)
    }

    /// Queue a word for reinforcement. Unknown and known words are ignored.
    pub fn add_to_review_queue(&mut self, id: &str) -> bool {
        if !self.catalog.contains(id) || self.mastery.status_of(id) == MasteryStatus::Known {
            return false;
        }
        self.queue.push(id);
        self.commit();
        true
    }

    /// Apply what happened when the learner finished with a word
    pub fn record_outcome(&mut self, id: &str, outcome: SessionOutcome) -> Option<MasteryState> {
        match outcome {
            SessionOutcome::Completed => self.increment_encounters(id),
            SessionOutcome::Known => self.set_status(id, MasteryStatus::Known),
            SessionOutcome::Skipped => {
                let state = self
                    .mastery
                    .set_status(id, MasteryStatus::Skipped, &mut self.queue)
                    .cloned()?;
                self.queue.push(id);
                self.commit();
                Some(state)
            }
        }
    }

    /// Wipe learning progress, the review queue and both caches.
    /// Words and notes are kept.
    pub fn reset_all(&mut self) {
        self.mastery.reset_all(&mut self.queue);
        self.definitions.clear();
        self.quizzes.clear();
        self.commit();
        log::info!("Reset progress for {} words", self.mastery.len());
    }

    // ===== Notes =====

    pub fn note(&self, id: &str) -> Option<&str> {
        self.mastery.get(id).and_then(|s| s.note.as_deref())
    }

    /// Set or clear (with `None` or blank text) a note. Unknown ids are ignored.
    pub fn set_note(&mut self, id: &str, note: Option<String>) -> bool {
        if !self.mastery.set_note(id, note) {
            return false;
        }
        self.commit();
        true
    }

    // ===== Filters =====

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_learning_levels(&mut self, levels: BTreeSet<String>) {
        self.filters.learning.levels = levels;
        self.commit();
    }

    pub fn set_learning_statuses(&mut self, statuses: BTreeSet<MasteryStatus>) {
        self.filters.learning.statuses = statuses;
        self.commit();
    }

    pub fn set_browse_level(&mut self, level: Option<String>) {
        self.filters.browse.level = level;
        self.commit();
    }

    pub fn set_browse_status(&mut self, status: Option<MasteryStatus>) {
        self.filters.browse.status = status;
        self.commit();
    }

    pub fn set_browse_category(&mut self, category: Option<String>) {
        self.filters.browse.category = category;
        self.commit();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.browse.search = search.into();
        self.commit();
    }

    pub fn session_config(&self) -> SessionConfig {
        self.filters.session
    }

    /// Set the session length, clamped to the allowed range
    pub fn set_session_length(&mut self, length: usize) {
        self.filters.session.length = SessionConfig::clamp_length(length);
        self.commit();
    }

    pub fn set_smart_mode(&mut self, smart: bool) {
        self.filters.session.smart = smart;
        self.commit();
    }

    // ===== Views =====

    /// Words matching the browse filter, in catalog order
    pub fn filtered_words(&self) -> Vec<&WordEntry> {
        self.catalog
            .words()
            .iter()
            .filter(|w| {
                self.filters
                    .browse
                    .matches(w, self.mastery.status_of(&w.id))
            })
            .collect()
    }

    /// A session using the saved length and mode
    pub fn session_words<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<WordEntry> {
        let config = self.filters.session;
        self.session_words_with(config.length, config.smart, rng)
    }

    pub fn session_words_with<R: Rng + ?Sized>(
        &self,
        length: usize,
        smart: bool,
        rng: &mut R,
    ) -> Vec<WordEntry> {
        let ctx = SelectionContext {
            words: self.catalog.words(),
            mastery: &self.mastery,
            queue: &self.queue,
            filter: &self.filters.learning,
        };
        let session = select_session(&ctx, length, smart, rng);
        log::debug!(
            "Selected {} words (requested {}, smart: {})",
            session.len(),
            length,
            smart
        );
        session
    }

    // ===== Stats =====

    /// Counts over the browse-filtered list
    pub fn word_stats(&self) -> WordStats {
        let words = self.filtered_words();
        let total = words.len();
        let mut known = 0;
        let mut learning = 0;
        for word in words {
            match self.mastery.status_of(&word.id) {
                MasteryStatus::Known => known += 1,
                MasteryStatus::Learning => learning += 1,
                _ => {}
            }
        }
        WordStats {
            total,
            known,
            learning,
            percent_complete: percent(known, total),
        }
    }

    /// Progress over the whole catalog
    pub fn completion_stats(&self) -> CompletionStats {
        let mut counts: HashMap<MasteryStatus, usize> = HashMap::new();
        for word in self.catalog.words() {
            *counts.entry(self.mastery.status_of(&word.id)).or_insert(0) += 1;
        }
        let total = self.catalog.len();
        let completed = counts.get(&MasteryStatus::Known).copied().unwrap_or(0);
        CompletionStats {
            total,
            completed,
            in_progress: counts.get(&MasteryStatus::Learning).copied().unwrap_or(0),
            not_started: counts.get(&MasteryStatus::New).copied().unwrap_or(0),
            percent_complete: percent(completed, total),
        }
    }

    pub fn levels(&self) -> Vec<String> {
        collect_levels(self.catalog.words())
    }

    pub fn categories(&self) -> Vec<String> {
        collect_categories(self.catalog.words())
    }

    // ===== Content cache =====

    pub fn definition(&self, id: &str) -> Option<WordDefinition> {
        self.definitions.get(id)
    }

    pub fn put_definition(&mut self, id: &str, definition: WordDefinition) {
        self.definitions.put(id, definition);
        self.commit();
    }

    pub fn quiz(&self, id: &str) -> Option<QuizQuestion> {
        self.quizzes.get(id)
    }

    pub fn put_quiz(&mut self, id: &str, quiz: QuizQuestion) {
        self.quizzes.put(id, quiz);
        self.commit();
    }

    /// Shared handle for background fetches. Call `persist` to save what they add.
    pub fn definition_cache(&self) -> ContentCache<WordDefinition> {
        self.definitions.clone()
    }

    pub fn quiz_cache(&self) -> ContentCache<QuizQuestion> {
        self.quizzes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mastery::REQUIRED_ENCOUNTERS;
    use crate::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn dataset(ids: &[&str]) -> Dataset {
        Dataset::from_words(
            ids.iter()
                .map(|id| WordEntry::new(*id).with_level("A1"))
                .collect(),
        )
    }

    fn store_on(backend: &Arc<MemoryStore>, ids: &[&str]) -> VocabularyStore {
        VocabularyStore::open(Box::new(Arc::clone(backend)), dataset(ids))
    }

    fn request(word: &str) -> CustomWordRequest {
        CustomWordRequest {
            word: word.to_string(),
            meaning: "nghĩa".into(),
            explanation: "an explanation".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_reload_keeps_progress() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["a", "b"]);
        store.increment_encounters("a");
        store.set_status("b", MasteryStatus::Focus);

        store.reload();
        store.load();

        let a = store.mastery("a").unwrap();
        assert_eq!(a.encounters, 1);
        assert_eq!(a.status, MasteryStatus::Learning);
        assert_eq!(store.mastery("b").unwrap().status, MasteryStatus::Focus);
    }

    #[test]
    fn test_reload_keeps_custom_words_from_snapshot_only() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .write_key(
                STATE_KEY,
                r#"{"version":1,"words":[{"word":"mine","origin":"custom","status":"learning","encounters":3}]}"#,
            )
            .unwrap();

        let mut store = store_on(&backend, &["a"]);
        assert_eq!(store.mastery("mine").map(|s| s.encounters), Some(3));

        store.reload();

        assert!(store.word("mine").unwrap().is_custom());
        assert_eq!(store.mastery("mine").map(|s| s.encounters), Some(3));
        assert_eq!(store.words().len(), 2);
    }

    #[test]
    fn test_reload_keeps_custom_words_when_key_is_corrupt() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["a"]);
        store.add_custom_word(&request("serendipity")).unwrap();
        store.increment_encounters("serendipity");

        backend.write_key(CUSTOM_WORDS_KEY, "not json").unwrap();
        store.reload();

        assert!(store.word("serendipity").is_some());
        assert_eq!(store.mastery("serendipity").unwrap().encounters, 1);
    }

    #[test]
    fn test_state_survives_reopen() {
        let backend = Arc::new(MemoryStore::new());
        {
            let mut store = store_on(&backend, &["a", "b"]);
            store.increment_encounters("a");
            store.set_note("b", Some("tricky".into()));
            store.set_session_length(7);
            store.put_definition(
                "a",
                WordDefinition {
                    english_definition: "first letter".into(),
                    vietnamese_definition: "chữ a".into(),
                    examples: vec![],
                },
            );
        }

        let store = store_on(&backend, &["a", "b"]);
        assert_eq!(store.mastery("a").unwrap().encounters, 1);
        assert_eq!(store.note("b"), Some("tricky"));
        assert!(store.mastery("b").unwrap().last_updated_at.is_some());
        assert_eq!(store.session_config().length, 7);
        assert_eq!(store.review_queue().ids(), &["a".to_string()]);
        assert!(store.definition("a").is_some());
    }

    #[test]
    fn test_increment_to_threshold_removes_from_sessions() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["only"]);
        for _ in 0..REQUIRED_ENCOUNTERS - 1 {
            store.increment_encounters("only");
        }
        assert_eq!(store.mastery("only").unwrap().encounters, REQUIRED_ENCOUNTERS - 1);

        let state = store.increment_encounters("only").unwrap();
        assert_eq!(state.encounters, REQUIRED_ENCOUNTERS);
        assert_eq!(state.status, MasteryStatus::Known);

        let mut rng = StdRng::seed_from_u64(3);
        assert!(store.session_words_with(10, true, &mut rng).is_empty());
        assert!(store.session_words_with(10, false, &mut rng).is_empty());
        assert!(store.pending_reviews().is_empty());
    }

    #[test]
    fn test_reset_all_is_complete() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["a", "b", "c"]);
        store.increment_encounters("a");
        store.set_status("b", MasteryStatus::Known);
        store.set_status("c", MasteryStatus::Learning);
        store.put_quiz("a", QuizQuestion::fallback("a"));
        store.put_definition("b", WordDefinition::unavailable());

        store.reset_all();

        for word in store.words() {
            let state = store.mastery(&word.id).unwrap();
            assert_eq!(state.encounters, 0);
            assert_eq!(state.status, MasteryStatus::New);
            assert!(state.last_seen_at.is_none());
        }
        assert!(store.review_queue().is_empty());
        assert!(store.definition_cache().is_empty());
        assert!(store.quiz_cache().is_empty());
    }

    #[test]
    fn test_custom_word_lifecycle() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["a"]);
        let mut events = store.subscribe();

        let mut req = request("  serendipity ");
        req.note = Some("from a book".into());
        let entry = store.add_custom_word(&req).unwrap();
        assert_eq!(entry.id, "serendipity");
        assert!(entry.is_custom());
        assert_eq!(
            events.try_recv().unwrap(),
            CatalogEvent::WordUpserted("serendipity".into())
        );
        assert_eq!(store.note("serendipity"), Some("from a book"));
        assert_eq!(
            store.mastery("serendipity").unwrap().status,
            MasteryStatus::New
        );

        // Visible after reopening from the same backend
        let mut reopened = store_on(&backend, &["a"]);
        assert!(reopened.word("serendipity").unwrap().is_custom());

        reopened.increment_encounters("serendipity");
        reopened.put_quiz("serendipity", QuizQuestion::fallback("serendipity"));
        assert_eq!(reopened.remove_word("serendipity").unwrap(), true);
        assert!(reopened.word("serendipity").is_none());
        assert!(reopened.mastery("serendipity").is_none());
        assert!(reopened.quiz("serendipity").is_none());
        assert!(!reopened.review_queue().contains("serendipity"));

        let after = store_on(&backend, &["a"]);
        assert!(after.word("serendipity").is_none());
        assert_eq!(after.note("serendipity"), None);
    }

    #[test]
    fn test_custom_word_overrides_dataset_word() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["run", "walk"]);
        store.increment_encounters("run");

        store.add_custom_word(&request("run")).unwrap();

        assert_eq!(store.words().len(), 2);
        assert!(store.word("run").unwrap().is_custom());
        assert_eq!(store.mastery("run").unwrap().encounters, 1);
    }

    #[test]
    fn test_removing_override_restores_dataset_word() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["run", "walk"]);
        store.add_custom_word(&request("run")).unwrap();
        store.increment_encounters("run");

        assert!(store.remove_word("run").unwrap());

        let ids: Vec<&str> = store.words().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["run", "walk"]);
        assert!(!store.word("run").unwrap().is_custom());
        let state = store.mastery("run").unwrap();
        assert_eq!(state.encounters, 0);
        assert_eq!(state.status, MasteryStatus::New);

        let reopened = store_on(&backend, &["run", "walk"]);
        assert!(!reopened.word("run").unwrap().is_custom());
        assert_eq!(reopened.mastery("run").unwrap().encounters, 0);
    }

    #[test]
    fn test_remove_rules() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["a"]);

        assert!(matches!(
            store.remove_word("a"),
            Err(StoreError::InvalidOperation(_))
        ));
        assert_eq!(store.remove_word("ghost").unwrap(), false);
        assert!(store.word("a").is_some());
    }

    #[test]
    fn test_blank_custom_word_is_rejected() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &[]);
        assert!(matches!(
            store.add_custom_word(&request("   ")),
            Err(StoreError::EmptyWord)
        ));
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["a"]);

        assert!(store.increment_encounters("ghost").is_none());
        assert!(store.set_status("ghost", MasteryStatus::Known).is_none());
        assert!(store.record_outcome("ghost", SessionOutcome::Skipped).is_none());
        assert!(!store.set_note("ghost", Some("x".into())));
        assert!(!store.add_to_review_queue("ghost"));
        assert!(store.review_queue().is_empty());
    }

    #[test]
    fn test_record_outcomes() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["a", "b", "c"]);

        store.record_outcome("a", SessionOutcome::Completed);
        store.record_outcome("b", SessionOutcome::Known);
        store.record_outcome("c", SessionOutcome::Skipped);

        assert_eq!(store.mastery("a").unwrap().status, MasteryStatus::Learning);
        assert_eq!(store.mastery("b").unwrap().status, MasteryStatus::Known);
        assert_eq!(store.mastery("c").unwrap().status, MasteryStatus::Skipped);
        assert_eq!(
            store.review_queue().ids(),
            &["a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_empty_catalog_gives_empty_session() {
        let backend = Arc::new(MemoryStore::new());
        let store = store_on(&backend, &[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(store.session_words_with(10, true, &mut rng).is_empty());
    }

    #[test]
    fn test_stats() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["a", "b", "c", "d"]);
        store.set_status("a", MasteryStatus::Known);
        store.increment_encounters("b");
        store.set_status("c", MasteryStatus::Skipped);

        let completion = store.completion_stats();
        assert_eq!(completion.total, 4);
        assert_eq!(completion.completed, 1);
        assert_eq!(completion.in_progress, 1);
        assert_eq!(completion.not_started, 1);
        assert_eq!(completion.percent_complete, 25);

        store.set_browse_status(Some(MasteryStatus::Known));
        let stats = store.word_stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.known, 1);
        assert_eq!(stats.percent_complete, 100);
    }

    #[test]
    fn test_corrupt_snapshot_is_ignored() {
        let backend = Arc::new(MemoryStore::new());
        backend.write_key(STATE_KEY, "{not json").unwrap();

        let store = store_on(&backend, &["a"]);
        assert_eq!(store.words().len(), 1);
        assert_eq!(store.mastery("a").unwrap().status, MasteryStatus::New);
    }

    #[test]
    fn test_session_length_is_clamped() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = store_on(&backend, &["a"]);
        store.set_session_length(0);
        assert_eq!(store.session_config().length, 1);
        store.set_session_length(500);
        assert_eq!(store.session_config().length, 50);
    }
}
