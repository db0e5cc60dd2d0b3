//! Mastery state machine
//!
//! Automatic transitions:
//! - an encounter moves `New` to `Learning`
//! - reaching `REQUIRED_ENCOUNTERS` moves any status to `Known`
//!
//! `Focus` and `Skipped` are left alone by encounters below the threshold.
//! Every status can also be set directly by the learner.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::models::{MasteryState, MasteryStatus};
use crate::review::ReviewQueue;

/// Encounters after which a word is considered mastered
pub const REQUIRED_ENCOUNTERS: u32 = 5;

/// Result of applying one encounter to a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncounterResult {
    pub encounters: u32,
    pub status: MasteryStatus,
    /// Not yet known, so the word should be reviewed again
    pub needs_review: bool,
}

/// Calculate the state after one more encounter
pub fn next_after_encounter(state: &MasteryState) -> EncounterResult {
    let encounters = state.encounters.saturating_add(1);

    let status = if encounters >= REQUIRED_ENCOUNTERS {
        MasteryStatus::Known
    } else if state.status == MasteryStatus::New {
        MasteryStatus::Learning
    } else {
        state.status
    };

    EncounterResult {
        encounters,
        status,
        needs_review: status != MasteryStatus::Known,
    }
}

/// Per-word learning state, keyed by word id.
///
/// Operations on ids the tracker has never seen are no-ops.
#[derive(Debug, Clone, Default)]
pub struct MasteryTracker {
    states: HashMap<String, MasteryState>,
}

impl MasteryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_states(states: HashMap<String, MasteryState>) -> Self {
        Self { states }
    }

    /// Start tracking `id` with fresh state unless it is already tracked.
    /// Returns true when a new state was created.
    pub fn ensure(&mut self, id: &str) -> bool {
        if self.states.contains_key(id) {
            return false;
        }
        self.states.insert(id.to_string(), MasteryState::new());
        true
    }

    /// Start tracking `id` with the given state unless it is already tracked
    pub fn ensure_with(&mut self, id: &str, state: MasteryState) {
        self.states.entry(id.to_string()).or_insert(state);
    }

    pub fn forget(&mut self, id: &str) -> Option<MasteryState> {
        self.states.remove(id)
    }

    /// Drop every state whose id `keep` rejects
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.states.retain(|id, _| keep(id));
    }

    pub fn get(&self, id: &str) -> Option<&MasteryState> {
        self.states.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut MasteryState> {
        self.states.get_mut(id)
    }

    /// Overlay a persisted note and timestamp without touching progress
    pub fn apply_persisted(
        &mut self,
        id: &str,
        note: Option<String>,
        last_updated_at: Option<DateTime<Utc>>,
    ) {
        if let Some(state) = self.states.get_mut(id) {
            if note.is_some() {
                state.note = note;
            }
            if last_updated_at.is_some() {
                state.last_updated_at = last_updated_at;
            }
        }
    }

    /// Current status, `New` for untracked ids
    pub fn status_of(&self, id: &str) -> MasteryStatus {
        self.states.get(id).map(|s| s.status).unwrap_or_default()
    }

    pub fn encounters_of(&self, id: &str) -> u32 {
        self.states.get(id).map(|s| s.encounters).unwrap_or(0)
    }

    pub fn states(&self) -> &HashMap<String, MasteryState> {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Record one completed practice exposure
    pub fn increment_encounters(
        &mut self,
        id: &str,
        queue: &mut ReviewQueue,
    ) -> Option<&MasteryState> {
        let state = self.states.get_mut(id)?;
        let EncounterResult {
            encounters,
            status,
            needs_review,
        } = next_after_encounter(state);

        state.encounters = encounters;
        state.status = status;
        state.last_seen_at = Some(Utc::now());

        if needs_review {
            queue.push(id);
        } else {
            queue.remove(id);
        }

        log::debug!("Encounter for '{}': {} ({})", id, encounters, status);
        Some(state)
    }

    /// Learner override of the status
    pub fn set_status(
        &mut self,
        id: &str,
        status: MasteryStatus,
        queue: &mut ReviewQueue,
    ) -> Option<&MasteryState> {
        let state = self.states.get_mut(id)?;
        let now = Utc::now();
        state.status = status;
        state.last_seen_at = Some(now);
        state.last_updated_at = Some(now);

        match status {
            MasteryStatus::Learning => queue.push(id),
            MasteryStatus::Known => {
                queue.remove(id);
            }
            _ => {}
        }

        Some(state)
    }

    /// Set or clear the free-text note. Returns false for unknown ids.
    pub fn set_note(&mut self, id: &str, note: Option<String>) -> bool {
        match self.states.get_mut(id) {
            Some(state) => {
                state.note = note.filter(|n| !n.trim().is_empty());
                state.last_updated_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    /// Wipe learning progress for every word. Notes survive.
    pub fn reset_all(&mut self, queue: &mut ReviewQueue) {
        for state in self.states.values_mut() {
            state.encounters = 0;
            state.status = MasteryStatus::New;
            state.last_seen_at = None;
        }
        queue.clear();
    }
}
