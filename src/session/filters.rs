//! Filter and session preference state

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::mastery::MasteryStatus;
use crate::vocabulary::WordEntry;

pub const MIN_SESSION_LENGTH: usize = 1;
pub const MAX_SESSION_LENGTH: usize = 50;
pub const DEFAULT_SESSION_LENGTH: usize = 20;

/// Level/status selection applied when building study sessions.
/// An empty set means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningFilter {
    #[serde(default)]
    pub levels: BTreeSet<String>,
    #[serde(default)]
    pub statuses: BTreeSet<MasteryStatus>,
}

impl LearningFilter {
    /// Words without a level pass any level selection
    pub fn matches(&self, entry: &WordEntry, status: MasteryStatus) -> bool {
        let level_match = self.levels.is_empty()
            || entry
                .level
                .as_ref()
                .map_or(true, |level| self.levels.contains(level));
        let status_match = self.statuses.is_empty() || self.statuses.contains(&status);
        level_match && status_match
    }
}

/// Filters for the word list view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MasteryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub search: String,
}

impl BrowseFilter {
    pub fn matches(&self, entry: &WordEntry, status: MasteryStatus) -> bool {
        if let Some(level) = &self.level {
            if entry.level.as_ref() != Some(level) {
                return false;
            }
        }
        if let Some(wanted) = self.status {
            if status != wanted {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if entry.category.as_ref() != Some(category) {
                return false;
            }
        }

        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        let needle = fold_diacritics(term);
        fold_diacritics(&entry.id).contains(&needle)
            || entry
                .meaning
                .as_deref()
                .map_or(false, |m| fold_diacritics(m).contains(&needle))
    }
}

/// Length and mode of the next study session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(default = "default_session_length")]
    pub length: usize,
    #[serde(default = "default_smart")]
    pub smart: bool,
}

fn default_session_length() -> usize {
    DEFAULT_SESSION_LENGTH
}

fn default_smart() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_SESSION_LENGTH,
            smart: true,
        }
    }
}

impl SessionConfig {
    pub fn clamp_length(length: usize) -> usize {
        length.clamp(MIN_SESSION_LENGTH, MAX_SESSION_LENGTH)
    }
}

/// Every filter dimension plus session preferences, persisted together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub learning: LearningFilter,
    #[serde(default)]
    pub browse: BrowseFilter,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Lowercase and strip Vietnamese (and common Latin) diacritics
pub fn fold_diacritics(text: &str) -> String {
    text.to_lowercase().chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ' | 'ấ'
        | 'ẩ' | 'ẫ' | 'ậ' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' | 'ë' => 'e',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ' | 'ớ'
        | 'ở' | 'ỡ' | 'ợ' | 'ö' => 'o',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' | 'û' | 'ü' => 'u',
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' | 'ÿ' => 'y',
        'đ' => 'd',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}
