//! Data models for per-word mastery

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a word sits in the learning process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MasteryStatus {
    /// Never practiced
    New,
    /// Practiced at least once, below the threshold
    Learning,
    /// Flagged by the learner for extra practice
    Focus,
    /// Mastered, automatically or by "Got it"
    Known,
    /// Set aside by the learner
    Skipped,
}

impl Default for MasteryStatus {
    fn default() -> Self {
        Self::New
    }
}

impl MasteryStatus {
    pub const ALL: [MasteryStatus; 5] = [
        Self::New,
        Self::Learning,
        Self::Focus,
        Self::Known,
        Self::Skipped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Focus => "focus",
            Self::Known => "known",
            Self::Skipped => "skipped",
        }
    }

    /// Known and skipped words never enter a study session
    pub fn is_session_eligible(&self) -> bool {
        !matches!(self, Self::Known | Self::Skipped)
    }
}

impl fmt::Display for MasteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MasteryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "learning" => Ok(Self::Learning),
            "focus" => Ok(Self::Focus),
            "known" => Ok(Self::Known),
            "skipped" => Ok(Self::Skipped),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

/// Mutable learning state for one word
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryState {
    #[serde(default)]
    pub status: MasteryStatus,
    #[serde(default)]
    pub encounters: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MasteryState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Aggregate progress over a set of words
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub percent_complete: u32,
}

/// Counts over the browse-filtered word list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStats {
    pub total: usize,
    pub known: usize,
    pub learning: usize,
    pub percent_complete: u32,
}

/// Rounded share of `part` in `total`, 0 for an empty set
pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as u32
    }
}
