//! Answer checking for the practice modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::enrichment::QuizQuestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PracticeMode {
    #[default]
    Flashcard,
    Quiz,
    Spelling,
    Pronunciation,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 4] = [
        PracticeMode::Flashcard,
        PracticeMode::Quiz,
        PracticeMode::Spelling,
        PracticeMode::Pronunciation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PracticeMode::Flashcard => "flashcard",
            PracticeMode::Quiz => "quiz",
            PracticeMode::Spelling => "spelling",
            PracticeMode::Pronunciation => "pronunciation",
        }
    }

    /// Modes that show generated content and benefit from prefetching it
    pub fn uses_definition(&self) -> bool {
        matches!(self, PracticeMode::Flashcard | PracticeMode::Spelling)
    }

    pub fn uses_quiz(&self) -> bool {
        matches!(self, PracticeMode::Quiz)
    }
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PracticeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PracticeMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown practice mode: {}", s))
    }
}

/// How a word left the study screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionOutcome {
    /// The learner got through the exercise
    Completed,
    /// The learner says they already know the word
    Known,
    /// The learner gave up on the word for now
    Skipped,
}

pub fn check_spelling(target: &str, input: &str) -> bool {
    input.trim().to_lowercase() == target.to_lowercase()
}

/// First and last letter with underscores between, e.g. `b _ _ _ e`
pub fn spelling_hint(word: &str) -> String {
    let letters: Vec<char> = word.chars().collect();
    let last = letters.len().saturating_sub(1);
    letters
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i == 0 || i == last {
                c.to_string()
            } else {
                "_".to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn check_quiz_answer(quiz: &QuizQuestion, option: &str) -> bool {
    option == quiz.correct_answer
}

/// Compare a speech recognition transcript with the target word
pub fn compare_transcript(target: &str, transcript: &str) -> bool {
    transcript.trim().to_lowercase() == target.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_spelling() {
        assert!(check_spelling("Brave", "  brave "));
        assert!(!check_spelling("brave", "brav"));
        assert!(!check_spelling("brave", ""));
    }

    #[test]
    fn test_spelling_hint() {
        assert_eq!(spelling_hint("brave"), "b _ _ _ e");
        assert_eq!(spelling_hint("go"), "g o");
        assert_eq!(spelling_hint("a"), "a");
        assert_eq!(spelling_hint(""), "");
    }

    #[test]
    fn test_check_quiz_answer_is_exact() {
        let quiz = QuizQuestion {
            question: "q".into(),
            options: vec!["one".into(), "two".into(), "three".into(), "four".into()],
            correct_answer: "two".into(),
        };
        assert!(check_quiz_answer(&quiz, "two"));
        assert!(!check_quiz_answer(&quiz, "Two"));
        assert!(!check_quiz_answer(&quiz, "one"));
    }

    #[test]
    fn test_compare_transcript() {
        assert!(compare_transcript("Hello", "hello "));
        assert!(!compare_transcript("hello", "hello there"));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Quiz".parse::<PracticeMode>(), Ok(PracticeMode::Quiz));
        assert!("dictation".parse::<PracticeMode>().is_err());
        assert_eq!(PracticeMode::Pronunciation.to_string(), "pronunciation");
    }
}
