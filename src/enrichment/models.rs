//! Enrichment payloads and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dictionary content shown on the back of a flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDefinition {
    pub english_definition: String,
    pub vietnamese_definition: String,
    pub examples: Vec<String>,
}

impl WordDefinition {
    /// Placeholder used when the service could not be reached
    pub fn unavailable() -> Self {
        Self {
            english_definition: "Failed to load definition".to_string(),
            vietnamese_definition: "Không thể tải định nghĩa".to_string(),
            examples: vec!["Failed to load examples".to_string()],
        }
    }

    /// Placeholder used when the service answered with something unreadable
    pub fn unparsable() -> Self {
        Self {
            english_definition: "Failed to parse definition".to_string(),
            vietnamese_definition: "Không thể phân tích định nghĩa".to_string(),
            examples: vec!["Failed to load examples".to_string()],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::unavailable() || *self == Self::unparsable()
    }
}

/// A four-option multiple choice question about one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn fallback(word: &str) -> Self {
        let options = vec![
            "Failed to load options".to_string(),
            "Please try again".to_string(),
            "Service error occurred".to_string(),
            "Check connection".to_string(),
        ];
        Self {
            question: format!("What does \"{}\" mean?", word),
            correct_answer: options[0].clone(),
            options,
        }
    }
}

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service error: {status} - {message}")]
    Service { status: u16, message: String },

    #[error("Service returned no content")]
    EmptyResponse,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing API key (set {0})")]
    MissingApiKey(String),

    #[error("No models configured")]
    NoModels,
}

impl EnrichmentError {
    /// The service answered, but not in the expected shape
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Json(_) | Self::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_quiz_is_answerable() {
        let quiz = QuizQuestion::fallback("brave");
        assert_eq!(quiz.options.len(), 4);
        assert!(quiz.options.contains(&quiz.correct_answer));
        assert!(quiz.question.contains("brave"));
    }

    #[test]
    fn test_placeholders_are_recognized() {
        assert!(WordDefinition::unavailable().is_placeholder());
        assert!(WordDefinition::unparsable().is_placeholder());
        let real = WordDefinition {
            english_definition: "x".into(),
            vietnamese_definition: "y".into(),
            examples: vec![],
        };
        assert!(!real.is_placeholder());
    }
}
