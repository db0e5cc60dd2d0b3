//! Turning generated text into enrichment payloads

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use super::models::{EnrichmentError, QuizQuestion, WordDefinition};

/// Remove a surrounding Markdown code fence (```json ... ```), if any
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// The JSON object in `text`: the fenced body if fenced, otherwise the span
/// from the first `{` to the last `}` so surrounding prose is ignored
pub fn extract_json_object(text: &str) -> &str {
    let body = strip_code_fence(text);
    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => body,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDefinition {
    #[serde(default)]
    english_definition: Option<String>,
    #[serde(default)]
    vietnamese_definition: Option<String>,
    #[serde(default)]
    examples: Option<Vec<String>>,
}

/// Parse a JSON definition, filling missing fields with placeholders
pub fn parse_definition(text: &str) -> Result<WordDefinition, EnrichmentError> {
    let raw: RawDefinition = serde_json::from_str(extract_json_object(text))?;

    let english_definition = raw
        .english_definition
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "Definition not available".to_string());
    let vietnamese_definition = raw
        .vietnamese_definition
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "Không có bản dịch".to_string());
    let examples: Vec<String> = raw
        .examples
        .unwrap_or_default()
        .into_iter()
        .filter(|e| !e.trim().is_empty())
        .collect();
    let examples = if examples.is_empty() {
        vec!["No examples available".to_string()]
    } else {
        examples
    };

    Ok(WordDefinition {
        english_definition,
        vietnamese_definition,
        examples,
    })
}

fn quiz_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*(Question|A|B|C|D|Correct)[ \t]*:[ \t]*(.+?)[ \t\r]*$").expect("Invalid regex")
    })
}

/// Parse the line-based quiz format:
///
/// ```text
/// Question: What is the meaning of "brave"?
/// A: ...
/// B: ...
/// C: ...
/// D: ...
/// Correct: B
/// ```
///
/// An answer letter outside A-D falls back to option A.
pub fn parse_quiz(text: &str) -> Result<QuizQuestion, EnrichmentError> {
    let mut question = None;
    let mut options: [Option<String>; 4] = Default::default();
    let mut correct = None;

    for caps in quiz_line_regex().captures_iter(text) {
        let value = caps[2].to_string();
        match &caps[1] {
            "Question" => question = question.or(Some(value)),
            "A" => options[0] = options[0].take().or(Some(value)),
            "B" => options[1] = options[1].take().or(Some(value)),
            "C" => options[2] = options[2].take().or(Some(value)),
            "D" => options[3] = options[3].take().or(Some(value)),
            "Correct" => correct = correct.or(Some(value)),
            _ => {}
        }
    }

    let question = question.ok_or_else(|| EnrichmentError::Parse("missing question".into()))?;
    let correct = correct.ok_or_else(|| EnrichmentError::Parse("missing answer".into()))?;
    let options: Vec<String> = options
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| EnrichmentError::Parse("expected four options".into()))?;

    let index = match correct.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('B') => 1,
        Some('C') => 2,
        Some('D') => 3,
        _ => 0,
    };

    Ok(QuizQuestion {
        question,
        correct_answer: options[index].clone(),
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```\n"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
    }

    #[test]
    fn test_extract_json_object() {
        assert_eq!(extract_json_object("Sure! {\"a\":1} Hope it helps."), "{\"a\":1}");
        assert_eq!(extract_json_object("```json\n{\"a\":{}}\n```"), "{\"a\":{}}");
        assert_eq!(extract_json_object("no json here"), "no json here");
    }

    #[test]
    fn test_parse_definition_wrapped_in_prose() {
        let text = r#"Here is the definition you asked for:
{"englishDefinition": "adj. showing courage", "vietnameseDefinition": "dũng cảm", "examples": ["A brave act."]}
Let me know if you need more."#;
        let definition = parse_definition(text).unwrap();
        assert_eq!(definition.english_definition, "adj. showing courage");
        assert_eq!(definition.examples, vec!["A brave act.".to_string()]);
    }

    #[test]
    fn test_parse_definition_in_fence() {
        let text = r#"```json
{
  "englishDefinition": "adj. showing courage",
  "vietnameseDefinition": "dũng cảm",
  "examples": ["She was brave.", ""]
}
```"#;
        let def = parse_definition(text).unwrap();
        assert_eq!(def.english_definition, "adj. showing courage");
        assert_eq!(def.vietnamese_definition, "dũng cảm");
        assert_eq!(def.examples, vec!["She was brave.".to_string()]);
    }

    #[test]
    fn test_parse_definition_fills_gaps() {
        let def = parse_definition(r#"{"englishDefinition": ""}"#).unwrap();
        assert_eq!(def.english_definition, "Definition not available");
        assert_eq!(def.vietnamese_definition, "Không có bản dịch");
        assert_eq!(def.examples, vec!["No examples available".to_string()]);
    }

    #[test]
    fn test_parse_definition_rejects_prose() {
        let err = parse_definition("Sure! Here is the definition you asked for.").unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_parse_quiz() {
        let text = "Quiz for word \"brave\":\nQuestion: What is the meaning of \"brave\"?\nA: scared\nB: courageous\nC: tired\nD: happy\nCorrect: B";
        let quiz = parse_quiz(text).unwrap();

        assert_eq!(quiz.question, "What is the meaning of \"brave\"?");
        assert_eq!(quiz.options, vec!["scared", "courageous", "tired", "happy"]);
        assert_eq!(quiz.correct_answer, "courageous");
    }

    #[test]
    fn test_parse_quiz_unknown_letter_uses_first_option() {
        let text = "Question: q?\nA: one\nB: two\nC: three\nD: four\nCorrect: E";
        assert_eq!(parse_quiz(text).unwrap().correct_answer, "one");
    }

    #[test]
    fn test_parse_quiz_missing_option() {
        let text = "Question: q?\nA: one\nB: two\nD: four\nCorrect: A";
        assert!(matches!(parse_quiz(text), Err(EnrichmentError::Parse(_))));
    }
}
