//! Lenient decoding of model replies.
//!
//! Models sometimes wrap JSON in a markdown fence even when asked for
//! `application/json`; both forms are accepted.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Remove a surrounding ```` ``` ```` fence (with optional language tag).
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with("```") {
        return text;
    }
    let body = match text.find('\n') {
        Some(nl) => text[nl..].trim(),
        None => text,
    };
    body.strip_suffix("```").map(str::trim).unwrap_or(body)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub short: String,
    pub bullets: Vec<String>,
}

impl Summary {
    /// Decode `{"short": ..., "bullets": [...]}`. Anything else is kept as
    /// the short summary with no bullets.
    pub fn from_model_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(strip_code_fence(text)) {
            Ok(Value::Object(obj)) => Summary {
                short: obj
                    .get("short")
                    .map(value_to_string)
                    .unwrap_or_default(),
                bullets: obj
                    .get("bullets")
                    .and_then(Value::as_array)
                    .map(|arr| arr.iter().map(value_to_string).collect())
                    .unwrap_or_default(),
            },
            _ => {
                warn!("Gemini summary response was not a JSON object, returning raw text");
                Summary {
                    short: text.trim().to_string(),
                    bullets: Vec::new(),
                }
            }
        }
    }
}

/// One generated multiple-choice question, before it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizItem {
    pub question: String,
    pub options: Map<String, Value>,
    pub correct_answer: String,
}

/// Decode a quiz reply. Invalid JSON yields no questions.
pub fn parse_quiz_items(text: &str) -> Vec<QuizItem> {
    let value = match serde_json::from_str::<Value>(strip_code_fence(text)) {
        Ok(v) => v,
        Err(_) => {
            warn!("Gemini quiz response was not valid JSON, returning no questions");
            return Vec::new();
        }
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("questions") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("Gemini quiz response object had no 'questions' array");
                return Vec::new();
            }
        },
        _ => {
            warn!("Gemini quiz response was neither an array nor an object");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(obj) => Some(QuizItem {
                question: obj.get("question").map(value_to_string).unwrap_or_default(),
                options: obj
                    .get("options")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default(),
                correct_answer: obj
                    .get("correct_answer")
                    .map(value_to_string)
                    .unwrap_or_default(),
            }),
            _ => None,
        })
        .collect()
}

fn value_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```\n[1, 2]\n```  "), "[1, 2]");
        // Unterminated fence keeps the body.
        assert_eq!(strip_code_fence("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_summary_from_json() {
        let s = Summary::from_model_text(
            r#"{"short": "Cells make energy.", "bullets": ["Mitochondria", "Chloroplasts"]}"#,
        );
        assert_eq!(s.short, "Cells make energy.");
        assert_eq!(s.bullets, vec!["Mitochondria", "Chloroplasts"]);
    }

    #[test]
    fn test_summary_from_fenced_json() {
        let s = Summary::from_model_text("```json\n{\"short\": \"S\", \"bullets\": []}\n```");
        assert_eq!(s.short, "S");
        assert!(s.bullets.is_empty());
    }

    #[test]
    fn test_summary_missing_fields_default() {
        let s = Summary::from_model_text(r#"{"bullets": ["x", 3]}"#);
        assert_eq!(s.short, "");
        assert_eq!(s.bullets, vec!["x", "3"]);
    }

    #[test]
    fn test_summary_invalid_json_falls_back_to_raw_text() {
        let s = Summary::from_model_text("  The document is about cells.  ");
        assert_eq!(s.short, "The document is about cells.");
        assert!(s.bullets.is_empty());
    }

    #[test]
    fn test_quiz_items_from_array() {
        let items = parse_quiz_items(
            r#"[{"question": "Q1?", "options": {"A": "x", "B": "y"}, "correct_answer": "B"},
                 "not an object",
                 {"question": "Q2?"}]"#,
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].question, "Q1?");
        assert_eq!(items[0].options["B"], "y");
        assert_eq!(items[0].correct_answer, "B");
        assert_eq!(items[1].question, "Q2?");
        assert!(items[1].options.is_empty());
        assert_eq!(items[1].correct_answer, "");
    }

    #[test]
    fn test_quiz_items_from_wrapped_object() {
        let items = parse_quiz_items(
            "```json\n{\"questions\": [{\"question\": \"Q\", \"options\": {}, \"correct_answer\": \"A\"}]}\n```",
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].correct_answer, "A");
    }

    #[test]
    fn test_quiz_invalid_json_is_empty() {
        assert!(parse_quiz_items("Sorry, I cannot help with that.").is_empty());
        assert!(parse_quiz_items("\"just a string\"").is_empty());
        assert!(parse_quiz_items(r#"{"items": []}"#).is_empty());
    }
}
