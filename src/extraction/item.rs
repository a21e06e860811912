//! Normalization of loosely shaped quiz records into [`CanonicalItem`]s.
//!
//! Models disagree on field names (`question` / `q` / `prompt`), on how
//! options are laid out (a list, a `{"A": ...}` mapping, top-level `A`..`D`
//! keys) and on how the answer is given (a letter or the full option text).
//! [`normalize`] probes each shape in a fixed priority order and never fails:
//! a record with nothing recognizable still produces an item whose question
//! is a truncated dump of the record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names probed for the question text, in priority order.
const QUESTION_KEYS: &[&str] = &["question", "q", "prompt"];

/// Field names probed for the answer, in priority order.
const ANSWER_KEYS: &[&str] = &["correctAnswer", "correct", "answer", "correct_option", "key"];

/// Field names probed for the explanation, in priority order.
const EXPLANATION_KEYS: &[&str] = &["explanation", "explain", "explanation_text"];

/// Singleton option keys probed when no option list is present.
const OPTION_LETTERS: &[&str] = &["A", "B", "C", "D"];

/// Wrapper keys under which a model sometimes nests the item list.
const LIST_KEYS: &[&str] = &["questions", "quiz", "items"];

/// Maximum characters of the serialized record used as a fallback question.
pub const FALLBACK_QUESTION_CHARS: usize = 200;

/// A quiz item with fixed field names, whatever the source looked like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalItem {
    /// Question text. Empty for null, number and boolean input.
    pub question: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// Correct answer, resolved to option text when given as a letter.
    pub answer: Option<String>,
    /// Explanation of the answer, empty when absent.
    pub explanation: String,
    /// The record this item was built from.
    pub source: Value,
}

impl CanonicalItem {
    fn empty(source: Value) -> Self {
        Self {
            question: String::new(),
            options: Vec::new(),
            answer: None,
            explanation: String::new(),
            source,
        }
    }

    /// Returns true if the item carries a non-empty answer.
    pub fn has_answer(&self) -> bool {
        self.answer.as_deref().is_some_and(|a| !a.is_empty())
    }
}

/// Normalizes a single record. `index` is the record's position in its batch
/// and is only used for logging.
pub fn normalize(item: &Value, index: usize) -> CanonicalItem {
    let mut out = CanonicalItem::empty(item.clone());

    match item {
        Value::Null | Value::Bool(_) | Value::Number(_) => return out,
        Value::String(s) => {
            out.question = s.clone();
            return out;
        }
        Value::Array(_) => {}
        Value::Object(record) => {
            out.question = first_text(record, QUESTION_KEYS).unwrap_or_default();
            out.options = resolve_options(record);
            out.answer = first_text(record, ANSWER_KEYS)
                .map(|answer| resolve_letter(answer, &out.options));
            out.explanation = first_text(record, EXPLANATION_KEYS).unwrap_or_default();
        }
    }

    if out.question.is_empty() {
        out.question = item.to_string().chars().take(FALLBACK_QUESTION_CHARS).collect();
        tracing::trace!(index, "No question field, using serialized record");
    }

    out
}

/// Normalizes every record in an extracted value.
///
/// Arrays yield one item per element. An object wrapping an array under
/// `questions`, `quiz` or `items` yields that array's items. Anything else
/// is treated as a single record.
pub fn normalize_all(value: &Value) -> Vec<CanonicalItem> {
    let records = match value {
        Value::Array(records) => records,
        Value::Object(map) => match LIST_KEYS.iter().find_map(|k| map.get(*k)?.as_array()) {
            Some(records) => records,
            None => return vec![normalize(value, 0)],
        },
        _ => return vec![normalize(value, 0)],
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize(record, index))
        .collect()
}

fn resolve_options(record: &Map<String, Value>) -> Vec<String> {
    match record.get("options") {
        Some(Value::Array(options)) => return options.iter().map(display_text).collect(),
        Some(Value::Object(options)) => {
            return options
                .iter()
                .map(|(key, value)| format!("{}. {}", key, display_text(value)))
                .collect()
        }
        _ => {}
    }

    if let Some(Value::Array(choices)) = record.get("choices") {
        return choices.iter().map(display_text).collect();
    }

    OPTION_LETTERS
        .iter()
        .filter_map(|letter| {
            let text = record.get(*letter).and_then(scalar_text)?;
            Some(format!("{}. {}", letter, text))
        })
        .collect()
}

/// Replaces a lone `A`-`D` letter with the matching option, if there is one.
fn resolve_letter(answer: String, options: &[String]) -> String {
    let trimmed = answer.trim();
    let mut chars = trimmed.chars();
    let (Some(letter), None) = (chars.next(), chars.next()) else {
        return answer;
    };

    let letter = letter.to_ascii_uppercase();
    if !('A'..='D').contains(&letter) {
        return answer;
    }

    let index = letter as usize - 'A' as usize;
    match options.get(index) {
        Some(option) if !option.is_empty() => option.clone(),
        _ => answer,
    }
}

fn first_text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| record.get(*key).and_then(scalar_text))
}

/// Text of a scalar field, `None` when the field is null, empty, `false`
/// or structured.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Display form of an option value: strings verbatim, everything else as
/// compact JSON.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_item() {
        let item = normalize(&Value::Null, 0);
        assert!(item.question.is_empty());
        assert!(item.options.is_empty());
        assert_eq!(item.answer, None);
        assert!(item.explanation.is_empty());
        assert_eq!(item.source, Value::Null);
    }

    #[test]
    fn test_string_item() {
        let item = normalize(&json!("What is Rust?"), 0);
        assert_eq!(item.question, "What is Rust?");
        assert!(item.options.is_empty());
        assert_eq!(item.answer, None);
    }

    #[test]
    fn test_options_mapping_and_letter_answer() {
        let record = json!({
            "question": "Q",
            "options": {"A": "x", "B": "y"},
            "correctAnswer": "A"
        });
        let item = normalize(&record, 0);
        assert_eq!(item.question, "Q");
        assert_eq!(item.options, vec!["A. x", "B. y"]);
        assert_eq!(item.answer.as_deref(), Some("A. x"));
        assert_eq!(item.source, record);
    }

    #[test]
    fn test_letter_keys_and_short_question() {
        let record = json!({"q": "2+2?", "A": "3", "B": "4", "correct": "B"});
        let item = normalize(&record, 0);
        assert_eq!(item.question, "2+2?");
        assert_eq!(item.options, vec!["A. 3", "B. 4"]);
        assert_eq!(item.answer.as_deref(), Some("B. 4"));
    }

    #[test]
    fn test_options_list_used_as_is() {
        let record = json!({
            "question": "Capital of France?",
            "options": ["Berlin", "Paris", "Rome", "Madrid"],
            "answer": "Paris",
            "explanation": "Paris is the capital."
        });
        let item = normalize(&record, 3);
        assert_eq!(item.options, vec!["Berlin", "Paris", "Rome", "Madrid"]);
        assert_eq!(item.answer.as_deref(), Some("Paris"));
        assert_eq!(item.explanation, "Paris is the capital.");
    }

    #[test]
    fn test_choices_and_prompt() {
        let record = json!({
            "prompt": "Pick one",
            "choices": ["one", "two"],
            "key": "b",
            "explain": "two is right"
        });
        let item = normalize(&record, 0);
        assert_eq!(item.question, "Pick one");
        assert_eq!(item.options, vec!["one", "two"]);
        assert_eq!(item.answer.as_deref(), Some("two"));
        assert_eq!(item.explanation, "two is right");
    }

    #[test]
    fn test_letter_out_of_range_kept() {
        let record = json!({"question": "Q", "options": ["a", "b"], "answer": " D "});
        let item = normalize(&record, 0);
        assert_eq!(item.answer.as_deref(), Some(" D "));
    }

    #[test]
    fn test_padded_lowercase_letter_resolves() {
        let record = json!({
            "question": "2+2?",
            "A": "3",
            "B": "4",
            "C": "5",
            "D": "6",
            "answer": " b "
        });
        let item = normalize(&record, 0);
        assert_eq!(item.options.len(), 4);
        assert_eq!(item.answer.as_deref(), Some("B. 4"));
    }

    #[test]
    fn test_empty_options_list_used_as_is() {
        let record = json!({
            "question": "Q",
            "options": [],
            "choices": ["a", "b"],
            "A": "x",
            "B": "y",
            "answer": "A"
        });
        let item = normalize(&record, 0);
        assert!(item.options.is_empty());
        assert_eq!(item.answer.as_deref(), Some("A"));
    }

    #[test]
    fn test_letter_without_options_kept() {
        let record = json!({"question": "Q", "answer": "C"});
        let item = normalize(&record, 0);
        assert!(item.options.is_empty());
        assert_eq!(item.answer.as_deref(), Some("C"));
    }

    #[test]
    fn test_non_letter_answer_untouched() {
        let record = json!({"question": "Q", "options": ["a", "b"], "answer": "E"});
        assert_eq!(normalize(&record, 0).answer.as_deref(), Some("E"));

        let record = json!({"question": "Q", "options": ["a", "b"], "answer": "AB"});
        assert_eq!(normalize(&record, 0).answer.as_deref(), Some("AB"));
    }

    #[test]
    fn test_answer_priority_order() {
        let record = json!({
            "question": "Q",
            "answer": "from answer",
            "correct": "from correct",
            "correctAnswer": null
        });
        let item = normalize(&record, 0);
        assert_eq!(item.answer.as_deref(), Some("from correct"));
    }

    #[test]
    fn test_empty_fields_skipped() {
        let record = json!({"question": "", "q": "fallback q", "explanation": "", "explain": "e"});
        let item = normalize(&record, 0);
        assert_eq!(item.question, "fallback q");
        assert_eq!(item.explanation, "e");
    }

    #[test]
    fn test_numeric_answer_rendered() {
        let record = json!({"question": "How many?", "options": ["1", "2", "3", "4"], "answer": 3});
        let item = normalize(&record, 0);
        assert_eq!(item.answer.as_deref(), Some("3"));
    }

    #[test]
    fn test_letter_keys_skip_missing() {
        let record = json!({"question": "Q", "A": "first", "C": "third", "D": null});
        let item = normalize(&record, 0);
        assert_eq!(item.options, vec!["A. first", "C. third"]);
    }

    #[test]
    fn test_options_string_falls_through_to_letters() {
        let record = json!({"question": "Q", "options": "A or B", "A": "a", "B": "b"});
        let item = normalize(&record, 0);
        assert_eq!(item.options, vec!["A. a", "B. b"]);
    }

    #[test]
    fn test_fallback_question_is_truncated_record() {
        let long = "x".repeat(500);
        let record = json!({"text": long});
        let item = normalize(&record, 0);
        assert_eq!(item.question.chars().count(), FALLBACK_QUESTION_CHARS);
        assert!(item.question.starts_with("{\"text\":\"xxx"));
    }

    #[test]
    fn test_fallback_question_short_record() {
        let record = json!({"answer": "B"});
        let item = normalize(&record, 0);
        assert_eq!(item.question, r#"{"answer":"B"}"#);
        assert_eq!(item.answer.as_deref(), Some("B"));
    }

    #[test]
    fn test_array_item_uses_fallback() {
        let item = normalize(&json!([1, 2]), 0);
        assert_eq!(item.question, "[1,2]");
        assert!(item.options.is_empty());
    }

    #[test]
    fn test_number_and_bool_items_are_empty() {
        for value in [json!(7), json!(0), json!(-1.5), json!(true), json!(false)] {
            let item = normalize(&value, 0);
            assert!(item.question.is_empty(), "question for {}", value);
            assert!(item.options.is_empty());
            assert_eq!(item.answer, None);
            assert!(item.explanation.is_empty());
            assert_eq!(item.source, value);
        }
    }

    #[test]
    fn test_non_string_options_rendered_as_json() {
        let record = json!({"question": "Q", "options": [1, null, {"x": 1}, "d"]});
        let item = normalize(&record, 0);
        assert_eq!(item.options, vec!["1", "null", r#"{"x":1}"#, "d"]);
    }

    #[test]
    fn test_normalize_all_array() {
        let value = json!([{"question": "one"}, "two", null]);
        let items = normalize_all(&value);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].question, "one");
        assert_eq!(items[1].question, "two");
        assert!(items[2].question.is_empty());
    }

    #[test]
    fn test_normalize_all_wrapped_list() {
        let value = json!({"questions": [{"question": "a"}, {"question": "b"}]});
        let items = normalize_all(&value);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].question, "b");
    }

    #[test]
    fn test_normalize_all_single_record() {
        let value = json!({"question": "only"});
        let items = normalize_all(&value);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "only");
    }

    #[test]
    fn test_has_answer() {
        let mut item = normalize(&json!({"question": "Q", "answer": "x"}), 0);
        assert!(item.has_answer());
        item.answer = Some(String::new());
        assert!(!item.has_answer());
        item.answer = None;
        assert!(!item.has_answer());
    }
}
