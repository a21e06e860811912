//! Structured response extraction for LLM output.
//!
//! Turns free-form model text into canonical quiz items in three steps:
//! [`extract`] finds the embedded JSON payload, [`normalize_all`] maps each
//! record onto [`CanonicalItem`], and [`filter_valid`] drops items that are not
//! complete multiple-choice questions.
//!
//! ```
//! use study_helper::extraction::{extract, filter_valid, normalize_all};
//!
//! let response = r#"Here is your quiz:
//! [{"q": "2+2?", "A": "3", "B": "4", "C": "5", "D": "22", "correct": "B"}]"#;
//!
//! let value = extract(response).expect("payload present");
//! let items = filter_valid(normalize_all(&value));
//! assert_eq!(items[0].answer.as_deref(), Some("B. 4"));
//! ```

pub mod filter;
pub mod item;
pub mod text;

pub use filter::{filter_valid, ItemRules, OptionCount, Rejection};
pub use item::{normalize, normalize_all, CanonicalItem, FALLBACK_QUESTION_CHARS};
pub use text::{
    analyze_structure, extract, extract_with_strategy, Extraction, Strategy, StructureAnalysis,
    MAX_NESTING_DEPTH,
};
