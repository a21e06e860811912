//! Structured payload extraction from free-form LLM text.
//!
//! Models asked for JSON often wrap it in prose or markdown fences. The
//! extractor tries, in order:
//!
//! 1. The whole text as a JSON document
//! 2. The greedy region from the first `[` to the last `]`
//! 3. The greedy region from the first `{` to the last `}`
//!
//! The first candidate that parses wins. The greedy regions are a heuristic:
//! a response with two unrelated bracketed spans (say, a markdown list before
//! the payload) yields a region that does not parse, and the extractor moves
//! on to the next strategy or gives up.
//!
//! # Example
//!
//! ```
//! use study_helper::extraction::extract;
//!
//! let response = "Sure! Here you go:\n[{\"q\": \"2+2?\"}]\nGood luck.";
//! let value = extract(response).expect("array is embedded");
//! assert!(value.is_array());
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Which extraction strategy produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The whole text parsed as JSON.
    Whole,
    /// The greedy `[` ... `]` region parsed.
    ArrayRegion,
    /// The greedy `{` ... `}` region parsed.
    ObjectRegion,
}

/// A successfully extracted value together with the strategy that found it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub value: Value,
    pub strategy: Strategy,
}

/// Deepest array/object nesting the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 127;

fn array_region() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("static regex is valid"))
}

fn object_region() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static regex is valid"))
}

/// Extracts the most plausible structured value embedded in `text`.
///
/// Returns `None` when no strategy yields parseable JSON. Never panics.
///
/// Documents nested deeper than [`MAX_NESTING_DEPTH`] levels are rejected by
/// the parser's recursion limit and yield `None`; this bounds stack use on
/// hostile input.
pub fn extract(text: &str) -> Option<Value> {
    extract_with_strategy(text).map(|extraction| extraction.value)
}

/// Like [`extract`], but also reports which strategy succeeded.
pub fn extract_with_strategy(text: &str) -> Option<Extraction> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(Extraction {
            value,
            strategy: Strategy::Whole,
        });
    }

    let regions = [
        (array_region(), Strategy::ArrayRegion),
        (object_region(), Strategy::ObjectRegion),
    ];

    for (re, strategy) in regions {
        let Some(found) = re.find(text) else {
            continue;
        };
        match serde_json::from_str::<Value>(found.as_str()) {
            Ok(value) => {
                tracing::debug!(?strategy, len = found.len(), "Extracted JSON region");
                return Some(Extraction { value, strategy });
            }
            Err(e) => {
                tracing::debug!(?strategy, error = %e, "JSON region did not parse");
            }
        }
    }

    let analysis = analyze_structure(text);
    if analysis.looks_truncated() {
        tracing::warn!(
            unclosed_braces = analysis.unclosed_braces,
            unclosed_brackets = analysis.unclosed_brackets,
            in_string = analysis.in_string,
            "Response looks like truncated JSON"
        );
    }

    None
}

/// Bracket balance of a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureAnalysis {
    /// Number of unclosed braces ('{' without matching '}')
    pub unclosed_braces: usize,
    /// Number of unclosed brackets ('[' without matching ']')
    pub unclosed_brackets: usize,
    /// Whether the scan ended inside a string literal
    pub in_string: bool,
    /// Byte offset of the first '{' or '['
    pub json_start: Option<usize>,
}

impl StructureAnalysis {
    /// True when JSON-like content starts but never closes.
    pub fn looks_truncated(&self) -> bool {
        self.json_start.is_some()
            && (self.unclosed_braces > 0 || self.unclosed_brackets > 0 || self.in_string)
    }
}

/// Scans `s` and tracks brace/bracket depth outside of string literals.
///
/// Quotes only toggle string state once JSON-like content has started, so
/// apostrophes and quotes in leading prose do not skew the result.
pub fn analyze_structure(s: &str) -> StructureAnalysis {
    let mut brace_depth: isize = 0;
    let mut bracket_depth: isize = 0;
    let mut in_string = false;
    let mut escape_next = false;
    let mut json_start: Option<usize> = None;

    for (i, c) in s.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => {
                escape_next = true;
            }
            '"' if json_start.is_some() => {
                in_string = !in_string;
            }
            '{' if !in_string => {
                json_start.get_or_insert(i);
                brace_depth += 1;
            }
            '}' if !in_string => {
                brace_depth -= 1;
            }
            '[' if !in_string => {
                json_start.get_or_insert(i);
                bracket_depth += 1;
            }
            ']' if !in_string => {
                bracket_depth -= 1;
            }
            _ => {}
        }
    }

    StructureAnalysis {
        unclosed_braces: brace_depth.max(0) as usize,
        unclosed_brackets: bracket_depth.max(0) as usize,
        in_string,
        json_start,
    }
}
