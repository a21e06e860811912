//! Minimum-shape rules applied to normalized items before they reach a caller.

use std::fmt;

use super::item::CanonicalItem;

/// How many options an item must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionCount {
    /// Exactly `n` options.
    Exactly(usize),
    /// At least `n` options.
    AtLeast(usize),
}

impl OptionCount {
    fn accepts(self, count: usize) -> bool {
        match self {
            OptionCount::Exactly(n) => count == n,
            OptionCount::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for OptionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionCount::Exactly(n) => write!(f, "exactly {}", n),
            OptionCount::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Why an item was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingQuestion,
    OptionCount { expected: OptionCount, actual: usize },
    MissingAnswer,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingQuestion => write!(f, "question is empty"),
            Rejection::OptionCount { expected, actual } => {
                write!(f, "expected {} options, got {}", expected, actual)
            }
            Rejection::MissingAnswer => write!(f, "answer is missing"),
        }
    }
}

/// Validation rules for canonical items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRules {
    /// Required option count.
    pub options: OptionCount,
    /// Whether a non-empty answer is required.
    pub require_answer: bool,
}

impl Default for ItemRules {
    fn default() -> Self {
        Self::quiz()
    }
}

impl ItemRules {
    /// Multiple-choice quiz rules: four options and an answer.
    pub fn quiz() -> Self {
        Self {
            options: OptionCount::Exactly(4),
            require_answer: true,
        }
    }

    /// Sets the required option count.
    pub fn with_options(mut self, options: OptionCount) -> Self {
        self.options = options;
        self
    }

    /// Enables or disables the answer requirement.
    pub fn with_require_answer(mut self, required: bool) -> Self {
        self.require_answer = required;
        self
    }

    /// Checks one item, naming the first rule it breaks.
    pub fn check(&self, item: &CanonicalItem) -> Result<(), Rejection> {
        if item.question.is_empty() {
            return Err(Rejection::MissingQuestion);
        }
        if !self.options.accepts(item.options.len()) {
            return Err(Rejection::OptionCount {
                expected: self.options,
                actual: item.options.len(),
            });
        }
        if self.require_answer && !item.has_answer() {
            return Err(Rejection::MissingAnswer);
        }
        Ok(())
    }

    /// Keeps the items that pass [`ItemRules::check`], preserving order.
    pub fn filter(&self, items: Vec<CanonicalItem>) -> Vec<CanonicalItem> {
        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match self.check(&item) {
                Ok(()) => Some(item),
                Err(reason) => {
                    tracing::debug!(index, %reason, "Dropping item");
                    None
                }
            })
            .collect()
    }
}

/// Keeps the items that are complete four-option quiz questions.
///
/// An empty result means no valid items were produced; reporting that is up
/// to the caller.
pub fn filter_valid(items: Vec<CanonicalItem>) -> Vec<CanonicalItem> {
    ItemRules::quiz().filter(items)
}
