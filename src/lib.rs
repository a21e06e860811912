//! study-helper: summaries, quizzes and homework answers from an LLM.
//!
//! The core of the crate is [`extraction`], which turns unreliable model
//! output into canonical quiz items. [`study`] wraps it together with an
//! [`llm`] client into the three study operations exposed by the CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod study;

// Re-export commonly used types
pub use config::{ConfigError, LlmSettings, StudyConfig};
pub use error::{LlmError, StudyError, StudyResult};
pub use extraction::{extract, filter_valid, normalize, CanonicalItem};
pub use study::StudyAssistant;
