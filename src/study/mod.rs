//! Study operations backed by an LLM.
//!
//! [`StudyAssistant`] exposes the three operations of the study helper:
//! summarizing text, generating a multiple-choice quiz, and answering a
//! homework question.

mod assistant;
pub mod prompts;

pub use assistant::{
    HomeworkAnswer, Quiz, StudyAssistant, Summary, EMPTY_ANSWER, EMPTY_SUMMARY,
};
