//! Error types for study-helper operations.
//!
//! Defines error types for the fallible subsystems:
//! - LLM API interactions
//! - Study operations (summaries, quizzes, homework answers)
//!
//! Extraction and normalization never fail; they degrade to `None` or to
//! degenerate items instead.

use thiserror::Error;

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing API key: OPENAI_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },
}

/// Errors surfaced by the study operations.
#[derive(Debug, Error)]
pub enum StudyError {
    /// The caller supplied empty or unusable input.
    #[error("{0}")]
    InvalidInput(String),

    /// No structured payload could be found in the model output.
    #[error("Failed to parse {what} output. {hint}")]
    ParseFailed { what: String, hint: String },

    /// Structured output was found but no item passed validation.
    #[error("No valid {0} produced")]
    NoValidItems(String),

    /// The model returned no content at all.
    #[error("Empty LLM response")]
    EmptyResponse,

    /// Underlying LLM failure.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl StudyError {
    /// Shorthand for the quiz parse failure shown to users.
    pub fn quiz_parse_failed() -> Self {
        StudyError::ParseFailed {
            what: "quiz".to_string(),
            hint: "Try rephrasing the topic.".to_string(),
        }
    }
}

/// Result type alias for study operations.
pub type StudyResult<T> = Result<T, StudyError>;
