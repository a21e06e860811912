//! LLM integration for study-helper.
//!
//! The study operations talk to a model through the [`LlmProvider`] trait.
//! [`OpenAiClient`] implements it for any OpenAI-compatible endpoint; tests
//! substitute canned providers.
//!
//! ```ignore
//! use study_helper::config::LlmSettings;
//! use study_helper::llm::{GenerationRequest, LlmProvider, Message, OpenAiClient};
//!
//! let client = OpenAiClient::new(&LlmSettings::from_env()?)?;
//! let request = GenerationRequest::new("", vec![Message::user("Hello!")]);
//! let response = client.generate(request).await?;
//! ```

pub mod openai;

pub use openai::{
    Choice, GenerationRequest, GenerationResponse, LlmProvider, Message, OpenAiClient, Usage,
};
