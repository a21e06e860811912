//! Study assistant: summaries, quizzes and homework answers.
//!
//! Each operation sends one prompt to the model and reshapes the reply.
//! Quizzes go through the extraction pipeline, so a reply that wraps its
//! JSON in prose or uses unusual field names still yields clean questions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::StudyConfig;
use crate::error::{StudyError, StudyResult};
use crate::extraction::{self, CanonicalItem, ItemRules};
use crate::llm::{GenerationRequest, LlmProvider, Message};

use super::prompts;

/// Reply used when the model returns an empty summary.
pub const EMPTY_SUMMARY: &str = "No summary generated.";

/// Reply used when the model returns an empty homework answer.
pub const EMPTY_ANSWER: &str = "No answer returned.";

/// A summary of a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
}

/// A generated multiple-choice quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<CanonicalItem>,
}

/// The answer to a homework question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeworkAnswer {
    pub answer: String,
}

/// Forwards study requests to an LLM and reshapes the replies.
pub struct StudyAssistant {
    llm: Arc<dyn LlmProvider>,
    config: StudyConfig,
    rules: ItemRules,
}

impl std::fmt::Debug for StudyAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudyAssistant")
            .field("config", &self.config)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl StudyAssistant {
    /// Creates an assistant using quiz rules of four options per question.
    pub fn new(llm: Arc<dyn LlmProvider>, config: StudyConfig) -> Self {
        Self {
            llm,
            config,
            rules: ItemRules::quiz(),
        }
    }

    /// Replaces the rules quiz questions must satisfy.
    pub fn with_rules(mut self, rules: ItemRules) -> Self {
        self.rules = rules;
        self
    }

    /// Summarizes `text` in a few sentences.
    pub async fn summarize(&self, text: &str) -> StudyResult<Summary> {
        let text = require_input(text, "Text is required")?;
        let reply = self
            .ask(prompts::summary_prompt(text), self.config.summary_temperature)
            .await?;

        let summary = match reply.trim() {
            "" => EMPTY_SUMMARY.to_string(),
            trimmed => trimmed.to_string(),
        };
        tracing::info!(chars = summary.len(), "Summary generated");
        Ok(Summary { summary })
    }

    /// Generates a multiple-choice quiz on `topic`.
    ///
    /// # Errors
    ///
    /// `StudyError::ParseFailed` when the reply holds no JSON payload and
    /// `StudyError::NoValidItems` when no question passes the quiz rules.
    pub async fn quiz(&self, topic: &str) -> StudyResult<Quiz> {
        let topic = require_input(topic, "Topic is required")?;
        let reply = self
            .ask(
                prompts::quiz_prompt(topic, self.config.quiz_questions),
                self.config.temperature,
            )
            .await?;

        let questions = self.parse_quiz(&reply)?;
        tracing::info!(
            topic,
            requested = self.config.quiz_questions,
            produced = questions.len(),
            "Quiz generated"
        );
        Ok(Quiz { questions })
    }

    /// Answers a homework question with only the final answer.
    pub async fn homework(&self, question: &str) -> StudyResult<HomeworkAnswer> {
        let question = require_input(question, "Question is required")?;
        let reply = self
            .ask(prompts::homework_prompt(question), self.config.temperature)
            .await?;

        let answer = match reply.trim() {
            "" => EMPTY_ANSWER.to_string(),
            trimmed => trimmed.to_string(),
        };
        Ok(HomeworkAnswer { answer })
    }

    /// Runs raw model output through extraction, normalization and the
    /// assistant's quiz rules.
    pub fn parse_quiz(&self, reply: &str) -> StudyResult<Vec<CanonicalItem>> {
        let value = extraction::extract(reply).ok_or_else(|| {
            tracing::warn!(
                preview = %reply.chars().take(80).collect::<String>(),
                "No JSON payload in quiz reply"
            );
            StudyError::quiz_parse_failed()
        })?;

        let items = extraction::normalize_all(&value);
        let total = items.len();
        let questions = self.rules.filter(items);
        tracing::debug!(total, kept = questions.len(), "Filtered quiz items");

        if questions.is_empty() {
            return Err(StudyError::NoValidItems("questions".to_string()));
        }
        Ok(questions)
    }

    async fn ask(&self, prompt: String, temperature: f64) -> StudyResult<String> {
        let request = GenerationRequest::new(
            "",
            vec![
                Message::system(prompts::STUDY_SYSTEM_PROMPT),
                Message::user(prompt),
            ],
        )
        .with_temperature(temperature)
        .with_max_tokens(self.config.max_tokens);

        let response = self.llm.generate(request).await?;
        let content = response.first_content().ok_or(StudyError::EmptyResponse)?;
        Ok(content.to_string())
    }
}

fn require_input<'a>(input: &'a str, message: &str) -> StudyResult<&'a str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(StudyError::InvalidInput(message.to_string()));
    }
    Ok(trimmed)
}
