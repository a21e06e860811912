//! Configuration for the LLM connection and the study operations.
//!
//! Both halves can be built from defaults, from builder methods, or from
//! environment variables. CLI flags are applied on top by the caller.

use std::time::Duration;
use thiserror::Error;

/// Default OpenAI-compatible API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default model for all study operations.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Connection settings for the chat-completions API.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Base URL, without the `/chat/completions` suffix.
    pub api_base: String,
    /// Bearer token.
    pub api_key: String,
    /// Model used when a request does not name one.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl LlmSettings {
    /// Creates settings for the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENAI_API_KEY`: API key (required)
    /// - `OPENAI_API_BASE`: API base URL (default: https://api.openai.com/v1)
    /// - `STUDY_HELPER_MODEL`: Model (default: gpt-4o-mini)
    /// - `STUDY_HELPER_TIMEOUT_SECS`: Request timeout in seconds (default: 120)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the key is missing or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmSettings::from_env`], reading variables through `var`.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = var("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;
        let mut settings = Self::new(api_key);

        if let Some(val) = var("OPENAI_API_BASE") {
            settings.api_base = val;
        }

        if let Some(val) = var("STUDY_HELPER_MODEL") {
            settings.model = val;
        }

        if let Some(val) = var("STUDY_HELPER_TIMEOUT_SECS") {
            let secs: u64 = parse_env_value(&val, "STUDY_HELPER_TIMEOUT_SECS")?;
            settings.timeout = Duration::from_secs(secs);
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "api_key cannot be empty".to_string(),
            ));
        }

        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }

        if self.model.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "model cannot be empty".to_string(),
            ));
        }

        if self.timeout.as_secs() == 0 {
            return Err(ConfigError::ValidationFailed(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Tuning for the study operations.
#[derive(Debug, Clone)]
pub struct StudyConfig {
    /// Number of questions requested per quiz.
    pub quiz_questions: usize,
    /// Temperature for summaries.
    pub summary_temperature: f64,
    /// Temperature for quizzes and homework answers.
    pub temperature: f64,
    /// Maximum tokens for LLM responses.
    pub max_tokens: u32,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            quiz_questions: 5,
            summary_temperature: 0.0,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

impl StudyConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of quiz questions.
    pub fn with_quiz_questions(mut self, count: usize) -> Self {
        self.quiz_questions = count;
        self
    }

    /// Sets the temperature for quizzes and homework answers.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Sets the maximum tokens for LLM responses.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Creates configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STUDY_HELPER_QUIZ_QUESTIONS`: Questions per quiz (default: 5)
    /// - `STUDY_HELPER_TEMPERATURE`: Temperature for quiz/homework (default: 0.7)
    /// - `STUDY_HELPER_MAX_TOKENS`: Maximum response tokens (default: 2000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`StudyConfig::from_env`], reading variables through `var`.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = var("STUDY_HELPER_QUIZ_QUESTIONS") {
            config.quiz_questions = parse_env_value(&val, "STUDY_HELPER_QUIZ_QUESTIONS")?;
        }

        if let Some(val) = var("STUDY_HELPER_TEMPERATURE") {
            config.temperature = parse_env_value(&val, "STUDY_HELPER_TEMPERATURE")?;
        }

        if let Some(val) = var("STUDY_HELPER_MAX_TOKENS") {
            config.max_tokens = parse_env_value(&val, "STUDY_HELPER_MAX_TOKENS")?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiz_questions == 0 || self.quiz_questions > 50 {
            return Err(ConfigError::ValidationFailed(
                "quiz_questions must be between 1 and 50".to_string(),
            ));
        }

        for (name, value) in [
            ("summary_temperature", self.summary_temperature),
            ("temperature", self.temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must be between 0.0 and 2.0",
                    name
                )));
            }
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Parse an environment variable value.
fn parse_env_value<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("could not parse '{}'", value),
    })
}
