//! Prompt templates for the study operations.

/// System prompt shared by every operation.
pub const STUDY_SYSTEM_PROMPT: &str =
    "You are a patient study assistant helping a student understand course material.";

/// User prompt for summaries. `{text}` is replaced with the source text.
pub const SUMMARY_TEMPLATE: &str = r#"Summarize the following text clearly and concisely. Keep it short (3-6 sentences):

{text}"#;

/// User prompt for quiz generation.
pub const QUIZ_TEMPLATE: &str = r#"You are a helpful quiz generator.
Generate exactly {count} multiple-choice questions on the following topic:
"{topic}"

- Each question should have 4 options labeled A, B, C, D.
- Include the correct answer clearly.
- Return the result strictly as a JSON array like this:
[
  {
    "question": "Question text",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "answer": "Option B",
    "explanation": "Why Option B is correct"
  }
]
Do not add any extra text outside the JSON."#;

/// User prompt for homework answers.
pub const HOMEWORK_TEMPLATE: &str = r#"Answer the following homework question concisely and clearly.
Give only the final answer, no steps needed.

Question:
"{question}"

Return the answer as plain text."#;

/// Builds the summary prompt.
pub fn summary_prompt(text: &str) -> String {
    SUMMARY_TEMPLATE.replace("{text}", text)
}

/// Builds the quiz prompt for `count` questions.
pub fn quiz_prompt(topic: &str, count: usize) -> String {
    QUIZ_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{topic}", topic)
}

/// Builds the homework prompt.
pub fn homework_prompt(question: &str) -> String {
    HOMEWORK_TEMPLATE.replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_prompt() {
        let prompt = quiz_prompt("photosynthesis", 7);
        assert!(prompt.contains("Generate exactly 7 multiple-choice questions"));
        assert!(prompt.contains("\"photosynthesis\""));
        assert!(!prompt.contains("{topic}"));
    }

    #[test]
    fn test_summary_and_homework_prompts() {
        assert!(summary_prompt("cells divide").ends_with("cells divide"));
        assert!(homework_prompt("What is 6*7?").contains("\"What is 6*7?\""));
    }
}
