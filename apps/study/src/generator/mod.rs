//! AI content generation for new study material.

pub mod gemini;

use flashai_core::{Card, DifficultyLevel};
use serde::Deserialize;
use thiserror::Error;

pub use gemini::GeminiClient;

/// Cards requested when the caller does not say otherwise.
pub const DEFAULT_CARD_COUNT: usize = 5;

/// Generation errors.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("generator error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("generator returned no content")]
    EmptyResponse,

    #[error("malformed generator output: {0}")]
    Malformed(String),
}

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub level: DifficultyLevel,
    pub count: usize,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, level: DifficultyLevel) -> Self {
        Self {
            topic: topic.into(),
            level,
            count: DEFAULT_CARD_COUNT,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.topic.trim().is_empty() {
            return Err(GenerationError::InvalidRequest("topic is empty".to_string()));
        }
        if self.count == 0 {
            return Err(GenerationError::InvalidRequest(
                "card count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One generated question/answer pair, before it becomes a card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedCard {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub cloze_text: Option<String>,
}

impl GeneratedCard {
    fn is_complete(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

/// Source of freshly generated cards.
#[allow(async_fn_in_trait)]
pub trait ContentGenerator {
    /// Generate cards for `request`. A single attempt; no partial results.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedCard>, GenerationError>;
}

/// Reject the whole batch if any item is missing its question or answer.
pub fn validate_batch(items: &[GeneratedCard]) -> Result<(), GenerationError> {
    if items.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    match items.iter().position(|item| !item.is_complete()) {
        Some(index) => Err(GenerationError::Malformed(format!(
            "item {index} is missing its question or answer"
        ))),
        None => Ok(()),
    }
}

/// Turn generated pairs into never-reviewed cards for `topic`.
pub fn into_cards(topic: &str, generated: Vec<GeneratedCard>) -> Vec<Card> {
    generated
        .into_iter()
        .map(|item| {
            let cloze = item.cloze_text.filter(|text| !text.trim().is_empty());
            Card::new(topic, item.question, item.answer, cloze)
        })
        .collect()
}
