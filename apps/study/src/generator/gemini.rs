//! Gemini `generateContent` client.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{validate_batch, ContentGenerator, GeneratedCard, GenerationError, GenerationRequest};
use crate::config::Config;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Content generator backed by the Gemini REST API.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    language: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, language: String) -> Self {
        Self {
            api_key,
            model,
            language,
            base_url: GEMINI_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Client for the configured model; `None` without an API key.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.gemini_api_key.clone()?;
        Some(Self::new(
            api_key,
            config.gemini_model.clone(),
            config.content_language.clone(),
        ))
    }

    /// Point the client at another endpoint root (proxies, local mocks).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": build_prompt(request, &self.language) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        })
    }
}

impl ContentGenerator for GeminiClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedCard>, GenerationError> {
        request.validate()?;

        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", &self.api_key)])
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, message });
        }

        let body: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        parse_cards(body)
    }
}

/// Instructions sent to the model.
fn build_prompt(request: &GenerationRequest, language: &str) -> String {
    format!(
        r#"You are an expert teacher writing advanced study material (flashcards).

Topic: "{topic}"
Difficulty level: "{level}"
Quantity: {count} items.

For each item produce:
1. A clear, thought-provoking question.
2. The correct answer FORMATTED AS HTML.
3. A cloze text: the answer rewritten with its main keyword(s) replaced by "______".

Answer formatting (the reader must be able to scan it quickly, avoid walls of text):
1. Start with the core answer in <b>bold</b>, telegraphic (at most 5 words).
2. Separate with <br><br>.
3. Explain with a short <ul><li>...</li></ul> list or a short sentence.
4. Put technical keywords in <b>bold</b>.

Return ONLY the JSON. Write everything in {language}."#,
        topic = request.topic.trim(),
        level = request.level.label(),
        count = request.count,
        language = language,
    )
}

fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING", "description": "The question" },
                "answer": {
                    "type": "STRING",
                    "description": "The answer formatted as HTML (<b>, <br>, <ul>)"
                },
                "cloze_text": {
                    "type": "STRING",
                    "description": "The answer with its keywords replaced by ____"
                }
            },
            "required": ["question", "answer", "cloze_text"]
        }
    })
}

/// Extract the JSON card array from the first candidate's text.
fn parse_cards(body: GeminiResponse) -> Result<Vec<GeneratedCard>, GenerationError> {
    let text = body
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)?;

    let items: Vec<GeneratedCard> =
        serde_json::from_str(&text).map_err(|e| GenerationError::Malformed(e.to_string()))?;
    validate_batch(&items)?;
    Ok(items)
}
