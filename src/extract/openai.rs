//! OpenAI chat-completions extractor.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::extract::{ExtractError, Extractor};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

const SYSTEM_PROMPT: &str = "You are a precise data parser. Reply with pure JSON only.";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl OpenAiConfig {
    /// Read settings from the environment.
    ///
    /// `.env` is not loaded here; `app::run` does that once at startup.
    /// `model_override` wins over `OPENAI_MODEL`.
    pub fn from_env(model_override: Option<&str>) -> Result<Self, AppError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AppError::new(2, "Missing OPENAI_API_KEY in environment (.env)."))?;
        let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = match model_override {
            Some(m) => m.to_string(),
            None => std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        };
        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}

pub struct OpenAiExtractor {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiExtractor {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

impl Extractor for OpenAiExtractor {
    fn extract(&self, text: &str) -> Result<Option<String>, ExtractError> {
        let _span = tracing::info_span!("runner-data-extraction", model = %self.config.model).entered();

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&build_payload(&self.config.model, text))
            .send()
            .map_err(|e| ExtractError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ExtractError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatCompletionResponse = resp.json().map_err(|e| ExtractError::Decode(e.to_string()))?;
        tracing::debug!(choices = body.choices.len(), "extractor responded");
        Ok(first_content(body))
    }
}

/// Request body for the extraction call.
fn build_payload(model: &str, text: &str) -> Value {
    let prompt = format!(
        "Extract the runner's data from the text below.\n\
         Return a JSON object with the keys: \"sex\" (M for male, K for female), \
         \"age\" (number), \"reference_time\" (5 km time as MM:SS).\n\
         User text: {text}"
    );

    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": prompt },
        ],
        "response_format": { "type": "json_object" },
        "temperature": 0,
    })
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn first_content(body: ChatCompletionResponse) -> Option<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|s| !s.trim().is_empty())
}
