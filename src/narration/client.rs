//! Async LLM client for guardian thoughts
//!
//! A model-agnostic HTTP client. Supports Anthropic, OpenAI-compatible and
//! Google Gemini APIs; the format is picked from the endpoint URL.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::narration::prompt::{clean_thought, user_message, PERSONA_PROMPT};
use crate::narration::{ThoughtFuture, ThoughtGenerator};

/// Thoughts are a handful of words; keep completions tiny
const MAX_TOKENS: u32 = 64;

/// API format type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
    Gemini,
}

/// Async LLM client for making API calls
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
}

impl LlmClient {
    /// Create a new LLM client with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            api_format,
        }
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else if url.contains("generativelanguage.googleapis.com") {
            ApiFormat::Gemini
        } else {
            ApiFormat::OpenAI
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: LLM_API_KEY
    /// Optional: LLM_API_URL (defaults to Anthropic API)
    /// Optional: LLM_MODEL (defaults to claude-3-haiku-20240307)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .map_err(|_| GameError::Narration("LLM_API_KEY not set".into()))?;
        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".into());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "claude-3-haiku-20240307".into());

        Ok(Self::new(api_key, api_url, model))
    }

    pub fn api_format(&self) -> &ApiFormat {
        &self.api_format
    }

    /// Send a completion request to the LLM and return its text
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
            ApiFormat::Gemini => self.complete_gemini(system, user).await,
        }
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            system: system.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user.into(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::Narration(e.to_string()))?;

        let completion: AnthropicResponse = read_json(response).await?;
        completion
            .content
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| GameError::Narration("Empty response".into()))
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::Narration(e.to_string()))?;

        let completion: OpenAIResponse = read_json(response).await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GameError::Narration("Empty response".into()))
    }

    async fn complete_gemini(&self, system: &str, user: &str) -> Result<String> {
        let request = GeminiRequest {
            system_instruction: GeminiContent::text(None, system),
            contents: vec![GeminiContent::text(Some("user"), user)],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_TOKENS,
            },
        };

        let response = self
            .client
            .post(self.gemini_endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GameError::Narration(e.to_string()))?;

        let completion: GeminiResponse = read_json(response).await?;
        completion
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| GameError::Narration("Empty response".into()))
    }

    /// Gemini puts the model in the path: `<base>/<model>:generateContent`
    fn gemini_endpoint(&self) -> String {
        if self.api_url.ends_with(":generateContent") {
            self.api_url.clone()
        } else {
            format!(
                "{}/{}:generateContent",
                self.api_url.trim_end_matches('/'),
                self.model
            )
        }
    }
}

impl ThoughtGenerator for LlmClient {
    fn generate<'a>(&'a self, context: &'a str) -> ThoughtFuture<'a> {
        Box::pin(async move {
            let reply = self.complete(PERSONA_PROMPT, &user_message(context)).await?;
            clean_thought(&reply)
        })
    }
}

async fn read_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    if !response.status().is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(GameError::Narration(format!("API error: {}", error_text)));
    }
    response
        .json()
        .await
        .map_err(|e| GameError::Narration(e.to_string()))
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// Gemini generateContent format
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(String::from),
            parts: vec![GeminiPart { text: text.into() }],
        }
    }
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: GeminiContent,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}
