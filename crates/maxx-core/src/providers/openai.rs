//! OpenAI-compatible Chat Completions client.
//!
//! Sends the system prompt and the raw prompt as a two-message, non-streaming
//! request and returns the first choice's text.

use anyhow::Result;
use futures_util::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::providers::shared::{USER_AGENT, resolve_api_key, resolve_base_url};
use crate::providers::{ChatBackend, ProviderError, ProviderErrorKind, ProviderResult};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Text used when the model returns no content.
pub const NO_RESPONSE: &str = "No response generated";

/// OpenAI chat completions configuration.
#[derive(Debug, Clone)]
pub struct OpenAIChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub system_prompt: String,
}

impl OpenAIChatConfig {
    /// Builds the provider config from the app config and environment.
    ///
    /// Environment variables:
    /// - `OPENAI_API_KEY` (fallback if not in config)
    /// - `OPENAI_BASE_URL` (overrides config)
    ///
    /// # Errors
    /// Returns an error if no API key is available or the base URL is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = &config.providers.openai;
        let api_key = resolve_api_key(provider.api_key.as_deref(), "OPENAI_API_KEY", "openai")?;
        let base_url = resolve_base_url(
            provider.base_url.as_deref(),
            "OPENAI_BASE_URL",
            DEFAULT_BASE_URL,
            "OpenAI",
        )?;

        Ok(Self {
            api_key,
            base_url,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            system_prompt: config.effective_system_prompt().to_string(),
        })
    }
}

/// OpenAI chat completions client.
pub struct OpenAIChatClient {
    config: OpenAIChatConfig,
    http: reqwest::Client,
}

impl OpenAIChatClient {
    pub fn new(config: OpenAIChatConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Sends one prompt and returns the response text.
    ///
    /// # Errors
    /// Returns a `ProviderError` for transport failures, non-2xx statuses,
    /// malformed bodies and responses without choices.
    pub async fn send_prompt(&self, prompt: &str) -> ProviderResult<String> {
        let request = ChatCompletionRequest::new(&self.config, prompt);
        let url = format!("{}{}", self.config.base_url, CHAT_COMPLETIONS_PATH);
        debug!(%url, model = %self.config.model, "sending chat completion");

        let response = self
            .http
            .post(&url)
            .headers(build_headers(&self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(classify_reqwest_error)?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "chat completion failed");
            return Err(ProviderError::http_status(status.as_u16(), &body));
        }

        parse_completion(&body)
    }
}

impl ChatBackend for OpenAIChatClient {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(self.send_prompt(prompt))
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Authorization",
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
    headers
}

fn classify_reqwest_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::timeout(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        ProviderError::timeout(format!("Connection failed: {e}"))
    } else if e.is_request() {
        ProviderError::new(ProviderErrorKind::HttpStatus, format!("Request error: {e}"))
    } else {
        ProviderError::new(ProviderErrorKind::HttpStatus, format!("Network error: {e}"))
    }
}

fn parse_completion(body: &str) -> ProviderResult<String> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::parse(format!("Invalid chat completion body: {e}")))?;

    if let Some(error) = parsed.error {
        return Err(ProviderError::new(ProviderErrorKind::ApiError, error.message));
    }

    let choice = parsed.choices.into_iter().next().ok_or_else(|| {
        ProviderError::new(ProviderErrorKind::ApiError, "Response contained no choices")
    })?;

    Ok(choice
        .message
        .content
        .unwrap_or_else(|| NO_RESPONSE.to_string()))
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatCompletionMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(config: &'a OpenAIChatConfig, prompt: &'a str) -> Self {
        Self {
            model: &config.model,
            messages: [
                ChatCompletionMessage {
                    role: "system",
                    content: &config.system_prompt,
                },
                ChatCompletionMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}
