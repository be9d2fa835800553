use super::{ChatMessage, ChatPrompt, LlmError, TextGenerator};
use crate::config::LlmConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const ERROR_BODY_LIMIT: usize = 512;

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatCompletionsClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|err| LlmError::Misconfiguration(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, prompt: &'a ChatPrompt) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            messages: &prompt.messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        }
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn complete(&self, prompt: ChatPrompt) -> Result<String, LlmError> {
        debug!(
            model = %self.model,
            messages = prompt.messages.len(),
            prompt = %prompt.user_text(),
            "sending chat completion request"
        );

        let mut request = self.http.post(&self.base_url).json(&self.request_body(&prompt));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| LlmError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        let payload: CompletionResponse = response
            .json()
            .await
            .map_err(|err| LlmError::Transport(format!("unreadable completion payload: {err}")))?;

        let content = first_choice_content(payload)?;
        debug!(model = %self.model, response = %content, "received chat completion");
        Ok(content)
    }
}

fn first_choice_content(payload: CompletionResponse) -> Result<String, LlmError> {
    payload
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)
}

fn truncate(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
