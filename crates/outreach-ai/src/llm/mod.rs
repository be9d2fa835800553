//! Text generation collaborator.
//!
//! The crafting workflow only needs "prompt in, text out"; everything model specific lives
//! behind [`TextGenerator`] so the loop can be exercised with scripted implementations.

mod client;

pub use client::ChatCompletionsClient;

use async_trait::async_trait;
use serde::Serialize;

/// Speaker of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One message of a chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Ordered prompt handed to a [`TextGenerator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatPrompt {
    pub messages: Vec<ChatMessage>,
}

impl ChatPrompt {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::User,
                content: content.into(),
            }],
        }
    }

    pub fn with_system(mut self, content: impl Into<String>) -> Self {
        self.messages.insert(
            0,
            ChatMessage {
                role: Role::System,
                content: content.into(),
            },
        );
        self
    }

    /// Concatenated user content, mostly useful for assertions and logging.
    pub fn user_text(&self) -> String {
        self.messages
            .iter()
            .filter(|message| message.role == Role::User)
            .map(|message| message.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Hosted model that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: ChatPrompt) -> Result<String, LlmError>;
}

/// Failure reaching or interpreting the text generation endpoint.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("llm client misconfigured: {0}")]
    Misconfiguration(String),
    #[error("llm transport error: {0}")]
    Transport(String),
    #[error("llm endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("llm response missing content")]
    EmptyResponse,
}
