//! Port for the external model that rewrites draft content.
//!
//! The store never talks to a model directly. It hands a [`RefinementRequest`]
//! to a [`ContentGenerator`] and drains the returned chunk stream.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::types::DraftResult;

/// Text chunks in delivery order. An `Err` item ends the refinement.
pub type ChunkStream = Pin<Box<dyn Stream<Item = DraftResult<String>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Everything the generator needs to produce the next revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinementRequest {
    pub system: String,
    pub current_content: String,
    pub voice_profile: Option<String>,
    pub instruction: String,
}

impl RefinementRequest {
    /// Renders the request as a conversation: framing, the article, the voice
    /// profile when present, then the instruction.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        let mut messages = vec![
            ChatMessage::system(self.system.clone()),
            ChatMessage::user(format!("CURRENT ARTICLE:\n---\n{}\n---", self.current_content)),
        ];

        if let Some(voice) = &self.voice_profile {
            messages.push(ChatMessage::user(format!(
                "VOICE PROFILE (match this style):\n---\n{}\n---",
                voice
            )));
        }

        messages.push(ChatMessage::user(format!(
            "REFINEMENT INSTRUCTION:\n{}",
            self.instruction
        )));
        messages
    }
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Starts generation and returns the stream of produced text.
    async fn generate(&self, request: RefinementRequest) -> DraftResult<ChunkStream>;
}
