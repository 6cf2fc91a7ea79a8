//! Deterministic [`ModelClient`] double for tests and offline demos.
//!
//! Pre-programmed replies are consumed in order; the double records every
//! prompt it was handed so tests can assert on exactly what each stage saw.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{ModelClient, PromptPayload};
use crate::errors::ClientError;
use crate::types::MaxOutputTokens;

/// One pre-programmed reply for a [`ScriptedClient`].
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Return this text.
    Text(String),
    /// Fail the call with this error.
    Fail(ClientError),
}

impl ScriptedReply {
    /// Convenience constructor for a text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// A [`ModelClient`] that replays a fixed script of responses.
///
/// Replies are consumed front-to-back, one per `generate` call; running past
/// the end of the script is a test bug and fails the call with
/// [`ClientError::InvalidRequest`].
pub struct ScriptedClient {
    script: Mutex<std::collections::VecDeque<ScriptedReply>>,
    seen_prompts: Mutex<Vec<PromptPayload>>,
}

impl ScriptedClient {
    /// Creates a client that will serve `replies` in order.
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            seen_prompts: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for a script of plain text replies.
    pub fn from_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(|t| ScriptedReply::text(t)).collect())
    }

    /// Number of `generate` calls served so far.
    pub fn call_count(&self) -> usize {
        self.seen_prompts.lock().expect("prompt log poisoned").len()
    }

    /// Every prompt handed to `generate`, in call order.
    pub fn seen_prompts(&self) -> Vec<PromptPayload> {
        self.seen_prompts
            .lock()
            .expect("prompt log poisoned")
            .clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn generate(
        &self,
        prompt: &PromptPayload,
        _max_output_tokens: MaxOutputTokens,
    ) -> Result<String, ClientError> {
        self.seen_prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.clone());

        let reply = self
            .script
            .lock()
            .expect("script poisoned")
            .pop_front()
            .ok_or_else(|| {
                ClientError::InvalidRequest("scripted client: no reply configured".to_string())
            })?;

        match reply {
            ScriptedReply::Text(text) => Ok(text),
            ScriptedReply::Fail(err) => Err(err),
        }
    }
}
