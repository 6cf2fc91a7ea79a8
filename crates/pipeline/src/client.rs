//! The outbound model port: what a stage sends, and the capability that
//! turns it into generated text.
//!
//! [`ModelClient`] is the only seam through which the pipeline performs I/O.
//! Concrete adapters live in infrastructure crates; tests inject
//! [`crate::testing::ScriptedClient`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::types::MaxOutputTokens;

// ---------------------------------------------------------------------------
// Prompt payload
// ---------------------------------------------------------------------------

/// Everything one stage sends to the model: a system instruction plus an
/// ordered sequence of context text blocks.
///
/// Blocks are kept separate so tests can assert on exactly which transcript
/// entries a stage was shown; adapters flatten them with [`PromptPayload::joined`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    /// The stage's static role instruction.
    pub system_instruction: String,
    /// Ordered context blocks, already labelled and formatted.
    pub context_blocks: Vec<String>,
}

impl PromptPayload {
    /// Creates a payload from an instruction and pre-formatted blocks.
    pub fn new(system_instruction: impl Into<String>, context_blocks: Vec<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            context_blocks,
        }
    }

    /// Flattens the context blocks into the single user-turn text sent on
    /// the wire, separated by blank lines.
    pub fn joined(&self) -> String {
        self.context_blocks.join("\n\n")
    }
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Capability handle for the hosted generative-text service.
///
/// Implementations must be safe for concurrent invocation: calls are
/// stateless request/response exchanges with no shared session, so one
/// client instance is shared across all concurrent pipeline runs.
///
/// Implementations do not retry; failures are classified as [`ClientError`]
/// and propagated unchanged.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generates one text block for the given prompt, bounded by
    /// `max_output_tokens`.
    async fn generate(
        &self,
        prompt: &PromptPayload,
        max_output_tokens: MaxOutputTokens,
    ) -> Result<String, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_separates_blocks_with_blank_lines() {
        let payload = PromptPayload::new(
            "You are a judge.",
            vec!["Debate question: q".into(), "PRO side argued:\nyes".into()],
        );
        assert_eq!(payload.joined(), "Debate question: q\n\nPRO side argued:\nyes");
    }

    #[test]
    fn joined_single_block_has_no_separator() {
        let payload = PromptPayload::new("sys", vec!["only".into()]);
        assert_eq!(payload.joined(), "only");
    }
}
