//! Wire-format types for the Generative Language `generateContent` call.
//!
//! Field names follow the REST API's camelCase JSON. Only the fields this
//! service sends or reads are modelled.

use pipeline::{MaxOutputTokens, PromptPayload, Temperature};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub system_instruction: SystemInstruction,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl GenerateRequest {
    /// Builds the request body for one stage call: the system instruction as
    /// its own block, the flattened context as a single user turn, and the
    /// pinned generation config.
    pub fn from_prompt(
        prompt: &PromptPayload,
        max_output_tokens: MaxOutputTokens,
        temperature: Temperature,
    ) -> Self {
        Self {
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: prompt.system_instruction.clone(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.joined(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: temperature.as_f64(),
                max_output_tokens: max_output_tokens.as_u32(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateResponse {
    /// The first candidate's text, with multi-part replies concatenated.
    /// `None` when the provider returned no usable candidate (e.g. a safety
    /// block).
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(""),
        )
    }
}
