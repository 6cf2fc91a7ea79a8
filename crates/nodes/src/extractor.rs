//! Structured position extraction (binary-decision gating).
//!
//! The extractor asks the model whether a question has two opposing sides
//! and, if so, what the pro and con positions are. It is an opt-in call, not
//! a default pipeline stage. Malformed model output degrades to empty
//! positions rather than failing the run: the debate can still proceed with
//! an ungated question, so gating quietly falls away instead of blocking.

use pipeline::{DebateError, ModelClient, Transcript};
use serde::Deserialize;

use crate::binder;
use crate::stage::StageSpec;

/// The two opposing positions extracted from a question.
///
/// Both fields empty means "not a binary decision question" — either the
/// model said so, or its reply could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractedPositions {
    /// The affirmative position, or empty.
    #[serde(default)]
    pub pro: String,
    /// The negative position, or empty.
    #[serde(default)]
    pub con: String,
}

impl ExtractedPositions {
    /// The empty-field sentinel used when extraction yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when no dialectical separation was found.
    pub fn is_empty(&self) -> bool {
        self.pro.trim().is_empty() && self.con.trim().is_empty()
    }

    /// Parses a model reply into positions.
    ///
    /// Accepts a bare JSON object or one wrapped in a Markdown code fence.
    /// Anything unparseable degrades to [`ExtractedPositions::empty`] with a
    /// warning log — never an error.
    pub fn parse(raw: &str) -> Self {
        let candidate = strip_code_fence(raw);
        match serde_json::from_str::<Self>(candidate) {
            Ok(positions) => positions,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    reply_chars = raw.len(),
                    "extractor reply was not a pro/con JSON object, treating question as ungated"
                );
                Self::empty()
            }
        }
    }
}

/// Removes a surrounding Markdown code fence, if present, and narrows to the
/// outermost JSON object.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let inner = if let Some(rest) = trimmed.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        rest.strip_suffix("```").unwrap_or(rest)
    } else {
        trimmed
    };

    match (inner.find('{'), inner.rfind('}')) {
        (Some(start), Some(end)) if start < end => &inner[start..=end],
        _ => inner.trim(),
    }
}

/// Runs the extractor stage for one question.
///
/// Transport failures propagate as [`DebateError::Client`]; malformed
/// replies do not (see [`ExtractedPositions::parse`]).
pub async fn extract_positions(
    client: &dyn ModelClient,
    question: &str,
) -> Result<ExtractedPositions, DebateError> {
    let stage = StageSpec::extractor();
    let transcript = Transcript::open(question)?;
    let prompt = binder::build_prompt(&stage, &transcript)?;

    let reply = client.generate(&prompt, stage.max_output_tokens).await?;
    Ok(ExtractedPositions::parse(&reply))
}

#[cfg(test)]
mod tests {
    use pipeline::testing::{ScriptedClient, ScriptedReply};
    use pipeline::ClientError;

    use super::*;

    #[test]
    fn parses_bare_json_object() {
        let p = ExtractedPositions::parse(
            r#"{"pro": "Uniforms help focus", "con": "Uniforms limit expression"}"#,
        );
        assert_eq!(p.pro, "Uniforms help focus");
        assert_eq!(p.con, "Uniforms limit expression");
        assert!(!p.is_empty());
    }

    #[test]
    fn parses_code_fenced_json() {
        let p = ExtractedPositions::parse("```json\n{\"pro\": \"yes\", \"con\": \"no\"}\n```");
        assert_eq!(p.pro, "yes");
        assert_eq!(p.con, "no");
    }

    #[test]
    fn parses_object_embedded_in_prose() {
        let p = ExtractedPositions::parse("Here you go: {\"pro\": \"a\", \"con\": \"b\"} hope it helps");
        assert_eq!(p.pro, "a");
        assert_eq!(p.con, "b");
    }

    #[test]
    fn malformed_reply_degrades_to_empty() {
        let p = ExtractedPositions::parse("I cannot split this question into sides.");
        assert!(p.is_empty());
    }

    #[test]
    fn missing_keys_default_to_empty_strings() {
        let p = ExtractedPositions::parse(r#"{"pro": "only one side"}"#);
        assert_eq!(p.pro, "only one side");
        assert_eq!(p.con, "");
    }

    #[test]
    fn explicit_empty_strings_mean_ungated() {
        let p = ExtractedPositions::parse(r#"{"pro": "", "con": ""}"#);
        assert!(p.is_empty());
    }

    #[tokio::test]
    async fn extract_positions_end_to_end() {
        let client = ScriptedClient::from_texts([r#"{"pro": "P", "con": "C"}"#]);
        let p = extract_positions(&client, "Should schools require uniforms?")
            .await
            .unwrap();
        assert_eq!(p.pro, "P");
        assert_eq!(p.con, "C");

        // The extractor prompt carries the question.
        let prompts = client.seen_prompts();
        assert!(prompts[0]
            .joined()
            .contains("Debate question: Should schools require uniforms?"));
    }

    #[tokio::test]
    async fn transport_failures_still_propagate() {
        let client = ScriptedClient::new(vec![ScriptedReply::Fail(ClientError::NetworkError(
            "unreachable".into(),
        ))]);
        let err = extract_positions(&client, "q").await.unwrap_err();
        assert!(matches!(err, DebateError::Client(_)));
    }
}
