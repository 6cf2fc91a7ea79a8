//! Deterministic role-to-prompt binding.
//!
//! Given a stage spec and the transcript so far, assemble the exact
//! [`PromptPayload`] that stage sends to the model. Binding is pure: the
//! same stage and transcript always produce the same payload.

use pipeline::{DebateError, PromptPayload, RoleTag, Transcript};

use crate::stage::StageSpec;

/// Builds the prompt for one stage from the current transcript.
///
/// Context selection follows the stage's [`crate::stage::ContextRule`] list:
/// the first entry of each listed role, in listed order, prefixed by its
/// label. An entry not yet produced is omitted — never replaced with a
/// placeholder.
///
/// ## Errors
///
/// [`DebateError::MissingQuestion`] if the transcript has no Question entry
/// at prompt-build time. This is fatal and not retried: the pipeline cannot
/// proceed without the question.
pub fn build_prompt(stage: &StageSpec, transcript: &Transcript) -> Result<PromptPayload, DebateError> {
    if transcript.first_by_role(RoleTag::Question).is_none() {
        return Err(DebateError::MissingQuestion);
    }

    let mut blocks = Vec::with_capacity(stage.context.len() + 2);

    if let Some(preamble) = stage.preamble {
        blocks.push(preamble.to_string());
    }

    for rule in &stage.context {
        if let Some(entry) = transcript.first_by_role(rule.role) {
            blocks.push(format!("{}{}", rule.label, entry.text()));
        }
    }

    if let Some(epilogue) = stage.epilogue {
        blocks.push(epilogue.to_string());
    }

    Ok(PromptPayload::new(stage.system_instruction, blocks))
}

#[cfg(test)]
mod tests {
    use pipeline::RoleTag;

    use super::*;
    use crate::stage::StageSpec;

    fn transcript_with(question: &str, stages: &[(RoleTag, &str)]) -> Transcript {
        let mut t = Transcript::open(question).unwrap();
        for (role, text) in stages {
            t.append(*role, *text).unwrap();
        }
        t
    }

    #[test]
    fn pro_sees_only_the_question() {
        let t = transcript_with("Should schools require uniforms?", &[]);
        let payload = build_prompt(&StageSpec::pro(), &t).unwrap();

        assert_eq!(
            payload.context_blocks,
            vec![
                "Your side: PRO".to_string(),
                "Debate question: Should schools require uniforms?".to_string(),
            ]
        );
    }

    #[test]
    fn pro_ignores_later_entries() {
        // Even with other outputs present, the PRO prompt stays an opening
        // position built from the question alone.
        let t = transcript_with("q", &[(RoleTag::Con, "early con")]);
        let payload = build_prompt(&StageSpec::pro(), &t).unwrap();
        assert!(!payload.joined().contains("early con"));
    }

    #[test]
    fn con_sees_question_and_first_pro() {
        let t = transcript_with(
            "Should schools require uniforms?",
            &[(RoleTag::Pro, "Uniforms reduce distraction...")],
        );
        let payload = build_prompt(&StageSpec::con(), &t).unwrap();

        assert_eq!(
            payload.context_blocks,
            vec![
                "Your side: CON".to_string(),
                "Debate question: Should schools require uniforms?".to_string(),
                "The PRO side has argued:\nUniforms reduce distraction...".to_string(),
                "Now present your counter-argument.".to_string(),
            ]
        );
    }

    #[test]
    fn con_selects_first_pro_entry_only() {
        let t = transcript_with(
            "q",
            &[(RoleTag::Pro, "first pro"), (RoleTag::Pro, "second pro")],
        );
        let payload = build_prompt(&StageSpec::con(), &t).unwrap();

        let joined = payload.joined();
        assert!(joined.contains("first pro"));
        assert!(!joined.contains("second pro"));
    }

    #[test]
    fn con_without_pro_argues_from_question_alone() {
        let t = transcript_with("q", &[]);
        let payload = build_prompt(&StageSpec::con(), &t).unwrap();

        // No placeholder block for the absent PRO argument.
        assert_eq!(
            payload.context_blocks,
            vec![
                "Your side: CON".to_string(),
                "Debate question: q".to_string(),
                "Now present your counter-argument.".to_string(),
            ]
        );
    }

    #[test]
    fn judge_sees_both_arguments_verbatim() {
        let t = transcript_with(
            "Should schools require uniforms?",
            &[
                (RoleTag::Pro, "Uniforms reduce distraction..."),
                (RoleTag::Con, "Uniforms suppress expression..."),
            ],
        );
        let payload = build_prompt(&StageSpec::judge(), &t).unwrap();

        let joined = payload.joined();
        assert!(joined.contains("Uniforms reduce distraction..."));
        assert!(joined.contains("Uniforms suppress expression..."));
        assert!(joined.ends_with("spell out the decision."));
    }

    #[test]
    fn judge_omits_absent_entries() {
        let t = transcript_with("q", &[(RoleTag::Pro, "pro only")]);
        let payload = build_prompt(&StageSpec::judge(), &t).unwrap();

        let joined = payload.joined();
        assert!(joined.contains("PRO side argued:\npro only"));
        assert!(!joined.contains("CON side argued:"));
    }

    #[test]
    fn missing_question_is_fatal() {
        // A transcript can only lack a question when it arrives from outside
        // Transcript::open, e.g. deserialised state.
        let t: Transcript = serde_json::from_value(serde_json::json!({
            "run_id": "00000000-0000-0000-0000-000000000000",
            "started_at": "2026-01-01T00:00:00Z",
            "entries": [],
        }))
        .unwrap();

        let err = build_prompt(&StageSpec::pro(), &t).unwrap_err();
        assert!(matches!(err, DebateError::MissingQuestion));
    }

    #[test]
    fn binding_is_deterministic() {
        let t = transcript_with("q", &[(RoleTag::Pro, "p"), (RoleTag::Con, "c")]);
        let a = build_prompt(&StageSpec::judge(), &t).unwrap();
        let b = build_prompt(&StageSpec::judge(), &t).unwrap();
        assert_eq!(a, b);
    }
}
