//! Stage and topology definitions.
//!
//! A [`StageSpec`] binds one role to its instruction text, its context
//! selection rules, and its output budget. A [`PipelineSpec`] is the ordered
//! list of stages for one debate — a straight-line sequence, not a general
//! graph, because the domain (a scripted debate) has no dynamic control flow.
//!
//! All specs are built at process start and never mutated afterwards.

use pipeline::{MaxOutputTokens, RoleTag};

use crate::prompts;

// Output budgets per role. Advocates are kept short; the judge gets room to
// summarise both sides before the verdict.
const ADVOCATE_BUDGET: u32 = 250;
const JUDGE_BUDGET: u32 = 300;
const EXTRACTOR_BUDGET: u32 = 200;

// ---------------------------------------------------------------------------
// Context rules
// ---------------------------------------------------------------------------

/// One context-selection rule: "include the first transcript entry tagged
/// `role`, prefixed by `label`".
///
/// An absent entry is simply omitted from the prompt, never substituted with
/// a placeholder. The exception is [`RoleTag::Question`], whose absence is a
/// fatal [`pipeline::DebateError::MissingQuestion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextRule {
    /// Which role's first entry to include.
    pub role: RoleTag,
    /// Text prefixed to the selected entry (including any separator).
    pub label: &'static str,
}

impl ContextRule {
    /// Shorthand constructor.
    pub fn new(role: RoleTag, label: &'static str) -> Self {
        Self { role, label }
    }
}

// ---------------------------------------------------------------------------
// Stage specs
// ---------------------------------------------------------------------------

/// The static definition of one role's single turn in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    /// Role this stage's output is tagged with.
    pub role: RoleTag,
    /// The stage's system instruction.
    pub system_instruction: &'static str,
    /// Fixed block placed before any transcript context (side assignment).
    pub preamble: Option<&'static str>,
    /// Which prior transcript entries this stage sees, in order.
    pub context: Vec<ContextRule>,
    /// Fixed block placed after the transcript context (closing instruction).
    pub epilogue: Option<&'static str>,
    /// Output budget for this stage.
    pub max_output_tokens: MaxOutputTokens,
}

impl StageSpec {
    /// The PRO advocate: presents the opening position from the question
    /// alone, uninformed by any rebuttal.
    pub fn pro() -> Self {
        Self {
            role: RoleTag::Pro,
            system_instruction: prompts::ADVOCATE_SYSTEM,
            preamble: Some(prompts::PRO_PREAMBLE),
            context: vec![ContextRule::new(RoleTag::Question, prompts::QUESTION_LABEL)],
            epilogue: None,
            max_output_tokens: budget(ADVOCATE_BUDGET),
        }
    }

    /// The CON advocate: counters the first PRO argument when one exists,
    /// otherwise argues from the question alone.
    pub fn con() -> Self {
        Self {
            role: RoleTag::Con,
            system_instruction: prompts::ADVOCATE_SYSTEM,
            preamble: Some(prompts::CON_PREAMBLE),
            context: vec![
                ContextRule::new(RoleTag::Question, prompts::QUESTION_LABEL),
                ContextRule::new(RoleTag::Pro, prompts::PRO_REBUTTAL_LABEL),
            ],
            epilogue: Some(prompts::CON_EPILOGUE),
            max_output_tokens: budget(ADVOCATE_BUDGET),
        }
    }

    /// The judge: weighs the first PRO and first CON arguments and declares
    /// a winner.
    pub fn judge() -> Self {
        Self {
            role: RoleTag::Judge,
            system_instruction: prompts::JUDGE_SYSTEM,
            preamble: None,
            context: vec![
                ContextRule::new(RoleTag::Question, prompts::QUESTION_LABEL),
                ContextRule::new(RoleTag::Pro, prompts::PRO_VERDICT_LABEL),
                ContextRule::new(RoleTag::Con, prompts::CON_VERDICT_LABEL),
            ],
            epilogue: Some(prompts::JUDGE_EPILOGUE),
            max_output_tokens: budget(JUDGE_BUDGET),
        }
    }

    /// The position extractor: binary-decision gating with structured output.
    pub fn extractor() -> Self {
        Self {
            role: RoleTag::Extractor,
            system_instruction: prompts::EXTRACTOR_SYSTEM,
            preamble: None,
            context: vec![ContextRule::new(RoleTag::Question, prompts::QUESTION_LABEL)],
            epilogue: None,
            max_output_tokens: budget(EXTRACTOR_BUDGET),
        }
    }
}

fn budget(limit: u32) -> MaxOutputTokens {
    MaxOutputTokens::new(limit).expect("stage output budgets are non-zero constants")
}

// ---------------------------------------------------------------------------
// Pipeline specs
// ---------------------------------------------------------------------------

/// The static, ordered list of stages defining one debate topology.
///
/// Execution order is exactly declaration order; there is no reordering,
/// skipping, or branching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSpec {
    stages: Vec<StageSpec>,
}

impl PipelineSpec {
    /// Builds a pipeline from an explicit stage list.
    pub fn new(stages: Vec<StageSpec>) -> Self {
        Self { stages }
    }

    /// The three-stage topology: PRO, CON, then a judge verdict.
    pub fn judged() -> Self {
        Self::new(vec![StageSpec::pro(), StageSpec::con(), StageSpec::judge()])
    }

    /// The two-stage topology: PRO and CON with no verdict.
    pub fn advocates_only() -> Self {
        Self::new(vec![StageSpec::pro(), StageSpec::con()])
    }

    /// The stages in execution order.
    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    /// Number of stages (the finished transcript has one more entry).
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// `true` for a pipeline with no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

// ---------------------------------------------------------------------------

/// Named debate topology, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineVariant {
    /// `[Pro, Con, Judge]` — the default.
    Judged,
    /// `[Pro, Con]` — no verdict stage.
    AdvocatesOnly,
}

impl PipelineVariant {
    /// Materialises the variant's [`PipelineSpec`].
    pub fn spec(self) -> PipelineSpec {
        match self {
            Self::Judged => PipelineSpec::judged(),
            Self::AdvocatesOnly => PipelineSpec::advocates_only(),
        }
    }
}

impl std::str::FromStr for PipelineVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "judged" => Ok(Self::Judged),
            "advocates-only" | "advocates_only" => Ok(Self::AdvocatesOnly),
            other => Err(format!(
                "unknown pipeline variant '{other}' (expected 'judged' or 'advocates-only')"
            )),
        }
    }
}

impl std::fmt::Display for PipelineVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Judged => write!(f, "judged"),
            Self::AdvocatesOnly => write!(f, "advocates-only"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judged_topology_order() {
        let spec = PipelineSpec::judged();
        let roles: Vec<_> = spec.stages().iter().map(|s| s.role).collect();
        assert_eq!(roles, vec![RoleTag::Pro, RoleTag::Con, RoleTag::Judge]);
    }

    #[test]
    fn advocates_only_topology_order() {
        let spec = PipelineSpec::advocates_only();
        let roles: Vec<_> = spec.stages().iter().map(|s| s.role).collect();
        assert_eq!(roles, vec![RoleTag::Pro, RoleTag::Con]);
    }

    #[test]
    fn pro_stage_sees_question_only() {
        let stage = StageSpec::pro();
        assert_eq!(stage.context.len(), 1);
        assert_eq!(stage.context[0].role, RoleTag::Question);
    }

    #[test]
    fn judge_budget_exceeds_advocate_budget() {
        assert!(StageSpec::judge().max_output_tokens > StageSpec::pro().max_output_tokens);
    }

    #[test]
    fn variant_parsing() {
        assert_eq!("judged".parse::<PipelineVariant>().unwrap(), PipelineVariant::Judged);
        assert_eq!(
            "Advocates-Only".parse::<PipelineVariant>().unwrap(),
            PipelineVariant::AdvocatesOnly
        );
        assert!("round-robin".parse::<PipelineVariant>().is_err());
    }

    #[test]
    fn variant_display_roundtrips() {
        for v in [PipelineVariant::Judged, PipelineVariant::AdvocatesOnly] {
            assert_eq!(v.to_string().parse::<PipelineVariant>().unwrap(), v);
        }
    }
}
