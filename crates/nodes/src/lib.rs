//! Rostrum pipeline stage implementations and the debate sequencer.
//!
//! This crate turns the domain types in [`pipeline`] into a runnable debate:
//! the fixed stage topologies, the per-role prompt binding rules, the
//! sequencer that drives a run stage by stage, and the optional structured
//! position extractor.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Stages sequence calls between the domain types
//! in [`pipeline`] and the [`pipeline::ModelClient`] port. They contain no
//! transport details of their own.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`stage`] | [`StageSpec`], [`ContextRule`], [`PipelineSpec`], [`PipelineVariant`] |
//! | [`binder`] | [`build_prompt`]: deterministic role-to-prompt binding |
//! | [`prompts`] | Static instruction and template text for every role |
//! | [`runner`] | [`DebateRunner`]: the strictly sequential stage sequencer |
//! | [`extractor`] | [`ExtractedPositions`] and the opt-in gating call |

pub mod binder;
pub mod extractor;
pub mod prompts;
pub mod runner;
pub mod stage;

pub use binder::build_prompt;
pub use extractor::{extract_positions, ExtractedPositions};
pub use runner::DebateRunner;
pub use stage::{ContextRule, PipelineSpec, PipelineVariant, StageSpec};
