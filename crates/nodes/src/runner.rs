//! The stage sequencer: one debate, start to verdict.

use std::sync::Arc;

use pipeline::{DebateError, ModelClient, Transcript, TranscriptEntry};

use crate::binder;
use crate::stage::PipelineSpec;

/// Executes a [`PipelineSpec`] against a [`ModelClient`], threading the
/// transcript from one stage to the next.
///
/// A run is strictly sequential: stage *i + 1* never starts before stage
/// *i*'s entry is appended, since each stage's context may depend on all
/// prior outputs. Concurrent runs are independent — each owns its transcript
/// exclusively, and the shared client is safe for concurrent invocation.
pub struct DebateRunner {
    client: Arc<dyn ModelClient>,
    spec: PipelineSpec,
}

impl DebateRunner {
    /// Creates a runner over an injected client and a fixed topology.
    pub fn new(client: Arc<dyn ModelClient>, spec: PipelineSpec) -> Self {
        Self { client, spec }
    }

    /// The topology this runner executes.
    pub fn spec(&self) -> &PipelineSpec {
        &self.spec
    }

    /// Runs the full pipeline for one question and returns the transcript.
    ///
    /// The returned transcript has exactly `spec.len() + 1` entries: the
    /// question plus one output per stage, in stage-declared order.
    ///
    /// ## Errors
    ///
    /// Any stage failure aborts the run; there is no partial-result salvage
    /// and no retry. See [`DebateError`] for the taxonomy.
    pub async fn run(&self, question: &str) -> Result<Transcript, DebateError> {
        self.run_with_observer(question, |_| {}).await
    }

    /// Like [`DebateRunner::run`], invoking `observe` after each stage's
    /// entry is appended.
    ///
    /// This is what drives the console streaming mode: each stage's output
    /// is surfaced as soon as it completes, in stage order.
    pub async fn run_with_observer(
        &self,
        question: &str,
        mut observe: impl FnMut(&TranscriptEntry),
    ) -> Result<Transcript, DebateError> {
        let mut transcript = Transcript::open(question)?;
        let run_id = transcript.run_id();

        tracing::info!(
            %run_id,
            stages = self.spec.len(),
            "debate run started"
        );

        for (index, stage) in self.spec.stages().iter().enumerate() {
            let prompt = binder::build_prompt(stage, &transcript)?;
            tracing::debug!(
                %run_id,
                stage = index,
                role = %stage.role,
                context_blocks = prompt.context_blocks.len(),
                "dispatching stage prompt"
            );

            let text = match self.client.generate(&prompt, stage.max_output_tokens).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(
                        %run_id,
                        stage = index,
                        role = %stage.role,
                        kind = err.kind(),
                        "stage failed, aborting run"
                    );
                    return Err(err.into());
                }
            };

            let entry = transcript.append(stage.role, text)?;
            observe(entry);
            tracing::info!(
                %run_id,
                stage = index,
                role = %stage.role,
                chars = entry.text().len(),
                "stage completed"
            );
        }

        tracing::info!(%run_id, entries = transcript.len(), "debate run finished");
        Ok(transcript)
    }
}
