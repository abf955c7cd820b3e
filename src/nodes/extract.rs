use std::sync::Arc;

use async_trait::async_trait;

use crate::node::{Node, NodeContext, NodeError};
use crate::state::{StateDelta, StateSnapshot};
use crate::summarize::{StubSummarizer, Summarizer};

/// Derives `resume_summary` and `jd_summary` from the extracted texts.
///
/// Delegates to the configured [`Summarizer`]. When the summarizer fails
/// the node does not abort the run: it emits a `degraded` event and
/// substitutes the deterministic placeholder summaries, so the pipeline
/// stays runnable without the external service.
pub struct ExtractNode {
    summarizer: Arc<dyn Summarizer>,
}

impl ExtractNode {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self { summarizer }
    }
}

#[async_trait]
impl Node for ExtractNode {
    async fn run(
        &self,
        snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateDelta, NodeError> {
        let resume_text = snapshot.resume_text()?;
        let jd_text = snapshot.jd_text()?;

        ctx.emit("extract", "Summarizing resume and job description")?;

        let pair = match self.summarizer.summarize(resume_text, jd_text).await {
            Ok(pair) => pair,
            Err(err) => {
                tracing::warn!(error = %err, "summarizer failed, degrading to placeholders");
                ctx.emit(
                    "degraded",
                    format!("Summarizer unavailable, using deterministic placeholders: {err}"),
                )?;
                StubSummarizer::placeholder_pair()
            }
        };

        Ok(StateDelta::new()
            .with_resume_summary(pair.resume_summary)
            .with_jd_summary(pair.jd_summary))
    }
}
