use async_trait::async_trait;

use hireflow::node::{Node, NodeContext, NodeError};
use hireflow::state::{StateDelta, StateSnapshot};
use hireflow::summarize::{SummaryPair, Summarizer, SummarizerError};

/// Node that returns a fixed delta, for assembling test topologies.
pub struct DeltaNode {
    delta: StateDelta,
}

impl DeltaNode {
    pub fn new(delta: StateDelta) -> Self {
        Self { delta }
    }
}

#[async_trait]
impl Node for DeltaNode {
    async fn run(
        &self,
        _snapshot: StateSnapshot,
        _ctx: NodeContext,
    ) -> Result<StateDelta, NodeError> {
        Ok(self.delta.clone())
    }
}

/// Summarizer that is always down, for degraded-mode tests.
pub struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(
        &self,
        _resume_text: &str,
        _jd_text: &str,
    ) -> Result<SummaryPair, SummarizerError> {
        Err(SummarizerError::Unavailable {
            reason: "test summarizer is always down".to_string(),
        })
    }
}
