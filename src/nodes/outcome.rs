use async_trait::async_trait;

use crate::node::{Node, NodeContext, NodeError};
use crate::state::{StateDelta, StateSnapshot};
use crate::types::Recommendation;

/// Outcome stage for a high-fit candidate: one interview.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneInterviewNode;

/// Outcome stage for a moderate-fit candidate: two interviews.
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoInterviewsNode;

/// Outcome stage for a low-fit candidate: rejection.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectedNode;

// The three outcome nodes are mutually exclusive: the router selects exactly
// one of them per run, and each does nothing but record its own label.

async fn select_path(
    ctx: &NodeContext,
    recommendation: Recommendation,
    fit: &str,
) -> Result<StateDelta, NodeError> {
    ctx.emit("outcome", format!("Path selected: {recommendation} ({fit})"))?;
    Ok(StateDelta::new().with_recommendation(recommendation))
}

#[async_trait]
impl Node for OneInterviewNode {
    async fn run(
        &self,
        _snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateDelta, NodeError> {
        select_path(&ctx, Recommendation::OneInterview, "high fit").await
    }
}

#[async_trait]
impl Node for TwoInterviewsNode {
    async fn run(
        &self,
        _snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateDelta, NodeError> {
        select_path(&ctx, Recommendation::TwoInterviews, "moderate fit").await
    }
}

#[async_trait]
impl Node for RejectedNode {
    async fn run(
        &self,
        _snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateDelta, NodeError> {
        select_path(&ctx, Recommendation::Rejected, "low fit").await
    }
}
