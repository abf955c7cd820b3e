use std::sync::Arc;

use async_trait::async_trait;

use crate::node::{Node, NodeContext, NodeError};
use crate::scoring::{ScoreStrategy, aggregate_overall};
use crate::state::{StateDelta, StateSnapshot};

/// Computes the three sub-scores and the weighted overall score.
///
/// Sub-score computation is delegated to the configured [`ScoreStrategy`];
/// the aggregation formula and rounding live in [`crate::scoring`] and are
/// not negotiable per strategy.
pub struct ScoreNode {
    strategy: Arc<dyn ScoreStrategy>,
}

impl ScoreNode {
    pub fn new(strategy: Arc<dyn ScoreStrategy>) -> Self {
        Self { strategy }
    }
}

#[async_trait]
impl Node for ScoreNode {
    async fn run(
        &self,
        snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateDelta, NodeError> {
        let resume_summary = snapshot.resume_summary()?;
        let jd_summary = snapshot.jd_summary()?;

        ctx.emit("score", "Comparing documents and calculating score")?;

        let scores = self.strategy.score(resume_summary, jd_summary);
        let overall = aggregate_overall(&scores);

        ctx.emit("score", format!("Overall score {overall} / 100"))?;

        Ok(StateDelta::new()
            .with_skills_score(scores.skills)
            .with_experience_score(scores.experience)
            .with_education_score(scores.education)
            .with_overall_score(overall))
    }
}
