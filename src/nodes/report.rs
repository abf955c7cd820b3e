use async_trait::async_trait;

use crate::node::{Node, NodeContext, NodeError};
use crate::state::{StateDelta, StateSnapshot};

/// Renders the final recommendation report.
///
/// All branches converge here. The node refuses to render from an
/// incomplete state: the overall score, the recommendation, and all three
/// sub-scores must exist, otherwise it fails with
/// [`NodeError::IncompletePipeline`] naming every missing field.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportNode;

#[async_trait]
impl Node for ReportNode {
    async fn run(
        &self,
        snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateDelta, NodeError> {
        let mut missing = Vec::new();
        if snapshot.overall_score().is_err() {
            missing.push("overall_score");
        }
        if snapshot.recommendation().is_err() {
            missing.push("recommendation");
        }
        if snapshot.skills_score().is_err() {
            missing.push("skills_score");
        }
        if snapshot.experience_score().is_err() {
            missing.push("experience_score");
        }
        if snapshot.education_score().is_err() {
            missing.push("education_score");
        }
        if !missing.is_empty() {
            return Err(NodeError::IncompletePipeline { missing });
        }

        ctx.emit("report", "Generating final recommendation report")?;

        let overall = snapshot.overall_score()?;
        let recommendation = snapshot.recommendation()?;
        let report = format!(
            "FINAL HIRING RECOMMENDATION REPORT\n\
             ----------------------------------\n\
             Overall Score: {overall} / 100\n\
             Recommendation: {recommendation}\n\
             \n\
             Score Breakdown:\n\
             * Skills Match: {skills}/100\n\
             * Experience Match: {experience}/100\n\
             * Education Match: {education}/100\n\
             \n\
             The candidate scored {overall} and is recommended for the \
             {recommendation} path based on the automated assessment.\n",
            overall = overall,
            recommendation = recommendation,
            skills = snapshot.skills_score()?,
            experience = snapshot.experience_score()?,
            education = snapshot.education_score()?,
        );

        Ok(StateDelta::new().with_final_report(report))
    }
}
