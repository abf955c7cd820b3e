//! Topology definition and compilation.
//!
//! A pipeline is described declaratively with [`PipelineBuilder`] and
//! compiled into an executable [`Engine`](crate::engine::Engine). The
//! topology has three parts: a strict prefix order, one branch point whose
//! successor is chosen by the router at run time, and a convergence stage
//! shared by every branch. Validation happens at compile time
//! ([`BuildError`]); nothing structural is left to discover mid-run.

mod builder;
mod compile;

pub use builder::PipelineBuilder;
pub use compile::BuildError;

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::nodes::{
    ExtractNode, OneInterviewNode, RejectedNode, ReportNode, ScoreNode, TwoInterviewsNode,
};
use crate::router::score_router;
use crate::scoring::ScoreStrategy;
use crate::summarize::Summarizer;
use crate::types::Stage;

/// Assembles the standard hiring-evaluation pipeline.
///
/// Extract and Score run in order, the threshold router picks exactly one
/// of the three outcome stages, and every branch converges on Report.
pub fn evaluation_pipeline(
    summarizer: Arc<dyn Summarizer>,
    strategy: Arc<dyn ScoreStrategy>,
    config: EngineConfig,
) -> Result<Engine, BuildError> {
    PipelineBuilder::new()
        .register(Stage::Extract, ExtractNode::new(summarizer))
        .register(Stage::Score, ScoreNode::new(strategy))
        .register(Stage::OneInterview, OneInterviewNode)
        .register(Stage::TwoInterviews, TwoInterviewsNode)
        .register(Stage::Rejected, RejectedNode)
        .register(Stage::Report, ReportNode)
        .then(Stage::Extract)
        .then(Stage::Score)
        .branch(
            score_router(),
            [Stage::OneInterview, Stage::TwoInterviews, Stage::Rejected],
        )
        .converge(Stage::Report)
        .with_config(config)
        .compile()
}
