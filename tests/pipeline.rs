mod common;

use std::sync::Arc;

use common::*;
use hireflow::nodes::{
    ExtractNode, OneInterviewNode, RejectedNode, ReportNode, ScoreNode, TwoInterviewsNode,
};
use hireflow::pipeline::{BuildError, PipelineBuilder};
use hireflow::router::score_router;
use hireflow::scoring::FixedScores;
use hireflow::state::StateDelta;
use hireflow::summarize::StubSummarizer;
use hireflow::types::Stage;

fn full_builder() -> PipelineBuilder {
    PipelineBuilder::new()
        .register(Stage::Extract, ExtractNode::new(Arc::new(StubSummarizer)))
        .register(Stage::Score, ScoreNode::new(Arc::new(FixedScores::default())))
        .register(Stage::OneInterview, OneInterviewNode)
        .register(Stage::TwoInterviews, TwoInterviewsNode)
        .register(Stage::Rejected, RejectedNode)
        .register(Stage::Report, ReportNode)
}

const OUTCOMES: [Stage; 3] = [Stage::OneInterview, Stage::TwoInterviews, Stage::Rejected];

#[test]
fn full_topology_compiles() {
    let engine = full_builder()
        .then(Stage::Extract)
        .then(Stage::Score)
        .branch(score_router(), OUTCOMES)
        .converge(Stage::Report)
        .with_config(silent_config())
        .compile()
        .unwrap();

    assert_eq!(engine.prefix_stages(), vec![Stage::Extract, Stage::Score]);
    assert_eq!(engine.target_stages(), OUTCOMES.to_vec());
    assert_eq!(engine.convergence_stage(), Stage::Report);
}

#[test]
fn empty_prefix_is_rejected() {
    let err = full_builder()
        .branch(score_router(), OUTCOMES)
        .converge(Stage::Report)
        .compile()
        .unwrap_err();
    assert!(matches!(err, BuildError::EmptyPrefix));
}

#[test]
fn missing_branch_is_rejected() {
    let err = full_builder()
        .then(Stage::Extract)
        .then(Stage::Score)
        .converge(Stage::Report)
        .compile()
        .unwrap_err();
    assert!(matches!(err, BuildError::MissingBranch));
}

#[test]
fn duplicate_branch_is_rejected() {
    let err = full_builder()
        .then(Stage::Extract)
        .then(Stage::Score)
        .branch(score_router(), OUTCOMES)
        .branch(score_router(), OUTCOMES)
        .converge(Stage::Report)
        .compile()
        .unwrap_err();
    assert!(matches!(err, BuildError::DuplicateBranch));
}

#[test]
fn branch_without_targets_is_rejected() {
    let err = full_builder()
        .then(Stage::Extract)
        .then(Stage::Score)
        .branch(score_router(), [])
        .converge(Stage::Report)
        .compile()
        .unwrap_err();
    assert!(matches!(err, BuildError::NoTargets));
}

#[test]
fn missing_convergence_is_rejected() {
    let err = full_builder()
        .then(Stage::Extract)
        .then(Stage::Score)
        .branch(score_router(), OUTCOMES)
        .compile()
        .unwrap_err();
    assert!(matches!(err, BuildError::MissingConvergence));
}

#[test]
fn unregistered_target_is_rejected() {
    // Rejected is referenced as a branch target but never registered.
    let err = PipelineBuilder::new()
        .register(Stage::Extract, DeltaNode::new(StateDelta::new()))
        .register(Stage::OneInterview, OneInterviewNode)
        .register(Stage::TwoInterviews, TwoInterviewsNode)
        .register(Stage::Report, ReportNode)
        .then(Stage::Extract)
        .branch(score_router(), OUTCOMES)
        .converge(Stage::Report)
        .compile()
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnregisteredStage {
            stage: Stage::Rejected,
            ..
        }
    ));
}

#[test]
fn duplicate_stage_is_rejected() {
    let err = full_builder()
        .then(Stage::Extract)
        .then(Stage::Extract)
        .then(Stage::Score)
        .branch(score_router(), OUTCOMES)
        .converge(Stage::Report)
        .compile()
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::DuplicateStage {
            stage: Stage::Extract
        }
    ));
}

#[test]
fn unused_registered_stage_is_rejected() {
    // Score is registered but the topology never runs it.
    let err = full_builder()
        .then(Stage::Extract)
        .branch(score_router(), OUTCOMES)
        .converge(Stage::Report)
        .compile()
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnusedStage {
            stage: Stage::Score
        }
    ));
}
