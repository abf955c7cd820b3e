//! Fluent builder for describing the pipeline topology.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::node::Node;
use crate::router::Router;
use crate::types::Stage;

/// One branch point: a router and the targets it may select among.
#[derive(Clone)]
pub(crate) struct Branch {
    pub(crate) router: Router,
    pub(crate) targets: Vec<Stage>,
}

/// Builder for constructing an executable pipeline.
///
/// A topology is described as a strict prefix order, exactly one branch
/// point (the router and its candidate targets), and one convergence stage
/// that every branch leads to. [`compile`](Self::compile) validates the
/// whole description eagerly so a route to an unregistered target cannot
/// survive to run time.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use hireflow::nodes::{
///     ExtractNode, OneInterviewNode, RejectedNode, ReportNode, ScoreNode, TwoInterviewsNode,
/// };
/// use hireflow::pipeline::PipelineBuilder;
/// use hireflow::router::score_router;
/// use hireflow::scoring::FixedScores;
/// use hireflow::summarize::StubSummarizer;
/// use hireflow::types::Stage;
///
/// let engine = PipelineBuilder::new()
///     .register(Stage::Extract, ExtractNode::new(Arc::new(StubSummarizer)))
///     .register(Stage::Score, ScoreNode::new(Arc::new(FixedScores::default())))
///     .register(Stage::OneInterview, OneInterviewNode)
///     .register(Stage::TwoInterviews, TwoInterviewsNode)
///     .register(Stage::Rejected, RejectedNode)
///     .register(Stage::Report, ReportNode)
///     .then(Stage::Extract)
///     .then(Stage::Score)
///     .branch(
///         score_router(),
///         [Stage::OneInterview, Stage::TwoInterviews, Stage::Rejected],
///     )
///     .converge(Stage::Report)
///     .compile()
///     .expect("well-formed topology");
/// ```
pub struct PipelineBuilder {
    pub(crate) nodes: FxHashMap<Stage, Arc<dyn Node>>,
    pub(crate) prefix: Vec<Stage>,
    pub(crate) branches: Vec<Branch>,
    pub(crate) convergence: Option<Stage>,
    pub(crate) config: EngineConfig,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    /// Creates a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
            prefix: Vec::new(),
            branches: Vec::new(),
            convergence: None,
            config: EngineConfig::default(),
        }
    }

    /// Registers the implementation for a stage identity.
    ///
    /// Registering the same stage twice keeps the last implementation.
    #[must_use]
    pub fn register(mut self, stage: Stage, node: impl Node + 'static) -> Self {
        self.nodes.insert(stage, Arc::new(node));
        self
    }

    /// Appends a stage to the strict, non-branching prefix order.
    #[must_use]
    pub fn then(mut self, stage: Stage) -> Self {
        self.prefix.push(stage);
        self
    }

    /// Declares the branch point: after the prefix, `router` names exactly
    /// one of `targets` to execute.
    #[must_use]
    pub fn branch(mut self, router: Router, targets: impl IntoIterator<Item = Stage>) -> Self {
        self.branches.push(Branch {
            router,
            targets: targets.into_iter().collect(),
        });
        self
    }

    /// Declares the convergence stage all branches lead to.
    #[must_use]
    pub fn converge(mut self, stage: Stage) -> Self {
        self.convergence = Some(stage);
        self
    }

    /// Configures the compiled engine.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}
