//! Sequential execution of a compiled pipeline.
//!
//! The engine runs one evaluation at a time: prefix stages strictly in
//! order, one router decision, the selected outcome stage only, then the
//! convergence stage. Each stage's delta is merged into the running state
//! before the next stage observes a snapshot. There are no retries and no
//! concurrency between stages; a run either reaches the end or aborts with
//! one reported error.

use miette::Diagnostic;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::event_bus::{ChannelSink, Event, EventBus, EventSink};
use crate::node::{Node, NodeContext, NodeError};
use crate::router::Router;
use crate::state::EvaluationState;
use crate::types::Stage;

/// Errors that abort a run.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    /// A stage returned a fatal error.
    #[error("stage {stage} failed")]
    #[diagnostic(code(hireflow::engine::stage))]
    Node {
        stage: Stage,
        #[source]
        source: NodeError,
    },

    /// The router named a stage outside the declared branch targets.
    ///
    /// Compile-time validation makes this unreachable for routers that
    /// return declared targets; the engine still checks defensively.
    #[error("router selected {stage}, which is not among the branch targets {targets:?}")]
    #[diagnostic(
        code(hireflow::engine::unknown_route),
        help("The router must return one of the stages declared in `branch`.")
    )]
    UnknownRoute { stage: Stage, targets: Vec<Stage> },
}

/// A compiled, executable pipeline.
///
/// Produced by [`PipelineBuilder::compile`](crate::pipeline::PipelineBuilder::compile).
/// The engine owns the resolved topology: every stage reference was checked
/// at compile time, so execution never has to look a stage up and fail.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use hireflow::config::EngineConfig;
/// use hireflow::pipeline::evaluation_pipeline;
/// use hireflow::scoring::FixedScores;
/// use hireflow::state::EvaluationState;
/// use hireflow::summarize::StubSummarizer;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = evaluation_pipeline(
///     Arc::new(StubSummarizer),
///     Arc::new(FixedScores::default()),
///     EngineConfig::default(),
/// )?;
///
/// let initial = EvaluationState::builder()
///     .with_resume_text("…")
///     .with_jd_text("…")
///     .build();
///
/// let final_state = engine.invoke(initial).await?;
/// println!("{}", final_state.final_report().unwrap_or("<no report>"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Engine {
    prefix: Vec<(Stage, Arc<dyn Node>)>,
    router: Router,
    targets: Vec<(Stage, Arc<dyn Node>)>,
    convergence: (Stage, Arc<dyn Node>),
    config: EngineConfig,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("prefix", &self.prefix_stages())
            .field("targets", &self.target_stages())
            .field("convergence", &self.convergence_stage())
            .field("config", &self.config)
            .finish()
    }
}

impl Engine {
    pub(crate) fn from_parts(
        prefix: Vec<(Stage, Arc<dyn Node>)>,
        router: Router,
        targets: Vec<(Stage, Arc<dyn Node>)>,
        convergence: (Stage, Arc<dyn Node>),
        config: EngineConfig,
    ) -> Self {
        Self {
            prefix,
            router,
            targets,
            convergence,
            config,
        }
    }

    /// Stages of the non-branching prefix, in execution order.
    #[must_use]
    pub fn prefix_stages(&self) -> Vec<Stage> {
        self.prefix.iter().map(|(stage, _)| *stage).collect()
    }

    /// Stages the router may select among.
    #[must_use]
    pub fn target_stages(&self) -> Vec<Stage> {
        self.targets.iter().map(|(stage, _)| *stage).collect()
    }

    /// The stage every branch converges on.
    #[must_use]
    pub fn convergence_stage(&self) -> Stage {
        self.convergence.0
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute one run to completion with the configured sinks.
    ///
    /// The state is owned by this run alone; invoking the engine twice with
    /// the same initial state and deterministic collaborators yields the
    /// same final state.
    pub async fn invoke(
        &self,
        initial_state: EvaluationState,
    ) -> Result<EvaluationState, EngineError> {
        let bus = self.config.event_bus.build_event_bus();
        bus.listen_for_events();
        let result = self.run(initial_state, &bus).await;
        bus.stop_listener().await;
        result
    }

    /// Execute one run while streaming events to the returned channel.
    pub async fn invoke_with_channel(
        &self,
        initial_state: EvaluationState,
    ) -> (
        Result<EvaluationState, EngineError>,
        tokio::sync::mpsc::UnboundedReceiver<Event>,
    ) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let bus = self.config.event_bus.build_event_bus();
        bus.add_sink(ChannelSink::new(tx));
        bus.listen_for_events();
        let result = self.run(initial_state, &bus).await;
        bus.stop_listener().await;
        (result, rx)
    }

    /// Execute one run with extra sinks layered over the configured ones.
    pub async fn invoke_with_sinks(
        &self,
        initial_state: EvaluationState,
        sinks: Vec<Box<dyn EventSink>>,
    ) -> Result<EvaluationState, EngineError> {
        let bus = self.config.event_bus.build_event_bus();
        for sink in sinks {
            bus.add_boxed_sink(sink);
        }
        bus.listen_for_events();
        let result = self.run(initial_state, &bus).await;
        bus.stop_listener().await;
        result
    }

    fn next_run_id(&self) -> String {
        self.config
            .run_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    #[instrument(skip_all, fields(run_id), err)]
    async fn run(
        &self,
        mut state: EvaluationState,
        bus: &EventBus,
    ) -> Result<EvaluationState, EngineError> {
        let run_id = self.next_run_id();
        tracing::Span::current().record("run_id", run_id.as_str());

        let event_tx = bus.get_sender();
        let _ = event_tx.send(Event::diagnostic(
            "run",
            format!("evaluation run {run_id} started"),
        ));

        let mut step: u64 = 0;
        for (stage, node) in &self.prefix {
            step += 1;
            state = self.run_stage(state, *stage, node, step, &event_tx).await?;
        }

        let snapshot = state.snapshot();
        let selected = (self.router)(&snapshot);
        let _ = event_tx.send(Event::diagnostic(
            "routing",
            format!("routing to {selected}"),
        ));
        let Some((stage, node)) = self
            .targets
            .iter()
            .find(|(stage, _)| *stage == selected)
        else {
            return Err(EngineError::UnknownRoute {
                stage: selected,
                targets: self.target_stages(),
            });
        };
        step += 1;
        state = self.run_stage(state, *stage, node, step, &event_tx).await?;

        let (stage, node) = &self.convergence;
        step += 1;
        state = self.run_stage(state, *stage, node, step, &event_tx).await?;

        let _ = event_tx.send(Event::diagnostic(
            "run",
            format!("evaluation run {run_id} completed"),
        ));
        Ok(state)
    }

    async fn run_stage(
        &self,
        mut state: EvaluationState,
        stage: Stage,
        node: &Arc<dyn Node>,
        step: u64,
        event_tx: &flume::Sender<Event>,
    ) -> Result<EvaluationState, EngineError> {
        tracing::debug!(stage = %stage, step, "running stage");
        let ctx = NodeContext {
            stage,
            step,
            event_tx: event_tx.clone(),
        };
        let delta = node
            .run(state.snapshot(), ctx)
            .await
            .map_err(|source| EngineError::Node { stage, source })?;
        if state.apply(&delta) {
            tracing::debug!(stage = %stage, revision = state.revision(), "state updated");
        }
        Ok(state)
    }
}
