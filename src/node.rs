//! Stage execution contract for the evaluation pipeline.
//!
//! This module provides the core abstractions for executable pipeline
//! stages: the [`Node`] trait, the execution context handed to each stage,
//! and the fatal error taxonomy.

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

use crate::event_bus::Event;
use crate::state::{MissingFieldError, StateDelta, StateSnapshot};
use crate::types::Stage;

/// A single unit of work within the pipeline.
///
/// A node receives the current state as a read-only snapshot and returns a
/// [`StateDelta`] with the fields it sets. Nodes must not have side effects
/// the engine can observe beyond events emitted through the context, and
/// events never influence control flow.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use hireflow::node::{Node, NodeContext, NodeError};
/// use hireflow::state::{StateDelta, StateSnapshot};
///
/// struct FlagSkills;
///
/// #[async_trait]
/// impl Node for FlagSkills {
///     async fn run(
///         &self,
///         snapshot: StateSnapshot,
///         ctx: NodeContext,
///     ) -> Result<StateDelta, NodeError> {
///         let summary = snapshot.resume_summary()?;
///         ctx.emit("inspect", format!("summary is {} bytes", summary.len()))?;
///         Ok(StateDelta::new())
///     }
/// }
/// ```
#[async_trait]
pub trait Node: Send + Sync {
    /// Execute this stage against the given snapshot.
    async fn run(
        &self,
        snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateDelta, NodeError>;
}

/// Execution context passed to a stage by the engine.
#[derive(Clone, Debug)]
pub struct NodeContext {
    /// Identity of the stage being executed.
    pub stage: Stage,
    /// Position of this stage in the run, starting at 1.
    pub step: u64,
    /// Channel into the run's event bus.
    pub event_tx: flume::Sender<Event>,
}

impl NodeContext {
    /// Emit a stage-scoped event enriched with this context's metadata.
    pub fn emit(
        &self,
        scope: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<(), NodeContextError> {
        self.event_tx
            .send(Event::stage_message(self.stage, self.step, scope, message))
            .map_err(|_| NodeContextError::EventBusUnavailable)
    }
}

/// Errors that can occur when using [`NodeContext`] methods.
#[derive(Debug, Error, Diagnostic)]
pub enum NodeContextError {
    /// Event could not be sent because the event bus is gone.
    #[error("failed to emit event: event bus unavailable")]
    #[diagnostic(
        code(hireflow::node::event_bus_unavailable),
        help("The event bus listener may have been dropped before the run finished.")
    )]
    EventBusUnavailable,
}

/// Fatal errors raised by stage execution.
///
/// Every variant aborts the run; there is no retry or partial-result
/// salvage inside a run.
#[derive(Debug, Error, Diagnostic)]
pub enum NodeError {
    /// A stage read a field no earlier stage had written.
    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingField(#[from] MissingFieldError),

    /// The report stage was reached without everything it renders.
    #[error("pipeline incomplete, report is missing: {missing:?}")]
    #[diagnostic(
        code(hireflow::node::incomplete_pipeline),
        help("The scoring stage and exactly one outcome stage must run before the report.")
    )]
    IncompletePipeline { missing: Vec<&'static str> },

    /// Event bus communication error.
    #[error("event bus error: {0}")]
    #[diagnostic(code(hireflow::node::event_bus))]
    EventBus(#[from] NodeContextError),
}
