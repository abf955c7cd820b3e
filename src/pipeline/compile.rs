//! Topology validation and compilation into an executable engine.

use miette::Diagnostic;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use thiserror::Error;

use crate::engine::Engine;
use crate::node::Node;
use crate::types::Stage;

/// Structural problems caught while compiling a topology.
///
/// All of these are construction-time bugs; catching them here is what
/// makes an unknown route unreachable in a compiled engine.
#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("pipeline has no prefix stages")]
    #[diagnostic(
        code(hireflow::pipeline::empty_prefix),
        help("Add at least one stage with `then` before the branch point.")
    )]
    EmptyPrefix,

    #[error("stage {stage} is referenced as {role} but was never registered")]
    #[diagnostic(
        code(hireflow::pipeline::unregistered_stage),
        help("Register an implementation for the stage with `register`.")
    )]
    UnregisteredStage { stage: Stage, role: &'static str },

    #[error("stage {stage} appears more than once in the topology")]
    #[diagnostic(code(hireflow::pipeline::duplicate_stage))]
    DuplicateStage { stage: Stage },

    #[error("pipeline declares no branch point")]
    #[diagnostic(
        code(hireflow::pipeline::missing_branch),
        help("Declare the router and its targets with `branch`.")
    )]
    MissingBranch,

    #[error("pipeline declares more than one branch point")]
    #[diagnostic(code(hireflow::pipeline::duplicate_branch))]
    DuplicateBranch,

    #[error("branch point declares no targets")]
    #[diagnostic(code(hireflow::pipeline::no_targets))]
    NoTargets,

    #[error("pipeline declares no convergence stage")]
    #[diagnostic(
        code(hireflow::pipeline::missing_convergence),
        help("Name the stage all branches lead to with `converge`.")
    )]
    MissingConvergence,

    #[error("stage {stage} is registered but unused by the topology")]
    #[diagnostic(code(hireflow::pipeline::unused_stage))]
    UnusedStage { stage: Stage },
}

impl super::builder::PipelineBuilder {
    /// Validates the topology and compiles it into an [`Engine`].
    ///
    /// Checks, in order: the prefix is non-empty; exactly one branch point
    /// with at least one target exists; a convergence stage is declared; no
    /// stage appears twice across prefix, targets, and convergence; every
    /// referenced stage has a registered implementation; and no registered
    /// implementation is left unreferenced.
    pub fn compile(self) -> Result<Engine, BuildError> {
        let super::builder::PipelineBuilder {
            nodes,
            prefix,
            branches,
            convergence,
            config,
        } = self;

        if prefix.is_empty() {
            return Err(BuildError::EmptyPrefix);
        }

        let mut branches = branches.into_iter();
        let branch = branches.next().ok_or(BuildError::MissingBranch)?;
        if branches.next().is_some() {
            return Err(BuildError::DuplicateBranch);
        }
        if branch.targets.is_empty() {
            return Err(BuildError::NoTargets);
        }

        let convergence = convergence.ok_or(BuildError::MissingConvergence)?;

        let mut seen = FxHashSet::default();
        for stage in prefix
            .iter()
            .chain(branch.targets.iter())
            .chain(std::iter::once(&convergence))
        {
            if !seen.insert(*stage) {
                return Err(BuildError::DuplicateStage { stage: *stage });
            }
        }

        let resolve = |stage: Stage, role: &'static str| {
            nodes
                .get(&stage)
                .cloned()
                .map(|node| (stage, node))
                .ok_or(BuildError::UnregisteredStage { stage, role })
        };

        let prefix: Vec<(Stage, Arc<dyn Node>)> = prefix
            .into_iter()
            .map(|stage| resolve(stage, "a prefix stage"))
            .collect::<Result<_, _>>()?;
        let targets: Vec<(Stage, Arc<dyn Node>)> = branch
            .targets
            .into_iter()
            .map(|stage| resolve(stage, "a branch target"))
            .collect::<Result<_, _>>()?;
        let convergence = resolve(convergence, "the convergence stage")?;

        for stage in nodes.keys() {
            if !seen.contains(stage) {
                return Err(BuildError::UnusedStage { stage: *stage });
            }
        }

        Ok(Engine::from_parts(
            prefix,
            branch.router,
            targets,
            convergence,
            config,
        ))
    }
}
