//! # Hireflow: Conditional Hiring-Evaluation Pipeline
//!
//! Hireflow evaluates a candidate against a job description by running a
//! fixed pipeline of stages over a typed shared state, branching once on a
//! score threshold, and converging on a final report.
//!
//! ## Core Concepts
//!
//! - **State**: a typed record ([`state::EvaluationState`]) whose fields are
//!   written once each; stages see read-only snapshots and return deltas
//! - **Nodes**: async units of work implementing [`node::Node`], one per
//!   [`types::Stage`]
//! - **Router**: the single decision point ([`router::route_by_score`]),
//!   total over every possible score
//! - **Pipeline**: a declarative topology (prefix, branch, convergence)
//!   validated eagerly at compile time ([`pipeline::PipelineBuilder`])
//! - **Engine**: strictly sequential execution with event streaming
//!   ([`engine::Engine`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hireflow::config::EngineConfig;
//! use hireflow::intake::{DocumentBlob, PlainTextLoader, load_into_state};
//! use hireflow::pipeline::evaluation_pipeline;
//! use hireflow::scoring::FixedScores;
//! use hireflow::summarize::StubSummarizer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Intake runs before the pipeline and fails loudly on bad documents.
//! let initial = load_into_state(
//!     &PlainTextLoader,
//!     &DocumentBlob::new("resume.txt", "Rust, five years, MSc."),
//!     &DocumentBlob::new("jd.txt", "Senior Rust engineer wanted."),
//! )?;
//!
//! let engine = evaluation_pipeline(
//!     Arc::new(StubSummarizer),
//!     Arc::new(FixedScores::default()),
//!     EngineConfig::default(),
//! )?;
//!
//! let final_state = engine.invoke(initial).await?;
//! println!("{}", final_state.final_report().unwrap_or("<no report>"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Degraded Mode
//!
//! Summarization is an optional collaborator. With the `live` feature a
//! pipeline can call an HTTP summarizer; when that service is unreachable
//! the extract stage falls back to deterministic placeholder summaries and
//! the run continues. The fallback is a first-class, testable path, not an
//! exception swallowed somewhere.
//!
//! ## Module Guide
//!
//! - [`types`] - stage identities and recommendation labels
//! - [`state`] - the shared record, snapshots, and deltas
//! - [`node`] - the stage contract and error taxonomy
//! - [`router`] - threshold routing between outcome stages
//! - [`pipeline`] - topology description and validation
//! - [`engine`] - sequential execution and event streaming
//! - [`nodes`] - the five stage implementations
//! - [`intake`] - document blobs to extracted text
//! - [`summarize`] - the summarization capability
//! - [`scoring`] - sub-score strategies and the aggregation formula
//! - [`config`] - engine, event-bus, and summarizer configuration
//! - [`event_bus`] - events, bus, and sinks
//! - [`telemetry`] - event formatting and tracing setup

pub mod config;
pub mod engine;
pub mod event_bus;
pub mod intake;
pub mod node;
pub mod nodes;
pub mod pipeline;
pub mod router;
pub mod scoring;
pub mod state;
pub mod summarize;
pub mod telemetry;
pub mod types;
