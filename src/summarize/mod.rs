//! Semantic summarization capability.
//!
//! Summarization is an external collaborator, modelled as a capability
//! interface with two implementations: the deterministic [`StubSummarizer`]
//! and, behind the `live` cargo feature, an HTTP-backed
//! [`HttpSummarizer`](crate::summarize::HttpSummarizer). Which one a
//! pipeline uses is a configuration decision
//! ([`SummarizerChoice`](crate::config::SummarizerChoice)); when a live
//! summarizer is unreachable the extract stage substitutes the stub output
//! and keeps going. That degraded mode is part of the contract, not an
//! error path.

#[cfg(feature = "live")]
mod http;

#[cfg(feature = "live")]
pub use http::HttpSummarizer;

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

/// Condensed semantic descriptions of the two input documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryPair {
    pub resume_summary: String,
    pub jd_summary: String,
}

/// Errors from a summarization backend.
///
/// These never abort a run by themselves: the extract stage treats any of
/// them as a signal to fall back to the deterministic placeholders.
#[derive(Debug, Error, Diagnostic)]
pub enum SummarizerError {
    /// The backend could not be reached or is not configured.
    #[error("summarization service unavailable: {reason}")]
    #[diagnostic(
        code(hireflow::summarize::unavailable),
        help("The pipeline continues with deterministic placeholder summaries.")
    )]
    Unavailable { reason: String },

    /// The backend answered with something that is not a summary.
    #[error("summarization response malformed: {detail}")]
    #[diagnostic(code(hireflow::summarize::malformed))]
    Malformed { detail: String },

    /// Transport-level failure talking to the backend.
    #[cfg(feature = "live")]
    #[error("summarization request failed")]
    #[diagnostic(code(hireflow::summarize::http))]
    Http(#[from] reqwest::Error),
}

/// Turns the two extracted texts into condensed summaries.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<SummaryPair, SummarizerError>;
}

/// Deterministic summarizer that needs no external service.
///
/// Always returns the same fixed pair of summaries, which makes whole-run
/// results reproducible. It doubles as the degraded mode the extract stage
/// falls back to when a live summarizer fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubSummarizer;

impl StubSummarizer {
    /// Fixed resume summary used in stub and degraded modes.
    pub const RESUME_SUMMARY: &'static str =
        "Skills: Python, LangGraph, Cloud. Experience: 5 yrs. Education: Masters.";

    /// Fixed job-description summary used in stub and degraded modes.
    pub const JD_SUMMARY: &'static str =
        "Required Skills: Python, LangGraph, Cloud. Experience: Senior Dev (3+ yrs). \
         Education: CS Degree.";

    /// The placeholder pair, available without going through the trait.
    #[must_use]
    pub fn placeholder_pair() -> SummaryPair {
        SummaryPair {
            resume_summary: Self::RESUME_SUMMARY.to_string(),
            jd_summary: Self::JD_SUMMARY.to_string(),
        }
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(
        &self,
        _resume_text: &str,
        _jd_text: &str,
    ) -> Result<SummaryPair, SummarizerError> {
        Ok(Self::placeholder_pair())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_is_deterministic() {
        let first = StubSummarizer.summarize("resume", "jd").await.unwrap();
        let second = StubSummarizer.summarize("other", "inputs").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, StubSummarizer::placeholder_pair());
    }
}
