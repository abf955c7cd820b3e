//! Shared evaluation state threaded through the pipeline.
//!
//! The state is a fixed record of typed fields, every one of them optional
//! until the stage responsible for it has run. Stages never mutate the state
//! directly: each stage receives a read-only [`StateSnapshot`] and returns a
//! [`StateDelta`] holding only the fields it sets. The engine merges deltas
//! into the running state; a merge is additive and never unsets or replaces
//! a field that an earlier stage already wrote.
//!
//! Reading a field before any stage has set it is a topology bug, not a
//! recoverable condition, and surfaces as [`MissingFieldError`].
//!
//! # Examples
//!
//! ```rust
//! use hireflow::state::EvaluationState;
//!
//! let state = EvaluationState::builder()
//!     .with_resume_text("Rust developer, 5 years of systems work.")
//!     .with_jd_text("Senior Rust engineer, distributed storage.")
//!     .build();
//!
//! let snapshot = state.snapshot();
//! assert!(snapshot.resume_text().is_ok());
//! assert!(snapshot.overall_score().is_err());
//! ```

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Recommendation;

/// A field was read before any stage had written it.
///
/// This indicates a stage-ordering bug in the topology and aborts the run;
/// it is never silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("field read before it was written: {field}")]
#[diagnostic(
    code(hireflow::state::missing_field),
    help("Check the stage ordering; an earlier stage must set this field.")
)]
pub struct MissingFieldError {
    /// Name of the field that was not yet set.
    pub field: &'static str,
}

/// The shared state record for one evaluation run.
///
/// Fields accumulate monotonically as stages execute and the whole record is
/// dropped with the run result; nothing survives across runs. The `revision`
/// counter is bumped by the engine whenever a merge changes the record and
/// exists for observability only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationState {
    resume_text: Option<String>,
    jd_text: Option<String>,
    resume_summary: Option<String>,
    jd_summary: Option<String>,
    skills_score: Option<f64>,
    experience_score: Option<f64>,
    education_score: Option<f64>,
    overall_score: Option<f64>,
    recommendation: Option<Recommendation>,
    final_report: Option<String>,
    revision: u32,
}

/// Read-only view of the state handed to stages.
///
/// Accessors return [`MissingFieldError`] when the field has not been set
/// yet, which is how read-before-write is caught at the first offending
/// stage instead of surfacing as a confusing downstream failure.
#[derive(Clone, Debug, Serialize)]
pub struct StateSnapshot {
    resume_text: Option<String>,
    jd_text: Option<String>,
    resume_summary: Option<String>,
    jd_summary: Option<String>,
    skills_score: Option<f64>,
    experience_score: Option<f64>,
    education_score: Option<f64>,
    overall_score: Option<f64>,
    recommendation: Option<Recommendation>,
    final_report: Option<String>,
    revision: u32,
}

/// Partial update returned by a stage.
///
/// All fields are optional; a stage sets only the ones it is responsible
/// for. The engine merges the delta into the running state, first write
/// wins.
///
/// # Examples
///
/// ```rust
/// use hireflow::state::StateDelta;
///
/// let delta = StateDelta::new()
///     .with_skills_score(90.0)
///     .with_experience_score(75.0)
///     .with_education_score(95.0)
///     .with_overall_score(86.5);
/// assert!(!delta.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDelta {
    pub resume_text: Option<String>,
    pub jd_text: Option<String>,
    pub resume_summary: Option<String>,
    pub jd_summary: Option<String>,
    pub skills_score: Option<f64>,
    pub experience_score: Option<f64>,
    pub education_score: Option<f64>,
    pub overall_score: Option<f64>,
    pub recommendation: Option<Recommendation>,
    pub final_report: Option<String>,
}

impl EvaluationState {
    /// Creates a builder for constructing a state, typically pre-seeded with
    /// the intake output.
    pub fn builder() -> EvaluationStateBuilder {
        EvaluationStateBuilder::default()
    }

    /// Creates an immutable snapshot of the current state.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            resume_text: self.resume_text.clone(),
            jd_text: self.jd_text.clone(),
            resume_summary: self.resume_summary.clone(),
            jd_summary: self.jd_summary.clone(),
            skills_score: self.skills_score,
            experience_score: self.experience_score,
            education_score: self.education_score,
            overall_score: self.overall_score,
            recommendation: self.recommendation,
            final_report: self.final_report.clone(),
            revision: self.revision,
        }
    }

    /// Merge a stage delta into the state.
    ///
    /// Additive only: a field that is already set keeps its first value, and
    /// an attempted overwrite is logged as a warning. Returns `true` when
    /// the merge changed anything, in which case the revision is bumped.
    pub(crate) fn apply(&mut self, delta: &StateDelta) -> bool {
        let mut changed = false;
        merge_field(&mut self.resume_text, &delta.resume_text, "resume_text", &mut changed);
        merge_field(&mut self.jd_text, &delta.jd_text, "jd_text", &mut changed);
        merge_field(
            &mut self.resume_summary,
            &delta.resume_summary,
            "resume_summary",
            &mut changed,
        );
        merge_field(&mut self.jd_summary, &delta.jd_summary, "jd_summary", &mut changed);
        merge_field(
            &mut self.skills_score,
            &delta.skills_score,
            "skills_score",
            &mut changed,
        );
        merge_field(
            &mut self.experience_score,
            &delta.experience_score,
            "experience_score",
            &mut changed,
        );
        merge_field(
            &mut self.education_score,
            &delta.education_score,
            "education_score",
            &mut changed,
        );
        merge_field(
            &mut self.overall_score,
            &delta.overall_score,
            "overall_score",
            &mut changed,
        );
        merge_field(
            &mut self.recommendation,
            &delta.recommendation,
            "recommendation",
            &mut changed,
        );
        merge_field(
            &mut self.final_report,
            &delta.final_report,
            "final_report",
            &mut changed,
        );
        if changed {
            self.revision = self.revision.saturating_add(1);
        }
        changed
    }

    pub fn resume_text(&self) -> Option<&str> {
        self.resume_text.as_deref()
    }

    pub fn jd_text(&self) -> Option<&str> {
        self.jd_text.as_deref()
    }

    pub fn resume_summary(&self) -> Option<&str> {
        self.resume_summary.as_deref()
    }

    pub fn jd_summary(&self) -> Option<&str> {
        self.jd_summary.as_deref()
    }

    pub fn skills_score(&self) -> Option<f64> {
        self.skills_score
    }

    pub fn experience_score(&self) -> Option<f64> {
        self.experience_score
    }

    pub fn education_score(&self) -> Option<f64> {
        self.education_score
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.overall_score
    }

    pub fn recommendation(&self) -> Option<Recommendation> {
        self.recommendation
    }

    pub fn final_report(&self) -> Option<&str> {
        self.final_report.as_deref()
    }

    /// Number of merges that changed this state.
    pub fn revision(&self) -> u32 {
        self.revision
    }
}

/// First write wins; later writes are ignored with a warning so the merge
/// stays additive.
fn merge_field<T: Clone + PartialEq>(
    current: &mut Option<T>,
    update: &Option<T>,
    field: &'static str,
    changed: &mut bool,
) {
    if let Some(value) = update {
        match current {
            None => {
                *current = Some(value.clone());
                *changed = true;
            }
            Some(existing) if existing != value => {
                tracing::warn!(field, "ignoring overwrite of already-set field");
            }
            Some(_) => {}
        }
    }
}

impl StateSnapshot {
    pub fn resume_text(&self) -> Result<&str, MissingFieldError> {
        self.resume_text
            .as_deref()
            .ok_or(MissingFieldError { field: "resume_text" })
    }

    pub fn jd_text(&self) -> Result<&str, MissingFieldError> {
        self.jd_text
            .as_deref()
            .ok_or(MissingFieldError { field: "jd_text" })
    }

    pub fn resume_summary(&self) -> Result<&str, MissingFieldError> {
        self.resume_summary
            .as_deref()
            .ok_or(MissingFieldError { field: "resume_summary" })
    }

    pub fn jd_summary(&self) -> Result<&str, MissingFieldError> {
        self.jd_summary
            .as_deref()
            .ok_or(MissingFieldError { field: "jd_summary" })
    }

    pub fn skills_score(&self) -> Result<f64, MissingFieldError> {
        self.skills_score
            .ok_or(MissingFieldError { field: "skills_score" })
    }

    pub fn experience_score(&self) -> Result<f64, MissingFieldError> {
        self.experience_score
            .ok_or(MissingFieldError { field: "experience_score" })
    }

    pub fn education_score(&self) -> Result<f64, MissingFieldError> {
        self.education_score
            .ok_or(MissingFieldError { field: "education_score" })
    }

    pub fn overall_score(&self) -> Result<f64, MissingFieldError> {
        self.overall_score
            .ok_or(MissingFieldError { field: "overall_score" })
    }

    pub fn recommendation(&self) -> Result<Recommendation, MissingFieldError> {
        self.recommendation
            .ok_or(MissingFieldError { field: "recommendation" })
    }

    pub fn final_report(&self) -> Result<&str, MissingFieldError> {
        self.final_report
            .as_deref()
            .ok_or(MissingFieldError { field: "final_report" })
    }

    /// Revision of the state this snapshot was taken from.
    pub fn revision(&self) -> u32 {
        self.revision
    }
}

impl StateDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the delta carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    #[must_use]
    pub fn with_resume_summary(mut self, summary: impl Into<String>) -> Self {
        self.resume_summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn with_jd_summary(mut self, summary: impl Into<String>) -> Self {
        self.jd_summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn with_skills_score(mut self, score: f64) -> Self {
        self.skills_score = Some(score);
        self
    }

    #[must_use]
    pub fn with_experience_score(mut self, score: f64) -> Self {
        self.experience_score = Some(score);
        self
    }

    #[must_use]
    pub fn with_education_score(mut self, score: f64) -> Self {
        self.education_score = Some(score);
        self
    }

    #[must_use]
    pub fn with_overall_score(mut self, score: f64) -> Self {
        self.overall_score = Some(score);
        self
    }

    #[must_use]
    pub fn with_recommendation(mut self, recommendation: Recommendation) -> Self {
        self.recommendation = Some(recommendation);
        self
    }

    #[must_use]
    pub fn with_final_report(mut self, report: impl Into<String>) -> Self {
        self.final_report = Some(report.into());
        self
    }
}

/// Builder for constructing an [`EvaluationState`] with pre-seeded fields.
///
/// The common case seeds just the two extracted texts, but every field is
/// settable so tests and callers can construct mid-pipeline states directly.
#[derive(Debug, Default)]
pub struct EvaluationStateBuilder {
    state: EvaluationState,
}

impl EvaluationStateBuilder {
    #[must_use]
    pub fn with_resume_text(mut self, text: impl Into<String>) -> Self {
        self.state.resume_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_jd_text(mut self, text: impl Into<String>) -> Self {
        self.state.jd_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_resume_summary(mut self, summary: impl Into<String>) -> Self {
        self.state.resume_summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn with_jd_summary(mut self, summary: impl Into<String>) -> Self {
        self.state.jd_summary = Some(summary.into());
        self
    }

    /// Seed all three sub-scores at once.
    #[must_use]
    pub fn with_sub_scores(mut self, skills: f64, experience: f64, education: f64) -> Self {
        self.state.skills_score = Some(skills);
        self.state.experience_score = Some(experience);
        self.state.education_score = Some(education);
        self
    }

    #[must_use]
    pub fn with_overall_score(mut self, score: f64) -> Self {
        self.state.overall_score = Some(score);
        self
    }

    #[must_use]
    pub fn with_recommendation(mut self, recommendation: Recommendation) -> Self {
        self.state.recommendation = Some(recommendation);
        self
    }

    pub fn build(self) -> EvaluationState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reports_missing_fields() {
        let state = EvaluationState::builder().with_resume_text("text").build();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.resume_text().unwrap(), "text");
        let err = snapshot.overall_score().unwrap_err();
        assert_eq!(err.field, "overall_score");
    }

    #[test]
    fn apply_merges_only_unset_fields() {
        let mut state = EvaluationState::default();
        let changed = state.apply(&StateDelta::new().with_skills_score(90.0));
        assert!(changed);
        assert_eq!(state.skills_score(), Some(90.0));
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn apply_keeps_first_write() {
        let mut state = EvaluationState::default();
        state.apply(&StateDelta::new().with_recommendation(Recommendation::OneInterview));
        let changed =
            state.apply(&StateDelta::new().with_recommendation(Recommendation::Rejected));
        assert!(!changed);
        assert_eq!(state.recommendation(), Some(Recommendation::OneInterview));
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn empty_delta_changes_nothing() {
        let mut state = EvaluationState::builder().with_jd_text("jd").build();
        let before = state.clone();
        assert!(!state.apply(&StateDelta::new()));
        assert_eq!(state, before);
    }

    #[test]
    fn snapshot_is_independent_of_later_merges() {
        let mut state = EvaluationState::default();
        let snapshot = state.snapshot();
        state.apply(&StateDelta::new().with_overall_score(50.0));
        assert!(snapshot.overall_score().is_err());
        assert_eq!(state.overall_score(), Some(50.0));
    }
}
