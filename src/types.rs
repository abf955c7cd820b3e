//! Core identity types for the hiring-evaluation pipeline.
//!
//! This module defines the closed set of stage identities and the
//! recommendation labels. Stages form a fixed vocabulary: the topology is
//! described and validated in terms of these variants, so a route to an
//! unknown stage cannot be expressed by accident the way a free-form string
//! key could.
//!
//! # Examples
//!
//! ```rust
//! use hireflow::types::{Recommendation, Stage};
//!
//! let stage = Stage::Score;
//! assert_eq!(stage.as_str(), "score");
//! assert!(!stage.is_outcome());
//! assert!(Stage::TwoInterviews.is_outcome());
//!
//! assert_eq!(Recommendation::OneInterview.as_str(), "One Interview");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a stage within the evaluation pipeline.
///
/// The set is closed on purpose: every stage the topology can reference is a
/// variant here, which lets the builder validate the whole graph eagerly and
/// lets the router return a typed target instead of a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Summarizes the extracted resume and job-description texts.
    Extract,

    /// Computes the three sub-scores and the weighted overall score.
    Score,

    /// Outcome stage for a high-fit candidate.
    OneInterview,

    /// Outcome stage for a moderate-fit candidate.
    TwoInterviews,

    /// Outcome stage for a low-fit candidate.
    Rejected,

    /// Renders the final recommendation report. All branches converge here.
    Report,
}

impl Stage {
    /// Every stage, in canonical pipeline order.
    pub const ALL: [Stage; 6] = [
        Stage::Extract,
        Stage::Score,
        Stage::OneInterview,
        Stage::TwoInterviews,
        Stage::Rejected,
        Stage::Report,
    ];

    /// Stable identifier string, used in events and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Extract => "extract",
            Stage::Score => "score",
            Stage::OneInterview => "one_interview",
            Stage::TwoInterviews => "two_interviews",
            Stage::Rejected => "rejected",
            Stage::Report => "report",
        }
    }

    /// Returns `true` if this stage is one of the three mutually exclusive
    /// outcome stages.
    #[must_use]
    pub fn is_outcome(&self) -> bool {
        matches!(
            self,
            Stage::OneInterview | Stage::TwoInterviews | Stage::Rejected
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hiring recommendation produced by exactly one outcome stage per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    OneInterview,
    TwoInterviews,
    Rejected,
}

impl Recommendation {
    /// Human-readable label, as it appears in the final report.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::OneInterview => "One Interview",
            Recommendation::TwoInterviews => "Two Interviews",
            Recommendation::Rejected => "Rejected",
        }
    }

    /// The outcome stage that sets this recommendation.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Recommendation::OneInterview => Stage::OneInterview,
            Recommendation::TwoInterviews => Stage::TwoInterviews,
            Recommendation::Rejected => Stage::Rejected,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels_are_stable() {
        assert_eq!(Stage::Extract.as_str(), "extract");
        assert_eq!(Stage::OneInterview.as_str(), "one_interview");
        assert_eq!(Stage::Report.to_string(), "report");
    }

    #[test]
    fn outcome_classification() {
        assert!(Stage::OneInterview.is_outcome());
        assert!(Stage::TwoInterviews.is_outcome());
        assert!(Stage::Rejected.is_outcome());
        assert!(!Stage::Extract.is_outcome());
        assert!(!Stage::Score.is_outcome());
        assert!(!Stage::Report.is_outcome());
    }

    #[test]
    fn recommendation_maps_to_its_stage() {
        for rec in [
            Recommendation::OneInterview,
            Recommendation::TwoInterviews,
            Recommendation::Rejected,
        ] {
            assert!(rec.stage().is_outcome());
        }
        assert_eq!(Recommendation::OneInterview.stage(), Stage::OneInterview);
    }

    #[test]
    fn recommendation_display_matches_report_wording() {
        assert_eq!(Recommendation::OneInterview.to_string(), "One Interview");
        assert_eq!(Recommendation::TwoInterviews.to_string(), "Two Interviews");
        assert_eq!(Recommendation::Rejected.to_string(), "Rejected");
    }
}
