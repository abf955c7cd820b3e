//! Threshold routing between the mutually exclusive outcome stages.
//!
//! The router is the single decision point of the pipeline. It is a pure,
//! total function from the post-scoring snapshot to exactly one outcome
//! stage; it never fails and never selects more or fewer than one target.

use std::sync::Arc;

use crate::state::StateSnapshot;
use crate::types::Stage;

/// Decision function evaluated once per run, after scoring.
///
/// Returning a typed [`Stage`] (rather than a name looked up at run time)
/// means a route to an unregistered target cannot be expressed; the engine
/// still checks the returned stage against the declared targets defensively.
pub type Router = Arc<dyn Fn(&StateSnapshot) -> Stage + Send + Sync + 'static>;

/// Score at or above which a candidate goes straight to a single interview.
pub const ONE_INTERVIEW_THRESHOLD: f64 = 85.0;

/// Score at or above which a candidate gets the two-interview track.
pub const TWO_INTERVIEWS_THRESHOLD: f64 = 60.0;

/// Routes on `overall_score` with closed, ordered thresholds.
///
/// Evaluated top-down, first match wins; both lower bounds are inclusive,
/// so exactly 85.0 selects [`Stage::OneInterview`] and exactly 60.0 selects
/// [`Stage::TwoInterviews`]. Anything else, including values that cannot be
/// produced by the scoring stage (negatives, NaN, or a missing score, which
/// is treated as 0.0), falls through to [`Stage::Rejected`].
#[must_use]
pub fn route_by_score(snapshot: &StateSnapshot) -> Stage {
    let score = snapshot.overall_score().unwrap_or(0.0);
    if score >= ONE_INTERVIEW_THRESHOLD {
        Stage::OneInterview
    } else if score >= TWO_INTERVIEWS_THRESHOLD {
        Stage::TwoInterviews
    } else {
        Stage::Rejected
    }
}

/// The threshold router boxed for use in a topology.
#[must_use]
pub fn score_router() -> Router {
    Arc::new(route_by_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EvaluationState;

    fn snapshot_with(score: f64) -> StateSnapshot {
        EvaluationState::builder()
            .with_overall_score(score)
            .build()
            .snapshot()
    }

    #[test]
    fn boundary_values_route_inclusively() {
        assert_eq!(route_by_score(&snapshot_with(85.0)), Stage::OneInterview);
        assert_eq!(route_by_score(&snapshot_with(84.99)), Stage::TwoInterviews);
        assert_eq!(route_by_score(&snapshot_with(60.0)), Stage::TwoInterviews);
        assert_eq!(route_by_score(&snapshot_with(59.99)), Stage::Rejected);
    }

    #[test]
    fn extremes_do_not_panic() {
        assert_eq!(route_by_score(&snapshot_with(0.0)), Stage::Rejected);
        assert_eq!(route_by_score(&snapshot_with(-12.5)), Stage::Rejected);
        assert_eq!(route_by_score(&snapshot_with(100.0)), Stage::OneInterview);
        assert_eq!(
            route_by_score(&snapshot_with(f64::INFINITY)),
            Stage::OneInterview
        );
        assert_eq!(
            route_by_score(&snapshot_with(f64::NEG_INFINITY)),
            Stage::Rejected
        );
        assert_eq!(route_by_score(&snapshot_with(f64::NAN)), Stage::Rejected);
    }

    #[test]
    fn missing_score_routes_to_rejected() {
        let snapshot = EvaluationState::default().snapshot();
        assert_eq!(route_by_score(&snapshot), Stage::Rejected);
    }

    #[test]
    fn always_selects_an_outcome_stage() {
        for score in [-1.0, 0.0, 59.99, 60.0, 72.3, 84.99, 85.0, 100.0, 250.0] {
            assert!(route_by_score(&snapshot_with(score)).is_outcome());
        }
    }
}
