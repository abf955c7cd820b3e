use proptest::prelude::*;

use hireflow::router::route_by_score;
use hireflow::scoring::{SubScores, aggregate_overall, round2};
use hireflow::state::EvaluationState;
use hireflow::types::Stage;

proptest! {
    /// The overall score is always the weighted combination of the three
    /// sub-scores, rounded to two decimals, and stays inside [0, 100].
    #[test]
    fn overall_is_the_weighted_rounded_combination(
        skills in 0.0f64..=100.0,
        experience in 0.0f64..=100.0,
        education in 0.0f64..=100.0,
    ) {
        let scores = SubScores::new(skills, experience, education);
        let overall = aggregate_overall(&scores);
        let expected = round2(0.50 * skills + 0.30 * experience + 0.20 * education);
        prop_assert_eq!(overall, expected);
        prop_assert!((0.0..=100.0).contains(&overall));
    }

    /// The router is total and exclusive: every finite score selects exactly
    /// one outcome stage, and the selection matches the threshold table.
    #[test]
    fn router_is_total_and_matches_the_thresholds(score in -1000.0f64..=1000.0) {
        let snapshot = EvaluationState::builder()
            .with_overall_score(score)
            .build()
            .snapshot();
        let selected = route_by_score(&snapshot);
        prop_assert!(selected.is_outcome());

        let expected = if score >= 85.0 {
            Stage::OneInterview
        } else if score >= 60.0 {
            Stage::TwoInterviews
        } else {
            Stage::Rejected
        };
        prop_assert_eq!(selected, expected);
    }

    /// Sub-score clamping never lets a dimension leave [0, 100].
    #[test]
    fn sub_scores_are_always_clamped(value in -1e6f64..=1e6) {
        let scores = SubScores::new(value, value, value);
        for dimension in [scores.skills, scores.experience, scores.education] {
            prop_assert!((0.0..=100.0).contains(&dimension));
        }
    }
}
