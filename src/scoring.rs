//! Sub-score strategies and the fixed aggregation formula.
//!
//! How the three sub-scores are computed is pluggable behind
//! [`ScoreStrategy`]; what is fixed here is the weighted combination and the
//! rounding rule that produce `overall_score` from them.

use rustc_hash::FxHashSet;

/// Weight of the skills sub-score in the overall score.
pub const SKILLS_WEIGHT: f64 = 0.50;
/// Weight of the experience sub-score in the overall score.
pub const EXPERIENCE_WEIGHT: f64 = 0.30;
/// Weight of the education sub-score in the overall score.
pub const EDUCATION_WEIGHT: f64 = 0.20;

/// The three per-dimension match scores, each clamped to `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl SubScores {
    /// Builds a score triple, clamping every dimension into `[0, 100]`.
    #[must_use]
    pub fn new(skills: f64, experience: f64, education: f64) -> Self {
        Self {
            skills: clamp_score(skills),
            experience: clamp_score(experience),
            education: clamp_score(education),
        }
    }
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) }
}

/// Computes the three sub-scores from the two summaries.
///
/// Implementations must be deterministic for a deterministic pipeline; the
/// engine does not look at how the numbers were produced, only at the
/// aggregation contract.
pub trait ScoreStrategy: Send + Sync {
    fn score(&self, resume_summary: &str, jd_summary: &str) -> SubScores;
}

/// Fixed sub-scores, independent of the summaries.
///
/// The default triple (90 / 75 / 95) is the placeholder assessment used
/// until a real comparison strategy is wired in; it keeps the pipeline
/// deterministic and runnable with no external dependencies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedScores {
    scores: SubScores,
}

impl FixedScores {
    #[must_use]
    pub fn new(skills: f64, experience: f64, education: f64) -> Self {
        Self {
            scores: SubScores::new(skills, experience, education),
        }
    }
}

impl Default for FixedScores {
    fn default() -> Self {
        Self::new(90.0, 75.0, 95.0)
    }
}

impl ScoreStrategy for FixedScores {
    fn score(&self, _resume_summary: &str, _jd_summary: &str) -> SubScores {
        self.scores
    }
}

/// Scores each dimension by term coverage between the two summaries.
///
/// For each dimension the strategy isolates the summary segment mentioning
/// that dimension (falling back to the whole summary when no segment is
/// labelled) and scores the fraction of job-description terms that also
/// appear on the resume side. Summaries shaped like
/// `"Skills: ... Experience: ... Education: ..."` therefore score per
/// dimension rather than globally.
#[derive(Clone, Copy, Debug, Default)]
pub struct TermOverlap;

impl ScoreStrategy for TermOverlap {
    fn score(&self, resume_summary: &str, jd_summary: &str) -> SubScores {
        SubScores::new(
            dimension_score(resume_summary, jd_summary, "skill"),
            dimension_score(resume_summary, jd_summary, "experience"),
            dimension_score(resume_summary, jd_summary, "education"),
        )
    }
}

fn dimension_score(resume_summary: &str, jd_summary: &str, marker: &str) -> f64 {
    let mut jd_terms =
        segment_terms(jd_summary, marker).unwrap_or_else(|| terms(jd_summary));
    // The dimension label itself is not signal.
    jd_terms.retain(|t| !t.contains(marker));
    if jd_terms.is_empty() {
        return 0.0;
    }
    let resume_terms =
        segment_terms(resume_summary, marker).unwrap_or_else(|| terms(resume_summary));
    let hits = jd_terms.iter().filter(|t| resume_terms.contains(*t)).count();
    hits as f64 / jd_terms.len() as f64 * 100.0
}

/// Terms of the first sentence or line mentioning `marker`, if any.
fn segment_terms(text: &str, marker: &str) -> Option<FxHashSet<String>> {
    text.split(['.', '\n'])
        .find(|segment| segment.to_lowercase().contains(marker))
        .map(terms)
}

fn terms(text: &str) -> FxHashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3)
        .map(str::to_lowercase)
        .collect()
}

/// Weighted overall score, rounded to two decimals.
///
/// `overall = round2(0.50 * skills + 0.30 * experience + 0.20 * education)`.
#[must_use]
pub fn aggregate_overall(scores: &SubScores) -> f64 {
    round2(
        scores.skills * SKILLS_WEIGHT
            + scores.experience * EXPERIENCE_WEIGHT
            + scores.education * EDUCATION_WEIGHT,
    )
}

/// Rounds to two decimal places, half away from zero (`f64::round`).
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregation_matches_reference_example() {
        let scores = SubScores::new(90.0, 75.0, 95.0);
        assert_eq!(aggregate_overall(&scores), 86.5);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 0.125 is exactly representable, so this really is the half case.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(86.504), 86.5);
        assert_eq!(round2(86.5), 86.5);
    }

    #[test]
    fn sub_scores_are_clamped() {
        let scores = SubScores::new(-10.0, 150.0, f64::NAN);
        assert_eq!(scores.skills, 0.0);
        assert_eq!(scores.experience, 100.0);
        assert_eq!(scores.education, 0.0);
    }

    #[test]
    fn fixed_scores_ignore_summaries() {
        let strategy = FixedScores::default();
        let scores = strategy.score("anything", "at all");
        assert_eq!(scores, SubScores::new(90.0, 75.0, 95.0));
    }

    #[test]
    fn term_overlap_scores_identical_summaries_fully() {
        let summary = "Skills: rust, tokio, systems. Experience: five years. \
                       Education: masters degree.";
        let scores = TermOverlap.score(summary, summary);
        assert_eq!(scores.skills, 100.0);
        assert_eq!(scores.experience, 100.0);
        assert_eq!(scores.education, 100.0);
    }

    #[test]
    fn term_overlap_scores_disjoint_summaries_zero() {
        let resume = "Skills: cobol. Experience: mainframes. Education: none listed.";
        let jd = "Skills: rust, async. Experience: distributed systems. \
                  Education: graduate degree.";
        let scores = TermOverlap.score(resume, jd);
        assert_eq!(scores.skills, 0.0);
        assert_eq!(scores.experience, 0.0);
        assert_eq!(scores.education, 0.0);
    }
}
