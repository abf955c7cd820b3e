use std::sync::Arc;

use hireflow::config::EngineConfig;
use hireflow::engine::Engine;
use hireflow::pipeline::evaluation_pipeline;
use hireflow::scoring::FixedScores;
use hireflow::state::EvaluationState;
use hireflow::summarize::StubSummarizer;

/// Initial state as intake would seed it.
pub fn seeded_state() -> EvaluationState {
    EvaluationState::builder()
        .with_resume_text("Rust developer. Five years of systems work. MSc in CS.")
        .with_jd_text("Senior Rust engineer for a distributed storage team.")
        .build()
}

/// Engine configuration that emits no output during tests.
pub fn silent_config() -> EngineConfig {
    EngineConfig::default().silent()
}

/// Standard pipeline with fixed sub-scores and the stub summarizer.
pub fn fixed_engine(skills: f64, experience: f64, education: f64) -> Engine {
    evaluation_pipeline(
        Arc::new(StubSummarizer),
        Arc::new(FixedScores::new(skills, experience, education)),
        silent_config(),
    )
    .expect("standard topology compiles")
}

/// Standard pipeline with the default placeholder sub-scores (90 / 75 / 95).
pub fn placeholder_engine() -> Engine {
    evaluation_pipeline(
        Arc::new(StubSummarizer),
        Arc::new(FixedScores::default()),
        silent_config(),
    )
    .expect("standard topology compiles")
}
