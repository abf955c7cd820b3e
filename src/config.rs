//! Runtime configuration for the evaluation engine.
//!
//! Configuration covers the run identity, the event-bus sink selection, and
//! which summarizer implementation a pipeline should use. Environment
//! variables are read through `dotenvy`, so a local `.env` file works the
//! same as the process environment.

use std::sync::Arc;

use crate::event_bus::{EventBus, EventSink, MemorySink, StdOutSink};
use crate::summarize::{StubSummarizer, Summarizer, SummarizerError};

/// Engine-level configuration.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    /// Explicit run identifier; a fresh uuid is generated per run when unset.
    pub run_id: Option<String>,
    /// Event bus sink selection for runs started through `invoke`.
    pub event_bus: EventBusConfig,
}

impl EngineConfig {
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    #[must_use]
    pub fn with_event_bus(mut self, event_bus: EventBusConfig) -> Self {
        self.event_bus = event_bus;
        self
    }

    /// Keep runs quiet: no sinks at all.
    #[must_use]
    pub fn silent(self) -> Self {
        self.with_event_bus(EventBusConfig::silent())
    }
}

/// Declarative sink selection, resolved into an [`EventBus`] per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventBusConfig {
    sinks: Vec<SinkConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkConfig {
    StdOut,
    Memory,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self::with_stdout_only()
    }
}

impl EventBusConfig {
    #[must_use]
    pub fn with_stdout_only() -> Self {
        Self {
            sinks: vec![SinkConfig::StdOut],
        }
    }

    #[must_use]
    pub fn silent() -> Self {
        Self { sinks: Vec::new() }
    }

    #[must_use]
    pub fn add_sink(mut self, sink: SinkConfig) -> Self {
        if !self.sinks.contains(&sink) {
            self.sinks.push(sink);
        }
        self
    }

    pub fn sinks(&self) -> &[SinkConfig] {
        &self.sinks
    }

    /// Build a fresh bus with the configured sinks.
    pub fn build_event_bus(&self) -> EventBus {
        let sinks: Vec<Box<dyn EventSink>> = self
            .sinks
            .iter()
            .map(|sink| match sink {
                SinkConfig::StdOut => Box::new(StdOutSink::default()) as Box<dyn EventSink>,
                SinkConfig::Memory => Box::new(MemorySink::new()) as Box<dyn EventSink>,
            })
            .collect();
        EventBus::with_sinks(sinks)
    }
}

/// Which summarizer implementation a pipeline should use.
///
/// The stub is the default and needs nothing from the environment. The live
/// variant exists only when the `live` cargo feature is enabled; asking for
/// it without the feature falls back to the stub with a warning instead of
/// failing, because summarization is never allowed to block a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummarizerChoice {
    Stub,
    #[cfg(feature = "live")]
    Live,
}

impl Default for SummarizerChoice {
    fn default() -> Self {
        SummarizerChoice::Stub
    }
}

impl SummarizerChoice {
    /// Reads `HIREFLOW_SUMMARIZER` (`stub` or `live`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        match std::env::var("HIREFLOW_SUMMARIZER").as_deref() {
            Ok("live") => {
                #[cfg(feature = "live")]
                {
                    SummarizerChoice::Live
                }
                #[cfg(not(feature = "live"))]
                {
                    tracing::warn!(
                        "live summarizer requested but the `live` feature is disabled, \
                         using the stub"
                    );
                    SummarizerChoice::Stub
                }
            }
            _ => SummarizerChoice::Stub,
        }
    }

    /// Instantiate the chosen summarizer.
    pub fn build(&self) -> Result<Arc<dyn Summarizer>, SummarizerError> {
        match self {
            SummarizerChoice::Stub => Ok(Arc::new(StubSummarizer)),
            #[cfg(feature = "live")]
            SummarizerChoice::Live => Ok(Arc::new(
                crate::summarize::HttpSummarizer::from_env()?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bus_prints_to_stdout() {
        let config = EventBusConfig::default();
        assert_eq!(config.sinks(), &[SinkConfig::StdOut]);
    }

    #[test]
    fn silent_bus_has_no_sinks() {
        assert!(EventBusConfig::silent().sinks().is_empty());
    }

    #[test]
    fn duplicate_sinks_are_collapsed() {
        let config = EventBusConfig::silent()
            .add_sink(SinkConfig::Memory)
            .add_sink(SinkConfig::Memory);
        assert_eq!(config.sinks(), &[SinkConfig::Memory]);
    }

    #[test]
    fn stub_choice_builds() {
        assert!(SummarizerChoice::Stub.build().is_ok());
    }
}
