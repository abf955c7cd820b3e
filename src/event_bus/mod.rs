//! Event streaming for pipeline observability.
//!
//! Stages and the engine emit [`Event`]s into an [`EventBus`], which
//! broadcasts them to pluggable [`EventSink`]s: stdout for interactive use,
//! [`MemorySink`] for assertions in tests, [`ChannelSink`] for a live
//! consumer. Events are observability only; control flow never depends on
//! them.

mod bus;
mod event;
mod sink;

pub use bus::EventBus;
pub use event::{DiagnosticEvent, Event, StageEvent};
pub use sink::{ChannelSink, EventSink, MemorySink, StdOutSink};
