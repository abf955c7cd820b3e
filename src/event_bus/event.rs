use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::types::Stage;

/// A progress or diagnostic event emitted during a run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    Stage(StageEvent),
    Diagnostic(DiagnosticEvent),
}

impl Event {
    /// Event scoped to a specific stage execution.
    pub fn stage_message(
        stage: Stage,
        step: u64,
        scope: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Event::Stage(StageEvent {
            stage,
            step,
            scope: scope.into(),
            message: message.into(),
        })
    }

    /// Engine-level event with no owning stage.
    pub fn diagnostic(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Event::Diagnostic(DiagnosticEvent {
            scope: scope.into(),
            message: message.into(),
        })
    }

    pub fn scope_label(&self) -> &str {
        match self {
            Event::Stage(stage) => &stage.scope,
            Event::Diagnostic(diag) => &diag.scope,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Event::Stage(stage) => &stage.message,
            Event::Diagnostic(diag) => &diag.message,
        }
    }

    /// Stage that emitted the event, when there is one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Event::Stage(stage) => Some(stage.stage),
            Event::Diagnostic(_) => None,
        }
    }

    /// Structured JSON form with a normalized schema.
    ///
    /// ```
    /// use hireflow::event_bus::Event;
    /// use hireflow::types::Stage;
    ///
    /// let event = Event::stage_message(Stage::Score, 2, "scoring", "weighing sub-scores");
    /// let json = event.to_json_value();
    /// assert_eq!(json["type"], "stage");
    /// assert_eq!(json["scope"], "scoring");
    /// assert_eq!(json["metadata"]["stage"], "score");
    /// assert_eq!(json["metadata"]["step"], 2);
    /// ```
    pub fn to_json_value(&self) -> Value {
        let (event_type, metadata) = match self {
            Event::Stage(stage) => (
                "stage",
                json!({ "stage": stage.stage.as_str(), "step": stage.step }),
            ),
            Event::Diagnostic(_) => ("diagnostic", json!({})),
        };
        json!({
            "type": event_type,
            "scope": self.scope_label(),
            "message": self.message(),
            "timestamp": Utc::now().to_rfc3339(),
            "metadata": metadata,
        })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Stage(stage) => {
                write!(f, "[{}@{}] {}", stage.stage, stage.step, stage.message)
            }
            Event::Diagnostic(diag) => write!(f, "{}", diag.message),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageEvent {
    pub stage: Stage,
    pub step: u64,
    pub scope: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub scope: String,
    pub message: String,
}
