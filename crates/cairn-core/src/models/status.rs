//! Status enumeration for steps.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of step statuses.
///
/// `InProgress` is the only non-terminal state. A step transitions exactly
/// once, to either `Completed` or `Failed`, and never back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step is pending execution or currently being worked on
    #[default]
    InProgress,

    /// Step has been completed (terminal)
    Completed,

    /// Step has failed and was replaced by a successor (terminal)
    Failed,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(StepStatus::InProgress),
            "completed" => Ok(StepStatus::Completed),
            "failed" => Ok(StepStatus::Failed),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    /// Convert to the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
        }
    }

    /// Whether the status permits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepStatus::InProgress)
    }
}
