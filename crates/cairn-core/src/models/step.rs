//! Step model definition and related types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::StepStatus;

/// Represents one unit of work within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Opaque unique identifier, generated at creation
    pub id: String,

    /// ID of the owning plan
    pub plan_id: String,

    /// What this step does
    pub description: String,

    /// Condition under which the step counts as done
    pub completion_condition: String,

    /// Current status of the step (forward-only)
    pub status: StepStatus,

    /// Execution-order key within the plan. The first step of a plan gets 1;
    /// each subsequent creation gets max + 1. Failure replacement splices
    /// into the order (see [`crate::db::Database::fail_step`]).
    pub step_order: u32,

    /// Record of what was done to satisfy the completion condition.
    /// Set when the step transitions to completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_context: Option<String>,

    /// Timestamp assigned by the store at insertion (UTC)
    pub created_at: Timestamp,
}

/// Result of failing a step: the id of the step that was marked failed and
/// the replacement step spliced in immediately after it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailureOutcome {
    /// The step that was marked failed
    pub failed_step_id: String,

    /// The replacement step, now the plan's active step
    pub new_step: Step,
}
