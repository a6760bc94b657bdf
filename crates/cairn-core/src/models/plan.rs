//! Plan model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Represents a multi-step execution plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Opaque unique identifier, generated at creation
    pub id: String,

    /// Name of the plan
    pub name: String,

    /// Detailed description of the plan
    pub description: String,

    /// Timestamp assigned by the store at insertion (UTC)
    pub created_at: Timestamp,

    /// The step the plan is currently pointing at for execution, if any.
    /// Mutated only by the store's transition logic.
    pub active_step_id: Option<String>,
}
