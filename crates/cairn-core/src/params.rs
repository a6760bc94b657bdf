//! Parameter structures for store operations.
//!
//! These structs carry the arguments of each store operation without any
//! interface-specific derives, so the consuming tool-dispatch layer can wrap
//! them with its own framework types. The optional `schema` feature adds
//! JSON-schema derives for layers that publish tool schemas.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

/// Generic parameters for operations requiring just an ID.
///
/// Used for `get_plan`, `get_active_step`, and `list_steps`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: String,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Name of the plan (required)
    pub name: String,
    /// Detailed description of the plan (required)
    pub description: String,
}

/// Parameters for listing plans, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of plans per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListPlans {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// Parameters for creating a step at the end of a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepCreate {
    /// ID of the plan to append the step to
    pub plan_id: String,
    /// What the step does (required)
    pub description: String,
    /// Condition under which the step counts as done (required)
    pub completion_condition: String,
    /// Optional pre-filled record of prior work on this step
    #[serde(default)]
    pub completion_context: Option<String>,
}

/// Parameters for completing a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CompleteStep {
    /// ID of the step to complete
    pub step_id: String,
    /// Record of what was done to satisfy the completion condition
    pub completion_context: String,
}

/// Parameters for failing the active step and splicing in a replacement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FailStep {
    /// ID of the step to fail; must be its plan's active, in-progress step
    pub step_id: String,
    /// Description for the replacement step
    pub description: String,
    /// Completion condition for the replacement step
    pub completion_condition: String,
}
