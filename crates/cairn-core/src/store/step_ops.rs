//! Step operations for the PlanStore.

use tokio::task;

use super::PlanStore;
use crate::{
    db::Database,
    error::{Result, StoreError},
    models::{FailureOutcome, Step},
    params::{CompleteStep, FailStep, StepCreate},
};

impl PlanStore {
    /// Creates a new step at the end of the plan's order. The first step of
    /// a plan becomes its active step.
    pub async fn create_step(&self, params: &StepCreate) -> Result<Step> {
        let db_path = self.db_path.clone();
        let plan_id = params.plan_id.clone();
        let description = params.description.clone();
        let completion_condition = params.completion_condition.clone();
        let completion_context = params.completion_context.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_step(
                &plan_id,
                &description,
                &completion_condition,
                completion_context.as_deref(),
            )
        })
        .await
        .map_err(|e| StoreError::Runtime {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Returns the plan's lowest-ordered in-progress step, if any.
    pub async fn get_active_step(&self, plan_id: &str) -> Result<Option<Step>> {
        let db_path = self.db_path.clone();
        let plan_id = plan_id.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_active_step(&plan_id)
        })
        .await
        .map_err(|e| StoreError::Runtime {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Marks a step completed, stores its completion context, and advances
    /// the plan's active step. Returns the step that is now active, if any.
    pub async fn complete_step(&self, params: &CompleteStep) -> Result<Option<Step>> {
        let db_path = self.db_path.clone();
        let step_id = params.step_id.clone();
        let completion_context = params.completion_context.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.complete_step(&step_id, &completion_context)
        })
        .await
        .map_err(|e| StoreError::Runtime {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Marks the plan's active step failed and splices in a replacement
    /// step immediately after it. Returns the failed step's id together
    /// with the replacement, which is now the active step.
    pub async fn fail_step(&self, params: &FailStep) -> Result<FailureOutcome> {
        let db_path = self.db_path.clone();
        let step_id = params.step_id.clone();
        let description = params.description.clone();
        let completion_condition = params.completion_condition.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.fail_step(&step_id, &description, &completion_condition)
        })
        .await
        .map_err(|e| StoreError::Runtime {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves all steps for a plan in execution/history order, including
    /// completed and failed steps.
    pub async fn list_steps(&self, plan_id: &str) -> Result<Vec<Step>> {
        let db_path = self.db_path.clone();
        let plan_id = plan_id.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_steps(&plan_id)
        })
        .await
        .map_err(|e| StoreError::Runtime {
            message: format!("Task join error: {e}"),
        })?
    }
}
