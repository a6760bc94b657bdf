//! Plan operations for the PlanStore.

use tokio::task;

use super::PlanStore;
use crate::{
    db::Database,
    error::{Result, StoreError},
    models::{Page, Plan},
    params::{CreatePlan, Id, ListPlans},
};

impl PlanStore {
    /// Creates a new plan with the given name and description.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let db_path = self.db_path.clone();
        let name = params.name.clone();
        let description = params.description.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_plan(&name, &description)
        })
        .await
        .map_err(|e| StoreError::Runtime {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a plan by its ID. Returns `None` when no plan matches.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_plan(&plan_id)
        })
        .await
        .map_err(|e| StoreError::Runtime {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists one page of plans ordered newest first, plus the total count.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Page<Plan>> {
        let db_path = self.db_path.clone();
        let page = params.page;
        let page_size = params.page_size;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_plans(page, page_size)
        })
        .await
        .map_err(|e| StoreError::Runtime {
            message: format!("Task join error: {e}"),
        })?
    }
}
