//! Plan persistence operations and queries.

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, types::Type, OptionalExtension, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, Result, StoreError},
    id,
    models::{Page, Plan},
};

// SQL queries as const strings so every call site uses the same column order
const INSERT_PLAN_SQL: &str = "INSERT INTO plans (id, name, description) VALUES (?1, ?2, ?3)";
const SELECT_PLAN_SQL: &str =
    "SELECT id, name, description, created_at, active_step_id FROM plans WHERE id = ?1";
const COUNT_PLANS_SQL: &str = "SELECT COUNT(*) FROM plans";
const SELECT_PLAN_PAGE_SQL: &str = "SELECT id, name, description, created_at, active_step_id \
     FROM plans ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2";

impl super::Database {
    /// Helper function to construct a Plan from a database row
    pub(super) fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
        Ok(Plan {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: row.get::<_, String>(3)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })?,
            active_step_id: row.get(4)?,
        })
    }

    /// Creates a new plan with the given name and description.
    ///
    /// The identifier is generated here; the creation timestamp is assigned
    /// by the database and read back so the returned row is authoritative.
    pub fn create_plan(&mut self, name: &str, description: &str) -> Result<Plan> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let plan_id = id::generate();
        tx.execute(INSERT_PLAN_SQL, params![&plan_id, name, description])
            .map_err(|e| StoreError::persistence("Failed to insert plan", e))?;

        // Read back for the server-assigned creation timestamp
        let plan = tx
            .query_row(SELECT_PLAN_SQL, params![&plan_id], Self::build_plan_from_row)
            .optional()
            .map_err(|e| StoreError::decode("plan", e))?
            .ok_or_else(|| StoreError::integrity(format!("Plan {plan_id} missing after insert")))?;

        if plan.name != name || plan.description != description || plan.active_step_id.is_some() {
            return Err(StoreError::integrity(format!(
                "Plan {plan_id} read back with unexpected contents"
            )));
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(plan)
    }

    /// Retrieves a plan by its ID. Returns `None` when no row matches.
    pub fn get_plan(&self, plan_id: &str) -> Result<Option<Plan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![plan_id], Self::build_plan_from_row)
            .optional()
            .map_err(|e| StoreError::decode("plan", e))
    }

    /// Lists one page of plans ordered newest first, plus the total count.
    ///
    /// `page` is 1-based. Rows that fail to decode are skipped rather than
    /// failing the whole page.
    pub fn list_plans(&self, page: u32, page_size: u32) -> Result<Page<Plan>> {
        let total: i64 = self
            .connection
            .query_row(COUNT_PLANS_SQL, [], |row| row.get(0))
            .db_context("Failed to count plans")?;

        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(page_size);

        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_PAGE_SQL)
            .db_context("Failed to prepare query")?;

        let items: Vec<Plan> = stmt
            .query_map(
                params![i64::from(page_size), offset],
                Self::build_plan_from_row,
            )
            .db_context("Failed to query plans")?
            .filter_map(|row| match row {
                Ok(plan) => Some(plan),
                Err(e) => {
                    warn!("Skipping malformed plan row: {e}");
                    None
                }
            })
            .collect();

        Ok(Page {
            items,
            total: total as u64,
        })
    }
}
