//! Step persistence operations and the plan/step transition logic.
//!
//! Every multi-statement operation here runs inside a single transaction;
//! an error on any statement aborts the transaction before it reaches the
//! caller, so no partial step creation, completion, or failure is ever
//! visible.

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, types::Type, OptionalExtension, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, Result, StoreError},
    id,
    models::{FailureOutcome, Step, StepStatus},
};

// SQL queries as const strings so every call site uses the same column order
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
// step_order is computed inside the INSERT so the MAX+1 is atomic with the
// write even under concurrent creation for the same plan
const INSERT_STEP_SQL: &str = "INSERT INTO steps \
     (id, plan_id, description, completion_condition, completion_context, step_order) \
     VALUES (?1, ?2, ?3, ?4, ?5, \
     (SELECT COALESCE(MAX(step_order), 0) + 1 FROM steps WHERE plan_id = ?2))";
const INSERT_REPLACEMENT_STEP_SQL: &str = "INSERT INTO steps \
     (id, plan_id, description, completion_condition, step_order) VALUES (?1, ?2, ?3, ?4, ?5)";
const COUNT_PLAN_STEPS_SQL: &str = "SELECT COUNT(*) FROM steps WHERE plan_id = ?1";
const SELECT_STEP_BY_ID_SQL: &str = "SELECT id, plan_id, description, completion_condition, status, step_order, completion_context, created_at \
     FROM steps WHERE id = ?1";
// Equal step_order values are tie-broken by rowid, i.e. insertion sequence
const SELECT_STEPS_BY_PLAN_SQL: &str = "SELECT id, plan_id, description, completion_condition, status, step_order, completion_context, created_at \
     FROM steps WHERE plan_id = ?1 ORDER BY step_order, rowid";
// The active step is derived from status + order rather than trusting the
// denormalized pointer, so a stale pointer cannot mislead readers
const SELECT_ACTIVE_STEP_SQL: &str = "SELECT id, plan_id, description, completion_condition, status, step_order, completion_context, created_at \
     FROM steps WHERE plan_id = ?1 AND status = 'in_progress' \
     ORDER BY step_order, rowid LIMIT 1";
const SELECT_NEXT_STEP_SQL: &str = "SELECT id, plan_id, description, completion_condition, status, step_order, completion_context, created_at \
     FROM steps WHERE plan_id = ?1 AND status = 'in_progress' AND step_order > ?2 \
     ORDER BY step_order, rowid LIMIT 1";
const SELECT_STEP_FOR_TRANSITION_SQL: &str =
    "SELECT plan_id, step_order, status FROM steps WHERE id = ?1";
const SELECT_STEP_WITH_ACTIVE_SQL: &str = "SELECT s.plan_id, s.step_order, s.status, p.active_step_id \
     FROM steps s JOIN plans p ON p.id = s.plan_id WHERE s.id = ?1";
const UPDATE_STEP_COMPLETED_SQL: &str =
    "UPDATE steps SET status = 'completed', completion_context = ?1 WHERE id = ?2";
const UPDATE_STEP_FAILED_SQL: &str = "UPDATE steps SET status = 'failed' WHERE id = ?1";
const SHIFT_STEP_ORDERS_SQL: &str =
    "UPDATE steps SET step_order = step_order + 1 WHERE plan_id = ?1 AND step_order > ?2";
const UPDATE_PLAN_ACTIVE_STEP_SQL: &str = "UPDATE plans SET active_step_id = ?1 WHERE id = ?2";

impl super::Database {
    /// Helper function to construct a Step from a database row
    pub(super) fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<Step> {
        let status_str: String = row.get(4)?;
        let status = status_str.parse::<StepStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("Invalid step status: {status_str}").into(),
            )
        })?;

        Ok(Step {
            id: row.get(0)?,
            plan_id: row.get(1)?,
            description: row.get(2)?,
            completion_condition: row.get(3)?,
            status,
            step_order: row.get::<_, i64>(5)? as u32,
            completion_context: row.get(6)?,
            created_at: row.get::<_, String>(7)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Creates a new step at the end of the plan's order.
    ///
    /// The first step ever created for a plan also becomes its active step;
    /// later creations leave the current active step untouched.
    pub fn create_step(
        &mut self,
        plan_id: &str,
        description: &str,
        completion_condition: &str,
        completion_context: Option<&str>,
    ) -> Result<Step> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let plan_exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id], |row| row.get(0))
            .db_context("Failed to check plan existence")?;

        if !plan_exists {
            return Err(StoreError::precondition(format!(
                "Plan {plan_id} does not exist"
            )));
        }

        let step_id = id::generate();
        tx.execute(
            INSERT_STEP_SQL,
            params![
                &step_id,
                plan_id,
                description,
                completion_condition,
                completion_context
            ],
        )
        .map_err(|e| StoreError::persistence("Failed to insert step", e))?;

        // The plan's first step becomes its active step
        let step_count: i64 = tx
            .query_row(COUNT_PLAN_STEPS_SQL, params![plan_id], |row| row.get(0))
            .db_context("Failed to count plan steps")?;

        if step_count == 1 {
            tx.execute(UPDATE_PLAN_ACTIVE_STEP_SQL, params![&step_id, plan_id])
                .db_context("Failed to set active step")?;
        }

        // Read back for the server-assigned creation timestamp
        let step = tx
            .query_row(SELECT_STEP_BY_ID_SQL, params![&step_id], Self::build_step_from_row)
            .optional()
            .map_err(|e| StoreError::decode("step", e))?
            .ok_or_else(|| StoreError::integrity(format!("Step {step_id} missing after insert")))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(step)
    }

    /// Returns the in-progress step of the plan with the lowest order, if any.
    pub fn get_active_step(&self, plan_id: &str) -> Result<Option<Step>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIVE_STEP_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![plan_id], Self::build_step_from_row)
            .optional()
            .map_err(|e| StoreError::decode("step", e))
    }

    /// Marks a step completed and advances the plan's active step.
    ///
    /// The active pointer moves to the in-progress step with the smallest
    /// order strictly greater than the completed step's, or to NULL when no
    /// such step exists. Returns that next step. Only an in-progress step
    /// may be completed.
    pub fn complete_step(
        &mut self,
        step_id: &str,
        completion_context: &str,
    ) -> Result<Option<Step>> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let (plan_id, step_order, status): (String, i64, String) = tx
            .query_row(SELECT_STEP_FOR_TRANSITION_SQL, params![step_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .optional()
            .map_err(|e| StoreError::decode("step", e))?
            .ok_or_else(|| {
                StoreError::precondition(format!("Step {step_id} does not exist"))
            })?;

        if status != StepStatus::InProgress.as_str() {
            return Err(StoreError::precondition(format!(
                "Step {step_id} is {status}; only an in-progress step can be completed"
            )));
        }

        tx.execute(UPDATE_STEP_COMPLETED_SQL, params![completion_context, step_id])
            .db_context("Failed to complete step")?;

        let next_step = tx
            .query_row(
                SELECT_NEXT_STEP_SQL,
                params![&plan_id, step_order],
                Self::build_step_from_row,
            )
            .optional()
            .map_err(|e| StoreError::decode("step", e))?;

        tx.execute(
            UPDATE_PLAN_ACTIVE_STEP_SQL,
            params![next_step.as_ref().map(|s| s.id.as_str()), &plan_id],
        )
        .db_context("Failed to update active step")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(next_step)
    }

    /// Marks the plan's active step failed and splices in a replacement.
    ///
    /// Only the active, in-progress step may be failed. The failed step
    /// keeps its order; every other step of the plan with a strictly
    /// greater order is shifted up by one, and the replacement is inserted
    /// into the gap at `failed.step_order + 1`, becoming the active step.
    /// Failed steps keep their historical position so listings present a
    /// stable causal ordering even after repeated failures.
    pub fn fail_step(
        &mut self,
        step_id: &str,
        new_description: &str,
        new_completion_condition: &str,
    ) -> Result<FailureOutcome> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let (plan_id, step_order, status, active_step_id): (String, i64, String, Option<String>) =
            tx.query_row(SELECT_STEP_WITH_ACTIVE_SQL, params![step_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .optional()
            .map_err(|e| StoreError::decode("step", e))?
            .ok_or_else(|| {
                StoreError::precondition(format!("Step {step_id} does not exist"))
            })?;

        if active_step_id.as_deref() != Some(step_id) {
            return Err(StoreError::precondition(format!(
                "Step {step_id} is not the active step of plan {plan_id}"
            )));
        }

        if status != StepStatus::InProgress.as_str() {
            return Err(StoreError::precondition(format!(
                "Step {step_id} is {status}; only an in-progress step can be failed"
            )));
        }

        // The failed step keeps its order and its (unset) completion context
        tx.execute(UPDATE_STEP_FAILED_SQL, params![step_id])
            .db_context("Failed to mark step failed")?;

        // Open a single-slot gap immediately after the failed step
        tx.execute(SHIFT_STEP_ORDERS_SQL, params![&plan_id, step_order])
            .db_context("Failed to shift step orders")?;

        let new_id = id::generate();
        tx.execute(
            INSERT_REPLACEMENT_STEP_SQL,
            params![
                &new_id,
                &plan_id,
                new_description,
                new_completion_condition,
                step_order + 1
            ],
        )
        .map_err(|e| StoreError::persistence("Failed to insert replacement step", e))?;

        tx.execute(UPDATE_PLAN_ACTIVE_STEP_SQL, params![&new_id, &plan_id])
            .db_context("Failed to update active step")?;

        let new_step = tx
            .query_row(SELECT_STEP_BY_ID_SQL, params![&new_id], Self::build_step_from_row)
            .optional()
            .map_err(|e| StoreError::decode("step", e))?
            .ok_or_else(|| StoreError::integrity(format!("Step {new_id} missing after insert")))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(FailureOutcome {
            failed_step_id: step_id.to_string(),
            new_step,
        })
    }

    /// Retrieves all steps for a plan in execution/history order.
    ///
    /// Includes completed and failed steps. Rows that fail to decode are
    /// skipped rather than failing the whole listing.
    pub fn list_steps(&self, plan_id: &str) -> Result<Vec<Step>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_BY_PLAN_SQL)
            .db_context("Failed to prepare query")?;

        let steps = stmt
            .query_map(params![plan_id], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .filter_map(|row| match row {
                Ok(step) => Some(step),
                Err(e) => {
                    warn!("Skipping malformed step row: {e}");
                    None
                }
            })
            .collect();

        Ok(steps)
    }
}
