//! Database operations and SQLite management for plans and steps.
//!
//! This module provides the low-level persistence layer of the cairn plan
//! store. It handles SQLite connections, schema management, and the
//! transactional plan/step lifecycle operations. All invariants are enforced
//! here; callers never touch rows directly.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;
pub mod step_queries;

/// How long a contended transaction waits before failing with a busy error
/// instead of hanging.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
