//! High-level async store API for plans and steps.
//!
//! [`PlanStore`] is the interface the tool-dispatch layer talks to. It is
//! constructed once with its storage location via [`PlanStoreBuilder`] and
//! passed by reference to all callers; there is no ambient or global
//! connection. Each operation runs the corresponding [`crate::db::Database`]
//! call on the blocking thread pool, so the transactional guarantees of the
//! persistence layer carry over unchanged to async callers.
//!
//! # Quick Start
//!
//! ```rust
//! use cairn_core::{PlanStoreBuilder, params::{CreatePlan, StepCreate}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PlanStoreBuilder::new()
//!     .with_database_path(Some("plans.db"))
//!     .build()
//!     .await?;
//!
//! let plan = store
//!     .create_plan(&CreatePlan {
//!         name: "Ship the importer".to_string(),
//!         description: "Land the CSV importer behind a flag".to_string(),
//!     })
//!     .await?;
//!
//! let step = store
//!     .create_step(&StepCreate {
//!         plan_id: plan.id.clone(),
//!         description: "Write the parser".to_string(),
//!         completion_condition: "Fixtures round-trip".to_string(),
//!         completion_context: None,
//!     })
//!     .await?;
//!
//! // The first step of a plan becomes its active step
//! assert_eq!(store.get_active_step(&plan.id).await?.map(|s| s.id), Some(step.id));
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod builder;
pub mod plan_ops;
pub mod step_ops;


pub use builder::PlanStoreBuilder;

/// Main store interface for plan and step lifecycle operations.
pub struct PlanStore {
    pub(crate) db_path: PathBuf,
}

impl PlanStore {
    /// Creates a new store with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}
