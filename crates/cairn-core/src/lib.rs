//! Core library for the cairn plan store.
//!
//! This crate tracks multi-step execution plans for an autonomous agent. A
//! plan owns an ordered sequence of steps; exactly one step is active at a
//! time. Steps complete, fail (which splices a replacement step into the
//! order), or remain pending. The store owns both persisted collections and
//! enforces all invariants itself, executing every multi-statement
//! operation inside a single transaction.
//!
//! # Quick Start
//!
//! ```rust
//! use cairn_core::{PlanStoreBuilder, params::CreatePlan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PlanStoreBuilder::new()
//!     .with_database_path(Some("plans.db"))
//!     .build()
//!     .await?;
//!
//! let plan = store
//!     .create_plan(&CreatePlan {
//!         name: "My Project".to_string(),
//!         description: "A test project".to_string(),
//!     })
//!     .await?;
//! println!("Created plan {}", plan.id);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod error;
pub mod id;
pub mod models;
pub mod params;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use error::{Result, StoreError};
pub use models::{FailureOutcome, Page, Plan, Step, StepStatus};
pub use params::{CompleteStep, CreatePlan, FailStep, Id, ListPlans, StepCreate};
pub use store::{PlanStore, PlanStoreBuilder};
