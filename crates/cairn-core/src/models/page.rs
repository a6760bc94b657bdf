//! Paginated query results.

use serde::{Deserialize, Serialize};

/// One page of a listing plus the total row count for pagination math.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// The rows on this page
    pub items: Vec<T>,

    /// Total number of rows across all pages
    pub total: u64,
}
