//! Executor Trait and Core Types
//!
//! The network transport is not part of this crate. Anything able to run a
//! statement against the account implements [`Executor`]; the façade only ever
//! talks to that trait.
//!
//! # Cancellation
//! Executor methods return futures. Dropping a future cancels the call, and
//! callers wanting a deadline wrap it (for example with `tokio::time::timeout`).
//! Nothing in this crate retries.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::error::Result;

pub mod recording;

pub use recording::RecordingExecutor;

/// One result row: column name to loosely-typed value
pub type Row = HashMap<String, serde_json::Value>;

/// Query execution result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names in result set
    pub columns: Vec<String>,

    /// Result rows (each row is a map of column name to value)
    pub rows: Vec<Row>,

    /// Number of rows affected (for statements executed through `exec`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_affected: Option<u64>,
}

impl QueryResult {
    /// Build a result from rows; columns are the sorted union of row keys
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let columns: BTreeSet<&String> = rows.iter().flat_map(HashMap::keys).collect();
        let columns = columns.into_iter().cloned().collect();
        Self {
            columns,
            rows,
            rows_affected: None,
        }
    }
}

/// Transport collaborator
///
/// Implementations send statement text as-is and report failures as
/// [`ResmonError::Transport`](crate::ResmonError::Transport).
pub trait Executor {
    /// Run a statement that returns no rows; resolves to the rows-affected count
    fn exec(&self, sql: &str) -> impl std::future::Future<Output = Result<u64>> + Send;

    /// Run a statement that returns rows
    fn query(&self, sql: &str) -> impl std::future::Future<Output = Result<QueryResult>> + Send;
}
