//! In-process executor that records statements instead of sending them.
//!
//! Backs the CLI's dry-run output and the crate's tests. Query results are
//! served from a queue primed by the caller; an empty queue yields an empty
//! result set.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::engine::{Executor, QueryResult};
use crate::error::{ResmonError, Result};

#[derive(Debug, Default)]
pub struct RecordingExecutor {
    statements: Mutex<Vec<String>>,
    results: Mutex<VecDeque<QueryResult>>,
    failure: Mutex<Option<String>>,
    rows_affected: u64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count reported by every `exec` call
    #[must_use]
    pub fn with_rows_affected(mut self, rows_affected: u64) -> Self {
        self.rows_affected = rows_affected;
        self
    }

    /// Queue a result for the next `query` call
    pub fn push_result(&self, result: QueryResult) {
        lock(&self.results).push_back(result);
    }

    /// Make the next call fail with a transport error
    pub fn fail_next(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    /// Every statement received so far, in order
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        lock(&self.statements).clone()
    }

    #[must_use]
    pub fn last_statement(&self) -> Option<String> {
        lock(&self.statements).last().cloned()
    }

    fn record(&self, sql: &str) -> Result<()> {
        lock(&self.statements).push(sql.to_string());
        match lock(&self.failure).take() {
            Some(message) => Err(ResmonError::transport(message)),
            None => Ok(()),
        }
    }
}

impl Executor for RecordingExecutor {
    async fn exec(&self, sql: &str) -> Result<u64> {
        self.record(sql)?;
        Ok(self.rows_affected)
    }

    async fn query(&self, sql: &str) -> Result<QueryResult> {
        self.record(sql)?;
        Ok(lock(&self.results).pop_front().unwrap_or_default())
    }
}
