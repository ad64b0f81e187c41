//! Client
//!
//! Owns the executor and the configuration, and is the single dispatch point
//! for every statement: each one is classified by the capability gate and
//! logged before it is handed to the executor.

use tracing::debug;

use crate::capability::validate_statement;
use crate::config::ClientConfig;
use crate::engine::{Executor, QueryResult};
use crate::error::Result;
use crate::resource_monitor::ResourceMonitors;

/// Entry point for all object operations
#[derive(Debug)]
pub struct Client<E> {
    executor: E,
    config: ClientConfig,
}

impl<E: Executor> Client<E> {
    /// Create a client with the default (read-write) configuration
    pub fn new(executor: E) -> Self {
        Self::with_config(executor, ClientConfig::default())
    }

    pub fn with_config(executor: E, config: ClientConfig) -> Self {
        Self { executor, config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Resource monitor operations
    #[must_use]
    pub fn resource_monitors(&self) -> ResourceMonitors<'_, E> {
        ResourceMonitors::new(self)
    }

    pub(crate) async fn exec(&self, sql: &str) -> Result<u64> {
        let category = validate_statement(sql, &self.config)?;
        debug!(statement = sql, ?category, "executing statement");
        self.executor.exec(sql).await
    }

    pub(crate) async fn query(&self, sql: &str) -> Result<QueryResult> {
        let category = validate_statement(sql, &self.config)?;
        debug!(statement = sql, ?category, "running query");
        let result = self.executor.query(sql).await?;
        debug!(rows = result.rows.len(), "query returned");
        Ok(result)
    }
}
