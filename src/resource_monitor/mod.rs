//! Resource Monitor Operations
//!
//! Create, alter, drop and list resource monitors. Every operation injects the
//! target identifier into its options, validates them, renders the statement
//! and hands it to the client. Validation failures return before anything is
//! sent.

use tracing::{debug, info, warn};

use crate::client::Client;
use crate::engine::Executor;
use crate::error::{ResmonError, Result};
use crate::identifier::AccountObjectIdentifier;
use crate::sql::ToSql;

pub mod options;
pub mod row;
pub mod types;

pub use options::{
    AlterResourceMonitorOptions, CreateResourceMonitorOptions, Like, ResourceMonitorSet,
    ShowResourceMonitorOptions,
};
pub use row::{decode_row, encode_trigger_column, extract_triggers, ResourceMonitorRow};
pub use types::{
    Frequency, NotifiedUser, NotifyUsers, ResourceMonitor, TriggerAction, TriggerDefinition,
};

use options::DropResourceMonitorOptions;

/// Resource monitor operations bound to a client
#[derive(Debug)]
pub struct ResourceMonitors<'a, E> {
    client: &'a Client<E>,
}

impl<'a, E: Executor> ResourceMonitors<'a, E> {
    pub(crate) fn new(client: &'a Client<E>) -> Self {
        Self { client }
    }

    /// Create a resource monitor
    ///
    /// With no optional parameter set the statement ends in a bare `WITH`.
    /// `or_replace` is honored in that case too, so `CREATE OR REPLACE ... WITH`
    /// replaces an existing monitor with one that has no quota or triggers.
    pub async fn create(
        &self,
        id: &AccountObjectIdentifier,
        mut opts: CreateResourceMonitorOptions,
    ) -> Result<()> {
        opts.name = id.clone();
        opts.validate()?;
        debug!(with_parameters = opts.has_parameters(), "rendering create statement");
        let sql = opts.to_sql()?;
        self.client.exec(&sql).await?;
        info!(monitor = id.name(), "created resource monitor");
        Ok(())
    }

    /// Modify an existing resource monitor
    pub async fn alter(
        &self,
        id: &AccountObjectIdentifier,
        mut opts: AlterResourceMonitorOptions,
    ) -> Result<()> {
        opts.name = id.clone();
        opts.validate()?;
        let sql = opts.to_sql()?;
        self.client.exec(&sql).await?;
        info!(monitor = id.name(), "altered resource monitor");
        Ok(())
    }

    /// Remove a resource monitor
    pub async fn drop(&self, id: &AccountObjectIdentifier) -> Result<()> {
        let opts = DropResourceMonitorOptions { name: id.clone() };
        opts.validate()?;
        let sql = opts.to_sql()?;
        self.client.exec(&sql).await?;
        info!(monitor = id.name(), "dropped resource monitor");
        Ok(())
    }

    /// List resource monitors
    ///
    /// A single undecodable row fails the whole call.
    pub async fn show(&self, opts: ShowResourceMonitorOptions) -> Result<Vec<ResourceMonitor>> {
        opts.validate()?;
        let sql = opts.to_sql()?;
        let result = self.client.query(&sql).await?;

        result
            .rows
            .iter()
            .map(|row| {
                decode_row(row).map_err(|e| {
                    warn!(error = %e, "failed to decode resource monitor row");
                    e
                })
            })
            .collect()
    }

    /// Fetch one resource monitor by exact name
    ///
    /// `LIKE` narrows the listing but is only a pattern match; the result is the
    /// entry whose name equals the identifier's name exactly.
    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<ResourceMonitor> {
        let monitors = self
            .show(ShowResourceMonitorOptions {
                like: Some(Like::new(id.name())),
            })
            .await?;

        monitors.into_iter().find(|monitor| monitor.name == id.name()).ok_or_else(|| {
            warn!(monitor = id.name(), "no resource monitor matched exactly");
            ResmonError::not_found(id.fully_qualified_name())
        })
    }
}
