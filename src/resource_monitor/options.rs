//! Option types for the resource monitor statements.
//!
//! Each type renders its statement through [`ToSql`] and checks its structural
//! invariants in `validate`. The two are kept apart: rendering never rejects a
//! combination of fields, validation never produces SQL.

use crate::error::{ResmonError, Result};
use crate::identifier::{valid_object_identifier, AccountObjectIdentifier};
use crate::sql::{ListStyle, Quotes, StatementBuilder, ToSql};

use super::types::{Frequency, NotifyUsers, TriggerDefinition};

/// Start keyword that must never be turned into a string literal
pub const IMMEDIATELY: &str = "IMMEDIATELY";

fn invalid_identifier(id: &AccountObjectIdentifier) -> ResmonError {
    ResmonError::validation(format!("invalid object identifier: {:?}", id.name()))
}

fn start_timestamp_quotes(value: Option<&str>) -> Quotes {
    match value {
        Some(value) if value.trim().eq_ignore_ascii_case(IMMEDIATELY) => Quotes::None,
        _ => Quotes::Single,
    }
}

/// `CREATE [OR REPLACE] RESOURCE MONITOR <name> WITH ...`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateResourceMonitorOptions {
    pub or_replace: Option<bool>,
    pub(crate) name: AccountObjectIdentifier,

    // optional, at least one
    pub credit_quota: Option<u64>,
    pub frequency: Option<Frequency>,
    pub start_timestamp: Option<String>,
    pub end_timestamp: Option<String>,
    pub notify_users: Option<NotifyUsers>,
    pub triggers: Option<Vec<TriggerDefinition>>,
}

impl CreateResourceMonitorOptions {
    /// Whether any field of the optional cluster is set
    #[must_use]
    pub fn has_parameters(&self) -> bool {
        self.credit_quota.is_some()
            || self.frequency.is_some()
            || self.start_timestamp.is_some()
            || self.end_timestamp.is_some()
            || self.notify_users.is_some()
            || self.triggers.is_some()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !valid_object_identifier(&self.name) {
            return Err(invalid_identifier(&self.name));
        }
        Ok(())
    }
}

impl ToSql for CreateResourceMonitorOptions {
    fn write_sql(&self, builder: &mut StatementBuilder) -> Result<()> {
        builder
            .static_keyword("CREATE")
            .keyword("OR REPLACE", self.or_replace)
            .static_keyword("RESOURCE MONITOR")
            .identifier(&self.name)
            .static_keyword("WITH");
        builder.parameter("CREDIT_QUOTA", self.credit_quota.as_ref(), Quotes::None)?;
        builder.parameter("FREQUENCY", self.frequency.as_ref(), Quotes::None)?;
        let start = self.start_timestamp.as_deref();
        builder.parameter("START_TIMESTAMP", start, start_timestamp_quotes(start))?;
        builder.parameter("END_TIMESTAMP", self.end_timestamp.as_deref(), Quotes::Single)?;
        builder.parameter("NOTIFY_USERS", self.notify_users.as_ref(), Quotes::None)?;
        builder.list(Some("TRIGGERS"), self.triggers.as_deref(), ListStyle::NO_COMMA)?;
        Ok(())
    }
}

/// `SET` clause of an alter statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceMonitorSet {
    // at least one
    pub credit_quota: Option<u64>,
    pub frequency: Option<Frequency>,
    pub start_timestamp: Option<String>,
    pub end_timestamp: Option<String>,
}

impl ResourceMonitorSet {
    /// Whether any field is set
    #[must_use]
    pub fn has_fields(&self) -> bool {
        self.credit_quota.is_some()
            || self.frequency.is_some()
            || self.start_timestamp.is_some()
            || self.end_timestamp.is_some()
    }

    /// At least one field is set; frequency and start timestamp come together
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.has_fields() {
            return Err(ResmonError::validation(
                "nothing to set: specify credit quota, frequency, start or end timestamp",
            ));
        }
        if self.frequency.is_some() != self.start_timestamp.is_some() {
            return Err(ResmonError::validation(
                "must specify frequency and start time together",
            ));
        }
        Ok(())
    }
}

impl ToSql for ResourceMonitorSet {
    fn write_sql(&self, builder: &mut StatementBuilder) -> Result<()> {
        builder.parameter("CREDIT_QUOTA", self.credit_quota.as_ref(), Quotes::None)?;
        builder.parameter("FREQUENCY", self.frequency.as_ref(), Quotes::None)?;
        builder.parameter("START_TIMESTAMP", self.start_timestamp.as_deref(), Quotes::None)?;
        builder.parameter("END_TIMESTAMP", self.end_timestamp.as_deref(), Quotes::None)?;
        Ok(())
    }
}

/// `ALTER RESOURCE MONITOR [IF EXISTS] <name> ...`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterResourceMonitorOptions {
    pub if_exists: Option<bool>,
    pub(crate) name: AccountObjectIdentifier,
    pub set: Option<ResourceMonitorSet>,
    pub notify_users: Option<NotifyUsers>,
    pub triggers: Option<Vec<TriggerDefinition>>,
}

impl AlterResourceMonitorOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if !valid_object_identifier(&self.name) {
            return Err(invalid_identifier(&self.name));
        }
        match &self.set {
            Some(set) => set.validate(),
            None => Ok(()),
        }
    }
}

impl ToSql for AlterResourceMonitorOptions {
    fn write_sql(&self, builder: &mut StatementBuilder) -> Result<()> {
        builder
            .static_keyword("ALTER")
            .static_keyword("RESOURCE MONITOR")
            .keyword("IF EXISTS", self.if_exists)
            .identifier(&self.name);
        builder.nested(Some("SET"), self.set.as_ref())?;
        builder.parameter("NOTIFY_USERS", self.notify_users.as_ref(), Quotes::None)?;
        builder.list(Some("TRIGGERS"), self.triggers.as_deref(), ListStyle::NO_COMMA)?;
        Ok(())
    }
}

/// `DROP RESOURCE MONITOR <name>`
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DropResourceMonitorOptions {
    pub(crate) name: AccountObjectIdentifier,
}

impl DropResourceMonitorOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if !valid_object_identifier(&self.name) {
            return Err(invalid_identifier(&self.name));
        }
        Ok(())
    }
}

impl ToSql for DropResourceMonitorOptions {
    fn write_sql(&self, builder: &mut StatementBuilder) -> Result<()> {
        builder.static_keyword("DROP").static_keyword("RESOURCE MONITOR").identifier(&self.name);
        Ok(())
    }
}

/// Name pattern filter, rendered `LIKE '<pattern>'`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Like {
    pub pattern: Option<String>,
}

impl Like {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
        }
    }
}

impl ToSql for Like {
    fn write_sql(&self, builder: &mut StatementBuilder) -> Result<()> {
        builder.keyword_value(Some("LIKE"), self.pattern.as_deref(), Quotes::Single)?;
        Ok(())
    }
}

/// `SHOW RESOURCE MONITORS [LIKE '<pattern>']`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowResourceMonitorOptions {
    pub like: Option<Like>,
}

impl ShowResourceMonitorOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl ToSql for ShowResourceMonitorOptions {
    fn write_sql(&self, builder: &mut StatementBuilder) -> Result<()> {
        builder.static_keyword("SHOW").static_keyword("RESOURCE MONITORS");
        builder.nested(None, self.like.as_ref())?;
        Ok(())
    }
}
