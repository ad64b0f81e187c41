//! Resource monitor domain types shared by the option builders and the row decoder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ResmonError, Result};
use crate::identifier::{AccountObjectIdentifier, ObjectType};
use crate::sql::{render_list, ListStyle, Quotes, SqlValue, StatementBuilder, ToSql};

/// Reset interval of a monitor's used credits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Monthly,
    Daily,
    Weekly,
    Yearly,
    Never,
}

impl Frequency {
    pub const ALL: [Self; 5] =
        [Self::Monthly, Self::Daily, Self::Weekly, Self::Yearly, Self::Never];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "MONTHLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Yearly => "YEARLY",
            Self::Never => "NEVER",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = ResmonError;

    /// Case-insensitive lookup; unknown text yields [`ResmonError::InvalidEnum`]
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == normalized)
            .ok_or_else(|| ResmonError::invalid_enum("frequency", s))
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SqlValue for Frequency {
    fn sql_text(&self) -> Result<String> {
        Ok(self.as_str().to_string())
    }
}

/// What happens when a trigger's threshold is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerAction {
    Suspend,
    SuspendImmediate,
    Notify,
}

impl TriggerAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Suspend => "SUSPEND",
            Self::SuspendImmediate => "SUSPEND_IMMEDIATE",
            Self::Notify => "NOTIFY",
        }
    }
}

impl std::str::FromStr for TriggerAction {
    type Err = ResmonError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "SUSPEND" => Ok(Self::Suspend),
            "SUSPEND_IMMEDIATE" => Ok(Self::SuspendImmediate),
            "NOTIFY" => Ok(Self::Notify),
            _ => Err(ResmonError::invalid_enum("trigger action", s)),
        }
    }
}

impl std::fmt::Display for TriggerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SqlValue for TriggerAction {
    fn sql_text(&self) -> Result<String> {
        Ok(self.as_str().to_string())
    }
}

/// A credit-usage threshold (percent of quota) and the action it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerDefinition {
    pub threshold: u32,
    pub action: TriggerAction,
}

impl TriggerDefinition {
    #[must_use]
    pub const fn new(threshold: u32, action: TriggerAction) -> Self {
        Self { threshold, action }
    }
}

impl ToSql for TriggerDefinition {
    fn write_sql(&self, builder: &mut StatementBuilder) -> Result<()> {
        builder.static_keyword("ON");
        builder.keyword_value(None, Some(&self.threshold), Quotes::None)?;
        builder.static_keyword("PERCENT").static_keyword("DO");
        builder.keyword_value(None, Some(&self.action), Quotes::None)?;
        Ok(())
    }
}

/// A user that receives notification triggers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifiedUser {
    pub name: String,
}

impl ToSql for NotifiedUser {
    fn write_sql(&self, builder: &mut StatementBuilder) -> Result<()> {
        builder.keyword_value(None, Some(&self.name), Quotes::Double)?;
        Ok(())
    }
}

/// Users notified by the monitor's NOTIFY triggers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyUsers {
    pub users: Vec<NotifiedUser>,
}

impl NotifyUsers {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: names.into_iter().map(|name| NotifiedUser { name: name.into() }).collect(),
        }
    }
}

impl SqlValue for NotifyUsers {
    fn sql_text(&self) -> Result<String> {
        render_list(&self.users, ListStyle::PARENTHESES_COMMA)
    }
}

/// Snapshot of a resource monitor as reported by `SHOW RESOURCE MONITORS`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceMonitor {
    pub name: String,
    pub credit_quota: Option<f64>,
    pub used_credits: Option<f64>,
    pub remaining_credits: Option<f64>,
    pub frequency: Option<Frequency>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub suspend_triggers: Vec<TriggerDefinition>,
    pub suspend_immediate_triggers: Vec<TriggerDefinition>,
    pub notify_triggers: Vec<TriggerDefinition>,
    pub set_for_account: bool,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub notify_users: Vec<String>,
}

impl ResourceMonitor {
    #[must_use]
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.name.clone())
    }

    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        ObjectType::ResourceMonitor
    }
}
