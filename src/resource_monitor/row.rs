//! Decoding of `SHOW RESOURCE MONITORS` rows.
//!
//! Rows arrive loosely typed: every column may be missing or `null`, numbers are
//! usually reported as text, and the three trigger columns pack their thresholds
//! as comma-separated `<n>%` tokens. Decoding is all-or-nothing per row.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::engine::Row;
use crate::error::{ResmonError, Result};

use super::types::{Frequency, ResourceMonitor, TriggerAction, TriggerDefinition};

const THRESHOLD_SUFFIX: char = '%';
const NOTIFY_USERS_SEPARATOR: &str = ", ";
const ACCOUNT_LEVEL: &str = "ACCOUNT";

/// Raw column values of one result row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceMonitorRow {
    pub name: String,
    pub credit_quota: Option<String>,
    pub used_credits: Option<String>,
    pub remaining_credits: Option<String>,
    pub level: Option<String>,
    pub frequency: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notify_at: Option<String>,
    pub suspend_at: Option<String>,
    pub suspend_immediately_at: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub notify_users: Option<String>,
}

impl ResourceMonitorRow {
    /// Pull the known columns out of a result row
    ///
    /// Column names are matched case-insensitively. Unknown columns are ignored.
    pub fn from_row(row: &Row) -> Result<Self> {
        let name = text_column(row, "name")?
            .ok_or_else(|| ResmonError::decode("column name is missing or null"))?;

        Ok(Self {
            name,
            credit_quota: text_column(row, "credit_quota")?,
            used_credits: text_column(row, "used_credits")?,
            remaining_credits: text_column(row, "remaining_credits")?,
            level: text_column(row, "level")?,
            frequency: text_column(row, "frequency")?,
            start_time: text_column(row, "start_time")?,
            end_time: text_column(row, "end_time")?,
            notify_at: text_column(row, "notify_at")?,
            suspend_at: text_column(row, "suspend_at")?,
            suspend_immediately_at: text_column(row, "suspend_immediately_at")?,
            owner: text_column(row, "owner")?,
            comment: text_column(row, "comment")?,
            notify_users: text_column(row, "notify_users")?,
        })
    }

    pub fn to_resource_monitor(&self) -> Result<ResourceMonitor> {
        Ok(ResourceMonitor {
            name: self.name.clone(),
            credit_quota: parse_decimal("credit_quota", self.credit_quota.as_deref())?,
            used_credits: parse_decimal("used_credits", self.used_credits.as_deref())?,
            remaining_credits: parse_decimal(
                "remaining_credits",
                self.remaining_credits.as_deref(),
            )?,
            frequency: self.frequency.as_deref().map(str::parse::<Frequency>).transpose()?,
            start_time: parse_timestamp("start_time", self.start_time.as_deref())?,
            end_time: parse_timestamp("end_time", self.end_time.as_deref())?,
            suspend_triggers: extract_triggers(self.suspend_at.as_deref(), TriggerAction::Suspend)?,
            suspend_immediate_triggers: extract_triggers(
                self.suspend_immediately_at.as_deref(),
                TriggerAction::SuspendImmediate,
            )?,
            notify_triggers: extract_triggers(self.notify_at.as_deref(), TriggerAction::Notify)?,
            set_for_account: self.level.as_deref() == Some(ACCOUNT_LEVEL),
            owner: self.owner.clone(),
            comment: self.comment.clone(),
            notify_users: extract_users(self.notify_users.as_deref()),
        })
    }
}

/// Decode one result row into a [`ResourceMonitor`]
pub fn decode_row(row: &Row) -> Result<ResourceMonitor> {
    ResourceMonitorRow::from_row(row)?.to_resource_monitor()
}

fn text_column(row: &Row, column: &str) -> Result<Option<String>> {
    let value = row.get(column).or_else(|| {
        row.iter().find(|(key, _)| key.eq_ignore_ascii_case(column)).map(|(_, value)| value)
    });

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => {
            Err(ResmonError::decode(format!("column {column} holds a non-scalar value: {other}")))
        }
    }
}

fn parse_decimal(column: &str, text: Option<&str>) -> Result<Option<f64>> {
    let Some(text) = text else {
        return Ok(None);
    };
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ResmonError::decode(format!("column {column}: {text:?} is not a number"))),
    }
}

fn parse_timestamp(column: &str, text: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    let Some(text) = text else {
        return Ok(None);
    };
    let trimmed = text.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    if let Ok(ts) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(Some(naive.and_utc()));
    }

    Err(ResmonError::decode(format!("column {column}: {text:?} is not a timestamp")))
}

/// Split a trigger column (`"50%,100%"`) into definitions tagged with `action`
///
/// A null or blank column yields no triggers.
pub fn extract_triggers(
    column: Option<&str>,
    action: TriggerAction,
) -> Result<Vec<TriggerDefinition>> {
    let Some(column) = column.filter(|c| !c.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    column
        .split(',')
        .map(|token| -> Result<TriggerDefinition> {
            let threshold = token
                .trim()
                .strip_suffix(THRESHOLD_SUFFIX)
                .and_then(|digits| digits.parse::<u32>().ok())
                .ok_or_else(|| {
                    ResmonError::decode(format!(
                        "failed to convert {token:?} to a {} threshold",
                        action.as_str()
                    ))
                })?;
            Ok(TriggerDefinition::new(threshold, action))
        })
        .collect()
}

/// Inverse of [`extract_triggers`]: `"50%,100%"`
#[must_use]
pub fn encode_trigger_column(triggers: &[TriggerDefinition]) -> String {
    triggers
        .iter()
        .map(|trigger| format!("{}{THRESHOLD_SUFFIX}", trigger.threshold))
        .collect::<Vec<_>>()
        .join(",")
}

fn extract_users(column: Option<&str>) -> Vec<String> {
    match column {
        Some(users) if !users.is_empty() => {
            users.split(NOTIFY_USERS_SEPARATOR).map(str::to_string).collect()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn row(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    fn full_row() -> Row {
        row(json!({
            "name": "MONITOR_1",
            "credit_quota": "100.00",
            "used_credits": "12.5",
            "remaining_credits": "87.5",
            "level": "ACCOUNT",
            "frequency": "monthly",
            "start_time": "2024-01-01T00:00:00Z",
            "end_time": "2024-12-31 23:59:59.000 -0800",
            "notify_at": "80%,90%",
            "suspend_at": "100%",
            "suspend_immediately_at": "110%",
            "owner": "ACCOUNTADMIN",
            "comment": "team budget",
            "notify_users": "ALICE, BOB"
        }))
    }

    #[test]
    fn test_decode_full_row() {
        let monitor = decode_row(&full_row()).unwrap();

        assert_eq!(monitor.name, "MONITOR_1");
        assert_eq!(monitor.credit_quota, Some(100.0));
        assert_eq!(monitor.used_credits, Some(12.5));
        assert_eq!(monitor.remaining_credits, Some(87.5));
        assert_eq!(monitor.frequency, Some(Frequency::Monthly));
        assert_eq!(monitor.start_time, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(monitor.end_time, Some(Utc.with_ymd_and_hms(2025, 1, 1, 7, 59, 59).unwrap()));
        assert_eq!(
            monitor.notify_triggers,
            vec![
                TriggerDefinition::new(80, TriggerAction::Notify),
                TriggerDefinition::new(90, TriggerAction::Notify),
            ]
        );
        assert_eq!(
            monitor.suspend_triggers,
            vec![TriggerDefinition::new(100, TriggerAction::Suspend)]
        );
        assert_eq!(
            monitor.suspend_immediate_triggers,
            vec![TriggerDefinition::new(110, TriggerAction::SuspendImmediate)]
        );
        assert!(monitor.set_for_account);
        assert_eq!(monitor.owner.as_deref(), Some("ACCOUNTADMIN"));
        assert_eq!(monitor.comment.as_deref(), Some("team budget"));
        assert_eq!(monitor.notify_users, vec!["ALICE", "BOB"]);
    }

    #[test]
    fn test_decode_minimal_row() {
        let monitor = decode_row(&row(json!({"name": "M", "level": null}))).unwrap();
        assert_eq!(monitor.name, "M");
        assert!(monitor.credit_quota.is_none());
        assert!(monitor.frequency.is_none());
        assert!(monitor.start_time.is_none());
        assert!(monitor.suspend_triggers.is_empty());
        assert!(monitor.notify_triggers.is_empty());
        assert!(!monitor.set_for_account);
        assert!(monitor.comment.is_none());
        assert!(monitor.notify_users.is_empty());
    }

    #[test]
    fn test_missing_name_is_decode_error() {
        let err = decode_row(&row(json!({"credit_quota": "1"}))).unwrap_err();
        assert!(matches!(err, ResmonError::Decode(_)));
    }

    #[test]
    fn test_column_names_are_case_insensitive() {
        let monitor = decode_row(&row(json!({"NAME": "M", "CREDIT_QUOTA": 5}))).unwrap();
        assert_eq!(monitor.name, "M");
        assert_eq!(monitor.credit_quota, Some(5.0));
    }

    #[test]
    fn test_non_numeric_credit_quota() {
        let err = decode_row(&row(json!({"name": "M", "credit_quota": "lots"}))).unwrap_err();
        assert!(matches!(err, ResmonError::Decode(_)));
        assert!(err.message().contains("credit_quota"));

        let err = decode_row(&row(json!({"name": "M", "credit_quota": "NaN"}))).unwrap_err();
        assert!(matches!(err, ResmonError::Decode(_)));
    }

    #[test]
    fn test_unknown_frequency() {
        let err = decode_row(&row(json!({"name": "M", "frequency": "FORTNIGHTLY"}))).unwrap_err();
        assert!(matches!(
            err,
            ResmonError::InvalidEnum { kind: "frequency", ref value } if value == "FORTNIGHTLY"
        ));
    }

    #[test]
    fn test_malformed_timestamp() {
        let err = decode_row(&row(json!({"name": "M", "start_time": "yesterday"}))).unwrap_err();
        assert!(matches!(err, ResmonError::Decode(_)));
        assert!(err.message().contains("start_time"));
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        let monitor =
            decode_row(&row(json!({"name": "M", "start_time": "2024-03-01 12:30:00"}))).unwrap();
        assert_eq!(monitor.start_time, Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()));
    }

    #[test]
    fn test_malformed_trigger_token() {
        let err = extract_triggers(Some("50%,ninety%"), TriggerAction::Notify).unwrap_err();
        assert!(matches!(err, ResmonError::Decode(_)));
        assert!(err.message().contains("ninety%"));

        let err = extract_triggers(Some("50"), TriggerAction::Suspend).unwrap_err();
        assert!(err.message().contains("\"50\""));
    }

    #[test]
    fn test_blank_trigger_column_is_empty() {
        assert!(extract_triggers(None, TriggerAction::Notify).unwrap().is_empty());
        assert!(extract_triggers(Some(""), TriggerAction::Notify).unwrap().is_empty());
    }

    #[test]
    fn test_trigger_column_round_trip() {
        for action in [
            TriggerAction::Suspend,
            TriggerAction::SuspendImmediate,
            TriggerAction::Notify,
        ] {
            let triggers: Vec<_> =
                (0..=100).step_by(5).map(|t| TriggerDefinition::new(t, action)).collect();
            let column = encode_trigger_column(&triggers);
            assert_eq!(extract_triggers(Some(column.as_str()), action).unwrap(), triggers);
        }
        assert_eq!(
            encode_trigger_column(&[
                TriggerDefinition::new(50, TriggerAction::Notify),
                TriggerDefinition::new(100, TriggerAction::Notify),
            ]),
            "50%,100%"
        );
    }

    #[test]
    fn test_notify_users() {
        assert_eq!(extract_users(Some("A, B, C")), vec!["A", "B", "C"]);
        assert_eq!(extract_users(Some("SOLO")), vec!["SOLO"]);
        assert!(extract_users(Some("")).is_empty());
        assert!(extract_users(None).is_empty());
    }

    #[test]
    fn test_level_other_than_account() {
        let monitor = decode_row(&row(json!({"name": "M", "level": "WAREHOUSE"}))).unwrap();
        assert!(!monitor.set_for_account);
        let monitor = decode_row(&row(json!({"name": "M", "level": "account"}))).unwrap();
        assert!(!monitor.set_for_account);
    }
}
