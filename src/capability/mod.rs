//! Statement Classification and Read-Only Enforcement
//!
//! Every rendered statement passes through [`validate_statement`] before it
//! reaches the executor. Statements are classified by their leading keyword;
//! a client configured as read-only refuses anything that is not a read.
//!
//! # Validation Strategy
//! - Only the statement shapes this crate produces are recognized
//! - Unknown or empty statements are rejected, never guessed at

use crate::config::ClientConfig;
use crate::error::{ResmonError, Result};

/// Category of a rendered statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementCategory {
    /// SHOW, DESCRIBE
    Read,
    /// CREATE, ALTER, DROP
    Ddl,
}

/// Classify `sql` and check it against the client's capabilities
///
/// # Returns
/// * `Ok(category)` if the statement may be dispatched
/// * `Err(ResmonError::CapabilityViolation)` for DDL on a read-only client
/// * `Err(ResmonError::Validation)` for empty or unrecognized statements
pub fn validate_statement(sql: &str, config: &ClientConfig) -> Result<StatementCategory> {
    let category = categorize(sql)?;

    if config.read_only && category == StatementCategory::Ddl {
        return Err(ResmonError::capability_violation(format!(
            "client is read-only and cannot execute this statement:\n\n{sql}"
        )));
    }

    Ok(category)
}

/// Classify a statement by its leading keyword
pub fn categorize(sql: &str) -> Result<StatementCategory> {
    let leading = sql
        .split_whitespace()
        .next()
        .ok_or_else(|| ResmonError::validation("statement cannot be empty"))?
        .to_uppercase();

    match leading.as_str() {
        "SHOW" | "DESCRIBE" | "DESC" => Ok(StatementCategory::Read),
        "CREATE" | "ALTER" | "DROP" => Ok(StatementCategory::Ddl),
        _ => Err(ResmonError::validation(format!("unrecognized statement: {sql}"))),
    }
}
