//! Object Identifiers
//!
//! Account-level objects (resource monitors among them) are addressed by a single
//! name. The fully-qualified form is always double-quoted so the name is taken
//! verbatim, with embedded double quotes doubled.

use serde::{Deserialize, Serialize};

/// Longest name accepted for a double-quoted identifier
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Kinds of objects addressed through an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    ResourceMonitor,
}

impl ObjectType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceMonitor => "RESOURCE MONITOR",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of an object that lives directly in the account
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The raw, unquoted name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Double-quoted form, suitable for embedding in a statement
    #[must_use]
    pub fn fully_qualified_name(&self) -> String {
        if self.name.is_empty() {
            return String::new();
        }
        format!("\"{}\"", self.name.replace('"', "\"\""))
    }

    /// Check the name against the double-quoted identifier rules
    ///
    /// A valid name is non-empty, at most [`MAX_IDENTIFIER_LENGTH`] characters and
    /// free of control characters.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let len = self.name.chars().count();
        len > 0 && len <= MAX_IDENTIFIER_LENGTH && !self.name.chars().any(char::is_control)
    }
}

impl std::fmt::Display for AccountObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fully_qualified_name())
    }
}

impl From<&str> for AccountObjectIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Predicate shared by every option validator
#[must_use]
pub fn valid_object_identifier(id: &AccountObjectIdentifier) -> bool {
    id.is_valid()
}
