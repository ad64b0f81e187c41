//! Statement Builder
//!
//! Turns option values into a single SQL statement, fragment by fragment.
//! Every option type implements [`ToSql`] by calling the builder's fragment
//! operations in the order its fields appear in the statement:
//!
//! - [`StatementBuilder::static_keyword`] - fixed verb or object-type phrase
//! - [`StatementBuilder::keyword`] - phrase switched on by a boolean flag
//! - [`StatementBuilder::keyword_value`] - optional value, optionally preceded by a tag
//! - [`StatementBuilder::parameter`] - `TAG = value`
//! - [`StatementBuilder::identifier`] - fully-qualified object name
//! - [`StatementBuilder::nested`] - a sub-object's fragments, inlined
//! - [`StatementBuilder::list`] - a sequence of sub-objects
//!
//! Absent values contribute no fragment at all, so the joined statement never
//! carries doubled or trailing whitespace.
//!
//! The builder only encodes quoting rules. It does not sanitize free text.

use crate::error::{ResmonError, Result};
use crate::identifier::AccountObjectIdentifier;

/// Quoting applied to a rendered value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quotes {
    #[default]
    None,
    /// SQL string literal, embedded single quotes are doubled
    Single,
    /// Quoted name, embedded double quotes are rejected
    Double,
}

impl Quotes {
    fn wrap(self, text: &str) -> Result<String> {
        match self {
            Self::None => Ok(text.to_string()),
            Self::Single => Ok(format!("'{}'", text.replace('\'', "''"))),
            Self::Double => {
                if text.contains('"') {
                    return Err(ResmonError::render(format!(
                        "value {text} cannot be double-quoted"
                    )));
                }
                Ok(format!("\"{text}\""))
            }
        }
    }
}

/// How list elements are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Comma,
    Space,
}

/// Rendering style of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyle {
    pub separator: Separator,
    pub parentheses: bool,
}

impl ListStyle {
    /// Elements separated by spaces, no enclosing parentheses
    pub const NO_COMMA: Self = Self {
        separator: Separator::Space,
        parentheses: false,
    };

    /// `(a, b, c)`
    pub const PARENTHESES_COMMA: Self = Self {
        separator: Separator::Comma,
        parentheses: true,
    };

    const fn joiner(self) -> &'static str {
        match self.separator {
            Separator::Comma => ", ",
            Separator::Space => " ",
        }
    }
}

/// A leaf value with a textual SQL form
pub trait SqlValue {
    fn sql_text(&self) -> Result<String>;
}

impl SqlValue for str {
    fn sql_text(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl SqlValue for String {
    fn sql_text(&self) -> Result<String> {
        Ok(self.clone())
    }
}

macro_rules! impl_sql_value_for_integers {
    ($($ty:ty),*) => {
        $(
            impl SqlValue for $ty {
                fn sql_text(&self) -> Result<String> {
                    Ok(self.to_string())
                }
            }
        )*
    };
}

impl_sql_value_for_integers!(u32, u64, i32, i64);

/// A value that renders as a sequence of statement fragments
pub trait ToSql {
    fn write_sql(&self, builder: &mut StatementBuilder) -> Result<()>;

    /// Render this value alone as a complete statement
    fn to_sql(&self) -> Result<String> {
        let mut builder = StatementBuilder::new();
        self.write_sql(&mut builder)?;
        Ok(builder.finish())
    }
}

/// Render a sequence of values into one fragment
pub fn render_list<T: ToSql>(items: &[T], style: ListStyle) -> Result<String> {
    let rendered = items.iter().map(ToSql::to_sql).collect::<Result<Vec<_>>>()?;
    let joined = rendered.join(style.joiner());
    if style.parentheses {
        Ok(format!("({joined})"))
    } else {
        Ok(joined)
    }
}

/// Accumulates statement fragments
#[derive(Debug, Default)]
pub struct StatementBuilder {
    fragments: Vec<String>,
}

impl StatementBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, fragment: impl Into<String>) {
        let fragment = fragment.into();
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
    }

    /// Emit a fixed keyword unconditionally
    pub fn static_keyword(&mut self, keyword: &str) -> &mut Self {
        self.push(keyword);
        self
    }

    /// Emit `keyword` only when the flag is set to true
    pub fn keyword(&mut self, keyword: &str, flag: Option<bool>) -> &mut Self {
        if flag == Some(true) {
            self.push(keyword);
        }
        self
    }

    /// Emit `[tag] value` when the value is present and renders to non-empty text
    pub fn keyword_value<V: SqlValue + ?Sized>(
        &mut self,
        tag: Option<&str>,
        value: Option<&V>,
        quotes: Quotes,
    ) -> Result<&mut Self> {
        let Some(value) = value else {
            return Ok(self);
        };
        let text = value.sql_text()?;
        if text.is_empty() {
            return Ok(self);
        }
        if let Some(tag) = tag {
            self.push(tag);
        }
        self.push(quotes.wrap(&text)?);
        Ok(self)
    }

    /// Emit `TAG = value` when the value is present
    ///
    /// A present value that renders to empty text is an error: the statement would
    /// otherwise end up with a dangling `TAG =`.
    pub fn parameter<V: SqlValue + ?Sized>(
        &mut self,
        tag: &str,
        value: Option<&V>,
        quotes: Quotes,
    ) -> Result<&mut Self> {
        let Some(value) = value else {
            return Ok(self);
        };
        let text = value.sql_text()?;
        if text.is_empty() {
            return Err(ResmonError::render(format!("parameter {tag} has an empty value")));
        }
        self.push(format!("{tag} = {}", quotes.wrap(&text)?));
        Ok(self)
    }

    /// Emit the fully-qualified form of an identifier; an empty name emits nothing
    pub fn identifier(&mut self, id: &AccountObjectIdentifier) -> &mut Self {
        self.push(id.fully_qualified_name());
        self
    }

    /// Inline the fragments of a sub-object, preceded by `tag`
    pub fn nested<T: ToSql + ?Sized>(
        &mut self,
        tag: Option<&str>,
        value: Option<&T>,
    ) -> Result<&mut Self> {
        let Some(value) = value else {
            return Ok(self);
        };
        if let Some(tag) = tag {
            self.push(tag);
        }
        value.write_sql(self)?;
        Ok(self)
    }

    /// Emit `[tag] item item ...` (or the comma/parenthesized form); skipped when
    /// the list is absent or empty
    pub fn list<T: ToSql>(
        &mut self,
        tag: Option<&str>,
        items: Option<&[T]>,
        style: ListStyle,
    ) -> Result<&mut Self> {
        let Some(items) = items.filter(|items| !items.is_empty()) else {
            return Ok(self);
        };
        let rendered = render_list(items, style)?;
        if let Some(tag) = tag {
            self.push(tag);
        }
        self.push(rendered);
        Ok(self)
    }

    /// Join all fragments with single spaces
    #[must_use]
    pub fn finish(self) -> String {
        self.fragments.join(" ")
    }
}
