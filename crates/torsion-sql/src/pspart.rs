//! SQL fragments paired with their placeholder replacements.

use crate::value::Value;

/// A SQL text fragment bundled with the ordered values that bind to its
/// `?` placeholders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreparedStatementPart {
    sql: String,
    replacements: Vec<Value>,
}

impl PreparedStatementPart {
    /// Creates a part from SQL text and its replacements.
    #[must_use]
    pub fn new(sql: impl Into<String>, replacements: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            replacements,
        }
    }

    /// Creates a part holding plain SQL text without placeholders.
    #[must_use]
    pub fn from_sql(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            replacements: vec![],
        }
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the ordered replacement values.
    #[must_use]
    pub fn replacements(&self) -> &[Value] {
        &self.replacements
    }

    /// Appends raw SQL text without placeholders.
    pub fn push_sql(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Appends another part, keeping replacement order.
    pub fn append(&mut self, other: Self) {
        self.sql.push_str(&other.sql);
        self.replacements.extend(other.replacements);
    }

    /// Consumes the part and returns its SQL text and replacements.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.replacements)
    }
}
