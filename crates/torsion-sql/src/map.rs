//! Database metadata used to classify columns.
//!
//! The compiler only consults this metadata to decide whether a column's
//! declared type is textual, which drives ignore-case and order-by
//! rendering. A missing table or column entry means "unknown" and is
//! treated as textual-like rather than as an error.

use std::collections::HashMap;

/// Declared SQL type of a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// VARCHAR.
    Varchar,
    /// CHAR.
    Char,
    /// LONGVARCHAR.
    Longvarchar,
    /// CLOB.
    Clob,
    /// BOOLEAN.
    Boolean,
    /// INTEGER.
    Integer,
    /// BIGINT.
    Bigint,
    /// DOUBLE.
    Double,
    /// NUMERIC / DECIMAL.
    Numeric,
    /// DATE.
    Date,
    /// TIME.
    Time,
    /// TIMESTAMP.
    Timestamp,
    /// BLOB / VARBINARY.
    Blob,
}

impl ColumnType {
    /// Returns true for character types that support case folding.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::Varchar | Self::Char | Self::Longvarchar | Self::Clob
        )
    }
}

/// Metadata for one column.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    name: String,
    column_type: ColumnType,
}

impl ColumnMap {
    /// Creates column metadata.
    #[must_use]
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: String::from(name),
            column_type,
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }
}

/// Metadata for one table.
#[derive(Debug, Clone)]
pub struct TableMap {
    name: String,
    columns: HashMap<String, ColumnMap>,
}

impl TableMap {
    /// Creates table metadata.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            columns: HashMap::new(),
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a column and returns the table for chaining.
    #[must_use]
    pub fn with_column(mut self, column: ColumnMap) -> Self {
        self.columns.insert(column.name.clone(), column);
        self
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnMap> {
        self.columns.get(name)
    }
}

/// Metadata for one database, keyed by table name.
#[derive(Debug, Clone, Default)]
pub struct DatabaseMap {
    tables: HashMap<String, TableMap>,
}

impl DatabaseMap {
    /// Creates an empty database map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table and returns the map for chaining.
    #[must_use]
    pub fn with_table(mut self, table: TableMap) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableMap> {
        self.tables.get(name)
    }

    /// Looks up a column by table and column name.
    #[must_use]
    pub fn column(&self, table: &str, column: &str) -> Option<&ColumnMap> {
        self.tables.get(table).and_then(|t| t.column(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_classification() {
        assert!(ColumnType::Varchar.is_text());
        assert!(ColumnType::Clob.is_text());
        assert!(!ColumnType::Integer.is_text());
        assert!(!ColumnType::Timestamp.is_text());
    }

    #[test]
    fn test_lookup() {
        let map = DatabaseMap::new().with_table(
            TableMap::new("book")
                .with_column(ColumnMap::new("title", ColumnType::Varchar))
                .with_column(ColumnMap::new("pages", ColumnType::Integer)),
        );
        assert_eq!(
            map.column("book", "title").map(ColumnMap::column_type),
            Some(ColumnType::Varchar)
        );
        assert!(map.column("book", "missing").is_none());
        assert!(map.column("missing", "title").is_none());
    }
}
