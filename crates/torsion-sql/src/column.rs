//! Column references.

/// A reference to a database column or a raw SQL expression.
///
/// A column with a SQL expression but no column name (e.g. `count(*)`)
/// represents an arbitrary fragment, not a table column, and is exempt from
/// FROM clause inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    schema: Option<String>,
    table: Option<String>,
    name: Option<String>,
    sql_expression: Option<String>,
}

impl Column {
    /// Creates a column reference qualified by its table.
    #[must_use]
    pub fn new(table: &str, name: &str) -> Self {
        Self {
            schema: None,
            table: Some(String::from(table)),
            name: Some(String::from(name)),
            sql_expression: None,
        }
    }

    /// Creates a column reference qualified by schema and table.
    #[must_use]
    pub fn with_schema(schema: &str, table: &str, name: &str) -> Self {
        Self {
            schema: Some(String::from(schema)),
            table: Some(String::from(table)),
            name: Some(String::from(name)),
            sql_expression: None,
        }
    }

    /// Creates a computed column from a raw SQL expression, e.g. `count(*)`.
    #[must_use]
    pub fn from_expression(sql_expression: &str) -> Self {
        Self {
            schema: None,
            table: None,
            name: None,
            sql_expression: Some(String::from(sql_expression)),
        }
    }

    /// Creates a computed column expression that still belongs to a table,
    /// e.g. `UPPER(book.title)` on table `book`.
    #[must_use]
    pub fn from_table_expression(table: &str, sql_expression: &str) -> Self {
        Self {
            schema: None,
            table: Some(String::from(table)),
            name: None,
            sql_expression: Some(String::from(sql_expression)),
        }
    }

    /// Returns the schema name, if any.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Returns the table name, if any.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Returns the column name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true if this column is a raw fragment without a column name.
    #[must_use]
    pub const fn is_raw_expression(&self) -> bool {
        self.sql_expression.is_some() && self.name.is_none()
    }

    /// Returns the table name qualified with the schema when one is set.
    #[must_use]
    pub fn full_table_name(&self) -> Option<String> {
        self.table.as_ref().map(|table| match &self.schema {
            Some(schema) => format!("{schema}.{table}"),
            None => table.clone(),
        })
    }

    /// Returns the SQL expression used wherever this column appears in a
    /// statement: the raw expression if one was given, otherwise
    /// `table.column`.
    #[must_use]
    pub fn sql_expression(&self) -> String {
        if let Some(expr) = &self.sql_expression {
            return expr.clone();
        }
        let name = self.name.as_deref().unwrap_or_default();
        match &self.table {
            Some(table) => format!("{table}.{name}"),
            None => String::from(name),
        }
    }
}
