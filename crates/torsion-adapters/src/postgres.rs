//! PostgreSQL dialect.

use torsion_sql::Adapter;

/// Adapter for PostgreSQL.
///
/// Limit and offset use the ANSI rendering; the one dialect-specific
/// behavior is native `ILIKE` for case-insensitive pattern matching.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresAdapter;

impl PostgresAdapter {
    /// Creates a new PostgreSQL adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Adapter for PostgresAdapter {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn use_ilike(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torsion_sql::{Column, Criteria, Database, SqlBuilder, SqlOperator};

    #[test]
    fn test_ignore_case_like_uses_native_ilike() {
        let criteria = Criteria::new()
            .set_ignore_case(true)
            .where_op(Column::new("book", "title"), SqlOperator::Like, "moby*");
        let database = Database::new("test", Box::new(PostgresAdapter::new()));
        let query = SqlBuilder::new().build_query(&criteria, &database).unwrap();
        assert_eq!(
            query.to_string(),
            "SELECT  FROM book WHERE book.title ILIKE ?"
        );
    }
}
