//! MySQL dialect.

use torsion_sql::{Adapter, Query, Result};

/// The largest value of MySQL's unsigned BIGINT, used as the limit when
/// only an offset was requested; MySQL has no offset-without-limit syntax.
const NO_LIMIT: &str = "18446744073709551615";

/// Adapter for MySQL and compatible engines.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlAdapter;

impl MysqlAdapter {
    /// Creates a new MySQL adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Adapter for MysqlAdapter {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn generate_limits(&self, query: &mut Query, offset: u64, limit: i64) -> Result<()> {
        if offset > 0 {
            query.set_offset(Some(offset.to_string()));
            query.set_limit(Some(if limit >= 0 {
                limit.to_string()
            } else {
                NO_LIMIT.to_owned()
            }));
        } else if limit >= 0 {
            query.set_limit(Some(limit.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torsion_sql::{Column, Criteria, Database, SqlBuilder};

    fn build(criteria: &Criteria) -> Query {
        let database = Database::new("test", Box::new(MysqlAdapter::new()));
        SqlBuilder::new().build_query(criteria, &database).unwrap()
    }

    #[test]
    fn test_limit_and_offset() {
        let criteria = Criteria::new()
            .add_select_column(Column::new("book", "title"))
            .set_limit(10)
            .set_offset(20);
        assert_eq!(
            build(&criteria).to_string(),
            "SELECT book.title FROM book LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn test_offset_without_limit_uses_sentinel() {
        let criteria = Criteria::new()
            .add_select_column(Column::new("book", "title"))
            .set_offset(20);
        assert_eq!(
            build(&criteria).to_string(),
            "SELECT book.title FROM book LIMIT 18446744073709551615 OFFSET 20"
        );
    }
}
