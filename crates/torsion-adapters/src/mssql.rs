//! Microsoft SQL Server dialect.

use torsion_sql::{Adapter, Error, Query, Result};

/// Adapter for Microsoft SQL Server.
///
/// Row limiting is emulated with `SET ROWCOUNT n` before the statement and
/// `SET ROWCOUNT 0` after it. There is no offset emulation; requesting one
/// is a configuration error. Row locking uses a table hint rather than a
/// trailing FOR UPDATE.
#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlAdapter;

impl MssqlAdapter {
    /// Creates a new SQL Server adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Adapter for MssqlAdapter {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn generate_limits(&self, query: &mut Query, offset: u64, limit: i64) -> Result<()> {
        if offset > 0 {
            return Err(Error::UnsupportedLimit(String::from(
                "SQL Server cannot skip an offset of rows",
            )));
        }
        if limit >= 0 {
            query.set_row_count(Some(limit.to_string()));
        }
        Ok(())
    }

    fn update_lock_clause(&self) -> &'static str {
        "WITH (UPDLOCK)"
    }
}
