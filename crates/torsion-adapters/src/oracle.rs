//! Oracle dialect.

use torsion_sql::{Adapter, Query, Result};

/// Adapter for Oracle.
///
/// Oracle (before 12c row-limiting) has no LIMIT/OFFSET; pagination wraps
/// the statement in nested rownum subqueries. The `TORQUE$ROWNUM` alias
/// keeps the synthetic column out of the way of application column names.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleAdapter;

impl OracleAdapter {
    /// Creates a new Oracle adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Adapter for OracleAdapter {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn generate_limits(&self, query: &mut Query, offset: u64, limit: i64) -> Result<()> {
        if offset > 0 {
            query.set_pre_limit(Some(String::from(
                "SELECT B.* FROM ( SELECT A.*, rownum AS TORQUE$ROWNUM FROM ( ",
            )));
            let post_limit = if limit >= 0 {
                format!(
                    " ) A ) B WHERE B.TORQUE$ROWNUM > {offset} AND B.TORQUE$ROWNUM <= {}",
                    offset + limit.unsigned_abs()
                )
            } else {
                format!(" ) A ) B WHERE B.TORQUE$ROWNUM > {offset}")
            };
            query.set_post_limit(Some(post_limit));
        } else if limit >= 0 {
            query.set_pre_limit(Some(String::from("SELECT B.* FROM ( ")));
            query.set_post_limit(Some(format!(" ) B WHERE rownum <= {limit}")));
        }
        query.set_limit(None);
        query.set_offset(None);
        Ok(())
    }

    fn need_escape_clause(&self) -> bool {
        true
    }

    fn use_minus_for_except(&self) -> bool {
        true
    }
}
