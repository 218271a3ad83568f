//! Conversion of join declarations into FROM entries and WHERE conditions.
//!
//! Runs before every other build stage so that later stages can rely on
//! "table already present in FROM" checks.

use crate::adapter::Database;
use crate::column::Column;
use crate::criteria::Criteria;
use crate::criterion::{Criterion, Operand};
use crate::error::{Error, Result};
use crate::pspart::PreparedStatementPart;
use crate::query::{FromElement, Query};
use crate::sql_builder::render_criterion;
use crate::whereclause::WhereClauseChain;

/// Processes the criteria's join list in declaration order.
///
/// Implicit joins (no join type) become WHERE conditions, with the
/// referenced tables landing in FROM as a rendering side effect. Explicit
/// joins become joined FROM entries; when the right table is already placed
/// the join attaches from the left side instead, with its direction
/// reversed. Both sides already placed is a conflict a single join cannot
/// express.
pub(crate) fn process_joins(
    criteria: &Criteria,
    query: &mut Query,
    database: &Database,
    chain: &WhereClauseChain,
) -> Result<()> {
    for join in criteria.joins() {
        let Some(join_type) = join.join_type() else {
            let part = render_criterion(join.condition(), criteria, query, database, chain, true)?;
            query.add_where(part);
            continue;
        };

        let left = side_expression(join.left_table(), join.condition(), true, criteria, database)?;
        let right =
            side_expression(join.right_table(), join.condition(), false, criteria, database)?;
        let condition =
            render_criterion(join.condition(), criteria, query, database, chain, false)?;

        if !query.contains_from(right.sql()) {
            if !query.contains_from(left.sql()) {
                query.add_from(FromElement::new(left.sql()));
            }
            query.add_from(FromElement::joined(right.sql(), join_type, condition));
        } else if query.contains_from(left.sql()) {
            return Err(Error::JoinConflict {
                left: left.sql().to_owned(),
                right: right.sql().to_owned(),
            });
        } else {
            query.add_from(FromElement::joined(
                left.sql(),
                join_type.reversed(),
                condition,
            ));
        }
    }
    Ok(())
}

/// Resolves one side of an explicit join to its FROM expression: the
/// explicitly supplied table if any, otherwise the table of the condition's
/// column operand on that side.
fn side_expression(
    explicit: Option<&PreparedStatementPart>,
    condition: &Criterion,
    left: bool,
    criteria: &Criteria,
    database: &Database,
) -> Result<PreparedStatementPart> {
    if let Some(part) = explicit {
        // Explicit tables qualify against the default schema the same way
        // inferred ones do, or FROM uniqueness checks stop matching.
        let (sql, replacements) = part.clone().into_parts();
        return Ok(PreparedStatementPart::new(
            qualify(&sql, database),
            replacements,
        ));
    }
    let leaf = condition.as_leaf().ok_or_else(|| {
        Error::MalformedJoin(String::from(
            "a composite join condition requires explicit left and right tables",
        ))
    })?;
    let operand = if left { leaf.l_value() } else { leaf.r_value() };
    let column = operand.and_then(Operand::as_column).ok_or_else(|| {
        Error::MalformedJoin(String::from(
            "cannot infer a join table from a non-column operand",
        ))
    })?;
    let table = table_for_from_clause(column, criteria, database).ok_or_else(|| {
        Error::MalformedJoin(String::from(
            "cannot infer a join table from a table-less column",
        ))
    })?;
    Ok(PreparedStatementPart::from_sql(table))
}

/// Returns the FROM-clause expression for a column's table: resolves a
/// registered alias to `realTable alias` and qualifies simple identifiers
/// with the database's default schema.
pub(crate) fn table_for_from_clause(
    column: &Column,
    criteria: &Criteria,
    database: &Database,
) -> Option<String> {
    let table = column.table()?;
    if let Some(real) = criteria.table_for_alias(table) {
        return Some(format!("{} {table}", qualify(real, database)));
    }
    let full = column
        .full_table_name()
        .unwrap_or_else(|| table.to_owned());
    Some(qualify(&full, database))
}

fn qualify(expression: &str, database: &Database) -> String {
    if is_simple_identifier(expression) {
        if let Some(schema) = database.schema() {
            return format!("{schema}.{expression}");
        }
    }
    expression.to_owned()
}

/// A simple identifier is a bare table name: no schema qualification, no
/// alias, no subquery.
fn is_simple_identifier(expression: &str) -> bool {
    !expression.contains('.') && !expression.contains(' ') && !expression.contains('(')
}
