//! The IN / NOT IN strategy.

use crate::adapter::Database;
use crate::criterion::{Operand, WhereClauseExpression};
use crate::error::{Error, Result};
use crate::operator::SqlOperator;
use crate::pspart::PreparedStatementPart;
use crate::value::Value;

use super::{operand_part, WhereClauseChain, WherePartBuilder};

/// Renders IN and NOT IN against a value list.
///
/// Null entries cannot appear inside an IN list, so they are split off into
/// a separate null comparison: `(col IN (?,?) OR col IS NULL)` for IN,
/// `(col NOT IN (?,?) AND col IS NOT NULL)` for NOT IN. A list of only
/// nulls collapses to the bare null comparison. The fragment is assembled
/// in a single pass over the list.
#[derive(Debug)]
pub struct InListBuilder;

impl WherePartBuilder for InListBuilder {
    fn is_applicable(&self, expression: &WhereClauseExpression) -> bool {
        expression.operator().is_some_and(SqlOperator::is_in)
    }

    fn build_ps(
        &self,
        expression: &WhereClauseExpression,
        ignore_case: bool,
        database: &Database,
        _chain: &WhereClauseChain,
    ) -> Result<PreparedStatementPart> {
        let operator = expression
            .operator()
            .ok_or_else(|| Error::InvalidOperand(String::from("missing operator")))?;
        let l_value = expression.l_value().ok_or(Error::EmptyExpression)?;
        let values = match expression.r_value() {
            Some(Operand::List(values)) => values,
            _ => {
                return Err(Error::InvalidOperand(String::from(
                    "IN requires a value list rValue",
                )))
            }
        };
        if values.is_empty() {
            return Err(Error::InvalidOperand(String::from("empty IN list")));
        }

        let negated = operator.is_negated();
        let (left_sql, left_replacements) = operand_part(l_value)?.into_parts();
        let null_sql = if negated { " IS NOT NULL" } else { " IS NULL" };

        let mut replacements = left_replacements;
        let mut has_null = false;
        // 2 bytes per placeholder plus room for the UPPER wrapping.
        let mut placeholders = String::with_capacity(values.len() * if ignore_case { 9 } else { 2 });
        for value in values {
            if matches!(value, Value::Null) {
                has_null = true;
                continue;
            }
            if !placeholders.is_empty() {
                placeholders.push(',');
            }
            if ignore_case {
                placeholders.push_str(&database.adapter().ignore_case("?"));
            } else {
                placeholders.push('?');
            }
            replacements.push(value.clone());
        }

        if placeholders.is_empty() {
            // All entries were null.
            let mut sql = left_sql;
            sql.push_str(null_sql);
            return Ok(PreparedStatementPart::new(sql, replacements));
        }

        let folded_left = if ignore_case {
            database.adapter().ignore_case(&left_sql)
        } else {
            left_sql.clone()
        };
        let mut sql = String::with_capacity(folded_left.len() + placeholders.len() + 32);
        if has_null {
            sql.push('(');
        }
        sql.push_str(&folded_left);
        sql.push_str(operator.as_str());
        sql.push('(');
        sql.push_str(&placeholders);
        sql.push(')');
        if has_null {
            sql.push_str(if negated { " AND " } else { " OR " });
            sql.push_str(&left_sql);
            sql.push_str(null_sql);
            sql.push(')');
        }
        Ok(PreparedStatementPart::new(sql, replacements))
    }
}
