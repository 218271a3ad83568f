//! The LIKE family strategy, including wildcard translation.

use crate::adapter::Database;
use crate::criterion::{Operand, WhereClauseExpression};
use crate::error::{Error, Result};
use crate::operator::SqlOperator;
use crate::pspart::PreparedStatementPart;
use crate::value::Value;

use super::{operand_part, WhereClauseChain, WherePartBuilder};

/// A user-level pattern translated to SQL LIKE syntax.
#[derive(Debug)]
struct LikePattern {
    sql: String,
    has_wildcard: bool,
    has_escaped_wildcard: bool,
}

/// Translates the portable wildcard syntax to SQL: `*` becomes `%`, `?`
/// becomes `_`. A backslash escapes the following character; only escaped
/// SQL wildcards (`%`, `_`) keep their backslash in the output, since they
/// alone need an ESCAPE declaration to stay literal. Other escapes drop the
/// backslash. Literal `%` and `_` already count as wildcards.
fn translate_pattern(raw: &str) -> LikePattern {
    let mut sql = String::with_capacity(raw.len());
    let mut has_wildcard = false;
    let mut has_escaped_wildcard = false;
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                sql.push('%');
                has_wildcard = true;
            }
            '?' => {
                sql.push('_');
                has_wildcard = true;
            }
            '%' | '_' => {
                sql.push(c);
                has_wildcard = true;
            }
            '\\' => match chars.next() {
                Some(escaped @ ('%' | '_')) => {
                    sql.push('\\');
                    sql.push(escaped);
                    has_escaped_wildcard = true;
                }
                Some(escaped) => sql.push(escaped),
                None => sql.push('\\'),
            },
            other => sql.push(other),
        }
    }
    LikePattern {
        sql,
        has_wildcard,
        has_escaped_wildcard,
    }
}

/// Strips the escape backslashes from a pattern that contains no wildcards,
/// yielding the literal the comparison degenerates to.
fn unescape(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Renders the LIKE operator family.
///
/// A pattern without any wildcard degenerates to an equality comparison.
/// With ignore-case in effect the builder emits the adapter's native ILIKE
/// when available, otherwise wraps the column side in the case-folding
/// function while the bound pattern is folded by the database. On dialects
/// that require it, an `ESCAPE '\'` clause is appended when the pattern
/// contains an escaped wildcard.
#[derive(Debug)]
pub struct LikeBuilder;

impl WherePartBuilder for LikeBuilder {
    fn is_applicable(&self, expression: &WhereClauseExpression) -> bool {
        expression.operator().is_some_and(SqlOperator::is_like)
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
        let raw = match expression.r_value() {
            Some(Operand::Single(Value::Text(text))) => text,
            _ => {
                return Err(Error::InvalidOperand(String::from(
                    "LIKE requires a character rValue",
                )))
            }
        };

        let negated = operator.is_negated();
        // Explicit ILIKE operators request case-insensitivity by themselves.
        let ignore_case =
            ignore_case || matches!(operator, SqlOperator::ILike | SqlOperator::NotILike);
        let pattern = translate_pattern(raw);

        if !pattern.has_wildcard {
            let literal = Value::Text(unescape(&pattern.sql));
            let operator = if negated {
                SqlOperator::NotEqual
            } else {
                SqlOperator::Equal
            };
            let (left_sql, left_replacements) = operand_part(l_value)?.into_parts();
            let (left_sql, right_sql) = if ignore_case {
                (
                    database.adapter().ignore_case(&left_sql),
                    database.adapter().ignore_case("?"),
                )
            } else {
                (left_sql, String::from("?"))
            };
            let mut part = PreparedStatementPart::new(left_sql, left_replacements);
            part.push_sql(operator.as_str());
            part.append(PreparedStatementPart::new(right_sql, vec![literal]));
            return Ok(part);
        }

        let (left_sql, left_replacements) = operand_part(l_value)?.into_parts();
        let has_escaped_wildcard = pattern.has_escaped_wildcard;
        let bound = Value::Text(pattern.sql);
        let mut part;
        if ignore_case && database.adapter().use_ilike() {
            part = PreparedStatementPart::new(left_sql, left_replacements);
            part.push_sql(if negated { " NOT ILIKE " } else { " ILIKE " });
            part.append(PreparedStatementPart::new("?", vec![bound]));
        } else {
            let (left_sql, right_sql) = if ignore_case {
                (
                    database.adapter().ignore_case(&left_sql),
                    database.adapter().ignore_case("?"),
                )
            } else {
                (left_sql, String::from("?"))
            };
            part = PreparedStatementPart::new(left_sql, left_replacements);
            part.push_sql(if negated { " NOT LIKE " } else { " LIKE " });
            part.append(PreparedStatementPart::new(right_sql, vec![bound]));
        }
        if has_escaped_wildcard && database.adapter().need_escape_clause() {
            part.push_sql(" ESCAPE '\\'");
        }
        Ok(part)
    }
}
