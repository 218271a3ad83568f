//! The non-pattern where-part strategies: enum unwrapping, verbatim SQL,
//! date/time sentinels, null comparisons and the standard catch-all.

use crate::adapter::Database;
use crate::criterion::WhereClauseExpression;
use crate::error::{Error, Result};
use crate::pspart::PreparedStatementPart;

use super::{operand_part, resolve_enums, WhereClauseChain, WherePartBuilder};

/// Unwraps domain enum operands to their stored values, then re-dispatches
/// the rewritten expression through the rest of the chain.
#[derive(Debug)]
pub struct EnumValueBuilder;

impl WherePartBuilder for EnumValueBuilder {
    fn is_applicable(&self, expression: &WhereClauseExpression) -> bool {
        expression
            .l_value()
            .is_some_and(crate::criterion::Operand::contains_enum)
            || expression
                .r_value()
                .is_some_and(crate::criterion::Operand::contains_enum)
    }

    fn build_ps(
        &self,
        expression: &WhereClauseExpression,
        ignore_case: bool,
        database: &Database,
        chain: &WhereClauseChain,
    ) -> Result<PreparedStatementPart> {
        let resolved = expression.with_operands(
            expression.l_value().map(resolve_enums),
            expression.r_value().map(resolve_enums),
        );
        chain.render(&resolved, ignore_case, database)
    }
}

/// Emits a verbatim SQL condition unchanged, carrying its replacements.
#[derive(Debug)]
pub struct VerbatimSqlBuilder;

impl WherePartBuilder for VerbatimSqlBuilder {
    fn is_applicable(&self, expression: &WhereClauseExpression) -> bool {
        expression.sql().is_some()
    }

    fn build_ps(
        &self,
        expression: &WhereClauseExpression,
        _ignore_case: bool,
        _database: &Database,
        _chain: &WhereClauseChain,
    ) -> Result<PreparedStatementPart> {
        let sql = expression
            .sql()
            .ok_or_else(|| Error::InvalidOperand(String::from("missing verbatim SQL")))?;
        Ok(PreparedStatementPart::new(
            sql,
            expression.sql_replacements().to_vec(),
        ))
    }
}

/// Renders comparisons against CURRENT_DATE / CURRENT_TIME /
/// CURRENT_TIMESTAMP as the keyword itself, with no placeholder.
#[derive(Debug)]
pub struct CurrentDateTimeBuilder;

impl WherePartBuilder for CurrentDateTimeBuilder {
    fn is_applicable(&self, expression: &WhereClauseExpression) -> bool {
        expression.r_value().is_some_and(|operand| match operand {
            crate::criterion::Operand::Single(value) => value.is_current_date_time(),
            _ => false,
        })
    }

    fn build_ps(
        &self,
        expression: &WhereClauseExpression,
        _ignore_case: bool,
        _database: &Database,
        _chain: &WhereClauseChain,
    ) -> Result<PreparedStatementPart> {
        let operator = expression
            .operator()
            .ok_or_else(|| Error::InvalidOperand(String::from("missing operator")))?;
        let l_value = expression
            .l_value()
            .ok_or(Error::EmptyExpression)?;
        // operand_part renders the sentinel as its keyword.
        let r_value = expression
            .r_value()
            .ok_or_else(|| Error::InvalidOperand(String::from("missing right operand")))?;

        let mut part = operand_part(l_value)?;
        part.push_sql(operator.as_str());
        part.append(operand_part(r_value)?);
        Ok(part)
    }
}

/// Renders null comparisons as `IS NULL` / `IS NOT NULL`, regardless of the
/// operator spelling the caller used (`=` null becomes `IS NULL`, `<>` null
/// becomes `IS NOT NULL`).
#[derive(Debug)]
pub struct NullValueBuilder;

impl WherePartBuilder for NullValueBuilder {
    fn is_applicable(&self, expression: &WhereClauseExpression) -> bool {
        expression.is_null_comparison()
    }

    fn build_ps(
        &self,
        expression: &WhereClauseExpression,
        _ignore_case: bool,
        _database: &Database,
        _chain: &WhereClauseChain,
    ) -> Result<PreparedStatementPart> {
        let operator = expression
            .operator()
            .ok_or_else(|| Error::InvalidOperand(String::from("missing operator")))?;
        let l_value = expression.l_value().ok_or(Error::EmptyExpression)?;

        let mut part = operand_part(l_value)?;
        part.push_sql(if operator.is_negated() {
            " IS NOT NULL"
        } else {
            " IS NULL"
        });
        Ok(part)
    }
}

/// The catch-all binary comparison: `lValue OPERATOR rValue` with `?`
/// placeholders for plain values. With ignore-case in effect, both sides are
/// wrapped in the adapter's case-folding function.
#[derive(Debug)]
pub struct StandardBuilder;

impl WherePartBuilder for StandardBuilder {
    fn is_applicable(&self, _expression: &WhereClauseExpression) -> bool {
        true
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
        let r_value = expression
            .r_value()
            .ok_or_else(|| Error::InvalidOperand(String::from("missing right operand")))?;

        let left = operand_part(l_value)?;
        let right = operand_part(r_value)?;

        let (left_sql, left_replacements) = left.into_parts();
        let (right_sql, right_replacements) = right.into_parts();
        let (left_sql, right_sql) = if ignore_case {
            (
                database.adapter().ignore_case(&left_sql),
                database.adapter().ignore_case(&right_sql),
            )
        } else {
            (left_sql, right_sql)
        };

        let mut part = PreparedStatementPart::new(left_sql, left_replacements);
        part.push_sql(operator.as_str());
        part.append(PreparedStatementPart::new(right_sql, right_replacements));
        Ok(part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::GenericAdapter;
    use crate::column::Column;
    use crate::criterion::Operand;
    use crate::operator::SqlOperator;
    use crate::value::Value;

    fn db() -> Database {
        Database::new("test", Box::new(GenericAdapter::new()))
    }

    fn render(expression: &WhereClauseExpression, ignore_case: bool) -> PreparedStatementPart {
        WhereClauseChain::new()
            .render(expression, ignore_case, &db())
            .unwrap()
    }

    #[test]
    fn test_standard_comparison() {
        let expr = WhereClauseExpression::new(
            Operand::Column(Column::new("book", "title")),
            SqlOperator::Equal,
            Some(Operand::Single(Value::Text(String::from("Moby Dick")))),
        );
        let part = render(&expr, false);
        assert_eq!(part.sql(), "book.title=?");
        assert_eq!(part.replacements(), &[Value::Text(String::from("Moby Dick"))]);
    }

    #[test]
    fn test_standard_ignore_case_wraps_both_sides() {
        let expr = WhereClauseExpression::new(
            Operand::Column(Column::new("book", "title")),
            SqlOperator::Equal,
            Some(Operand::Single(Value::Text(String::from("moby")))),
        );
        let part = render(&expr, true);
        assert_eq!(part.sql(), "UPPER(book.title)=UPPER(?)");
    }

    #[test]
    fn test_column_to_column_comparison() {
        let expr = WhereClauseExpression::new(
            Operand::Column(Column::new("book", "author_id")),
            SqlOperator::Equal,
            Some(Operand::Column(Column::new("author", "id"))),
        );
        let part = render(&expr, false);
        assert_eq!(part.sql(), "book.author_id=author.id");
        assert!(part.replacements().is_empty());
    }

    #[test]
    fn test_null_value_rewrites_operator() {
        let equal_null = WhereClauseExpression::new(
            Operand::Column(Column::new("book", "isbn")),
            SqlOperator::Equal,
            Some(Operand::Single(Value::Null)),
        );
        assert_eq!(render(&equal_null, false).sql(), "book.isbn IS NULL");

        let not_equal_null = WhereClauseExpression::new(
            Operand::Column(Column::new("book", "isbn")),
            SqlOperator::NotEqual,
            Some(Operand::Single(Value::Null)),
        );
        assert_eq!(render(&not_equal_null, false).sql(), "book.isbn IS NOT NULL");
    }

    #[test]
    fn test_unary_null_operator() {
        let expr = WhereClauseExpression::new(
            Operand::Column(Column::new("book", "isbn")),
            SqlOperator::IsNotNull,
            None,
        );
        assert_eq!(render(&expr, false).sql(), "book.isbn IS NOT NULL");
    }

    #[test]
    fn test_current_date_renders_keyword() {
        let expr = WhereClauseExpression::new(
            Operand::Column(Column::new("book", "published")),
            SqlOperator::LessEqual,
            Some(Operand::Single(Value::CurrentDate)),
        );
        let part = render(&expr, false);
        assert_eq!(part.sql(), "book.published<=CURRENT_DATE");
        assert!(part.replacements().is_empty());
    }

    #[test]
    fn test_verbatim_passes_through() {
        let expr = WhereClauseExpression::verbatim(
            "book.id = func(?)",
            vec![Value::Int(7)],
        );
        let part = render(&expr, false);
        assert_eq!(part.sql(), "book.id = func(?)");
        assert_eq!(part.replacements(), &[Value::Int(7)]);
    }

    #[test]
    fn test_enum_operand_is_unwrapped() {
        use crate::value::SqlEnum;

        #[derive(Debug)]
        struct Status;
        impl SqlEnum for Status {
            fn sql_value(&self) -> Value {
                Value::Int(2)
            }
        }

        let expr = WhereClauseExpression::new(
            Operand::Column(Column::new("book", "status")),
            SqlOperator::Equal,
            Some(Operand::Single(Value::Enum(std::sync::Arc::new(Status)))),
        );
        let part = render(&expr, false);
        assert_eq!(part.sql(), "book.status=?");
        assert_eq!(part.replacements(), &[Value::Int(2)]);
    }

    #[test]
    fn test_expression_without_condition_is_rejected() {
        let expr = WhereClauseExpression::new(
            Operand::Column(Column::new("book", "id")),
            SqlOperator::Equal,
            Some(Operand::Single(Value::Int(1))),
        );
        let empty = expr.with_operands(None, None);
        assert!(matches!(
            WhereClauseChain::new().render(&empty, false, &db()),
            Err(Error::EmptyExpression)
        ));
    }
}
