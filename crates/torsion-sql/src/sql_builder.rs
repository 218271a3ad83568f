//! The compiler turning a [`Criteria`] graph into a [`Query`].

use tracing::{debug, trace};

use crate::adapter::Database;
use crate::column::Column;
use crate::criteria::{Criteria, OrderBy};
use crate::criterion::{Criterion, Operand, WhereClauseExpression};
use crate::error::{Error, Result};
use crate::join_builder::{process_joins, table_for_from_clause};
use crate::pspart::PreparedStatementPart;
use crate::query::{FromElement, Query, QueryType, UpdateValue};
use crate::value::Value;
use crate::whereclause::WhereClauseChain;

/// Compiles criteria into parameterized SQL statements.
///
/// A builder is stateless across calls apart from its where-part strategy
/// chain, which callers may extend with custom strategies before use.
/// Independent criteria may be compiled concurrently from a shared builder.
#[derive(Debug, Default)]
pub struct SqlBuilder {
    chain: WhereClauseChain,
}

impl SqlBuilder {
    /// Creates a builder with the default where-part strategies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with a custom strategy chain.
    #[must_use]
    pub const fn with_chain(chain: WhereClauseChain) -> Self {
        Self { chain }
    }

    /// Gives mutable access to the strategy chain, for prepending custom
    /// where-part builders.
    pub fn chain_mut(&mut self) -> &mut WhereClauseChain {
        &mut self.chain
    }

    /// Compiles a SELECT statement.
    ///
    /// The criteria graph is read-only input; every call allocates a fresh
    /// [`Query`]. Stages run in a fixed order because later stages depend on
    /// the FROM-clause state established by earlier ones: joins first, then
    /// select columns, aliased columns, where conditions, group by, having
    /// and order by; composite criteria instead compile each set-operation
    /// part recursively and apply only the shared trailing clauses.
    ///
    /// # Errors
    ///
    /// Fails on malformed joins, join conflicts and operator/operand
    /// mismatches. No partially populated query is ever returned.
    pub fn build_query(&self, criteria: &Criteria, database: &Database) -> Result<Query> {
        let mut query = Query::new(QueryType::Select);
        if criteria.is_composite() {
            self.process_set_operations(criteria, &mut query, database)?;
            self.process_order_by(criteria, &mut query, database, false);
            process_limits(criteria, &mut query, database)?;
            process_for_update(criteria, &mut query, database);
        } else {
            process_joins(criteria, &mut query, database, &self.chain)?;
            trace!(from = ?query.from_clause(), "joins processed");
            process_modifiers(criteria, &mut query);
            process_select_columns(criteria, &mut query, database);
            process_as_columns(criteria, &mut query, database);
            self.process_criterions(criteria, &mut query, database)?;
            process_group_by(criteria, &mut query);
            self.process_having(criteria, &mut query, database)?;
            self.process_order_by(criteria, &mut query, database, true);
            process_limits(criteria, &mut query, database)?;
            process_from_elements(criteria, &mut query);
            process_for_update(criteria, &mut query, database);
        }
        query.set_fetch_size(criteria.fetch_size());
        debug!(sql = %query, "statement built");
        Ok(query)
    }

    /// Compiles a DELETE statement: the where clause and from clause of the
    /// criteria, rendered as `DELETE FROM`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`build_query`](Self::build_query).
    pub fn build_delete_query(&self, criteria: &Criteria, database: &Database) -> Result<Query> {
        let mut query = self.build_query(criteria, database)?;
        query.set_query_type(QueryType::Delete);
        Ok(query)
    }

    /// Compiles an UPDATE statement with the given column assignments.
    ///
    /// Assignment placeholders bind before any where-clause placeholders.
    /// Columns assigned a computed [`UpdateValue::Expression`] render the
    /// expression inline with no placeholder.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`build_query`](Self::build_query).
    pub fn build_update_query(
        &self,
        criteria: &Criteria,
        assignments: Vec<(Column, UpdateValue)>,
        database: &Database,
    ) -> Result<Query> {
        let mut query = self.build_query(criteria, database)?;
        query.set_query_type(QueryType::Update);
        for (column, value) in assignments {
            let name = column
                .name()
                .map_or_else(|| column.sql_expression(), ToOwned::to_owned);
            query.add_update_assignment(name, value);
        }
        Ok(query)
    }

    fn process_criterions(
        &self,
        criteria: &Criteria,
        query: &mut Query,
        database: &Database,
    ) -> Result<()> {
        if let Some(criterion) = criteria.criterion() {
            let part = render_criterion(criterion, criteria, query, database, &self.chain, true)?;
            query.add_where(part);
        }
        Ok(())
    }

    fn process_having(
        &self,
        criteria: &Criteria,
        query: &mut Query,
        database: &Database,
    ) -> Result<()> {
        if let Some(criterion) = criteria.having() {
            let part = render_criterion(criterion, criteria, query, database, &self.chain, false)?;
            query.set_having(part);
        }
        Ok(())
    }

    fn process_order_by(
        &self,
        criteria: &Criteria,
        query: &mut Query,
        database: &Database,
        add_tables: bool,
    ) {
        for order in criteria.order_by() {
            let OrderBy {
                column,
                direction,
                ignore_case,
            } = order;
            let expression = column.sql_expression();
            let fold = (*ignore_case || criteria.is_ignore_case())
                && column_is_textual(column, database)
                && !expression.contains('(');
            if fold {
                // Some engines require ordering expressions to appear in the
                // select list, so the folded expression is added there too.
                let wrapped = database.adapter().ignore_case_in_order_by(&expression);
                query.add_order_by(format!("{wrapped} {}", direction.as_str()));
                query.add_select_column(database.adapter().ignore_case(&expression));
            } else {
                query.add_order_by(format!("{expression} {}", direction.as_str()));
            }
            if add_tables {
                add_column_table(column, criteria, query, database);
            }
        }
    }

    fn process_set_operations(
        &self,
        criteria: &Criteria,
        query: &mut Query,
        database: &Database,
    ) -> Result<()> {
        let Some(operator) = criteria.set_operator() else {
            return Ok(());
        };
        query.set_part_operator(operator.keyword(database.adapter().use_minus_for_except()));
        for part in criteria.set_parts() {
            query.add_part(self.build_query(part, database)?);
        }
        Ok(())
    }
}

fn process_modifiers(criteria: &Criteria, query: &mut Query) {
    for modifier in criteria.select_modifiers() {
        query.add_select_modifier(modifier.clone());
    }
}

fn process_select_columns(criteria: &Criteria, query: &mut Query, database: &Database) {
    for column in criteria.select_columns() {
        if criteria.as_columns().iter().any(|(_, c)| c == column) {
            continue;
        }
        query.add_select_column(column.sql_expression());
        add_column_table(column, criteria, query, database);
    }
}

fn process_as_columns(criteria: &Criteria, query: &mut Query, database: &Database) {
    for (alias, column) in criteria.as_columns() {
        query.add_select_column(format!("{} AS {alias}", column.sql_expression()));
        add_column_table(column, criteria, query, database);
    }
}

fn process_group_by(criteria: &Criteria, query: &mut Query) {
    for column in criteria.group_by_columns() {
        query.add_group_by(column.sql_expression());
    }
}

fn process_limits(criteria: &Criteria, query: &mut Query, database: &Database) -> Result<()> {
    if criteria.limit() >= 0 || criteria.offset() > 0 {
        database
            .adapter()
            .generate_limits(query, criteria.offset(), criteria.limit())?;
    }
    Ok(())
}

fn process_from_elements(criteria: &Criteria, query: &mut Query) {
    if !criteria.from_elements().is_empty() {
        query.replace_from(criteria.from_elements().to_vec());
    }
}

fn process_for_update(criteria: &Criteria, query: &mut Query, database: &Database) {
    if criteria.is_for_update() {
        query.set_for_update(Some(database.adapter().update_lock_clause().to_owned()));
    }
}

/// Renders a criterion tree to a SQL fragment with its replacements.
///
/// Composites render as one parenthesized group joined by their
/// conjunction. With `add_tables` set, tables referenced by column operands
/// are added to the query's FROM clause as a side effect.
pub(crate) fn render_criterion(
    criterion: &Criterion,
    criteria: &Criteria,
    query: &mut Query,
    database: &Database,
    chain: &WhereClauseChain,
    add_tables: bool,
) -> Result<PreparedStatementPart> {
    match criterion {
        Criterion::Leaf(expression) => {
            if add_tables {
                add_expression_tables(expression, criteria, query, database);
            }
            let ignore_case = effective_ignore_case(expression, criteria, database);
            chain.render(expression, ignore_case, database)
        }
        Criterion::Composite { parts, conjunction } => {
            if parts.is_empty() {
                return Err(Error::EmptyExpression);
            }
            let mut part = PreparedStatementPart::from_sql("(");
            for (index, child) in parts.iter().enumerate() {
                if index > 0 {
                    part.push_sql(conjunction.as_str());
                }
                part.append(render_criterion(
                    child, criteria, query, database, chain, add_tables,
                )?);
            }
            part.push_sql(")");
            Ok(part)
        }
    }
}

fn add_expression_tables(
    expression: &WhereClauseExpression,
    criteria: &Criteria,
    query: &mut Query,
    database: &Database,
) {
    for operand in [expression.l_value(), expression.r_value()]
        .into_iter()
        .flatten()
    {
        if let Some(column) = operand.as_column() {
            add_column_table(column, criteria, query, database);
        }
    }
}

fn add_column_table(column: &Column, criteria: &Criteria, query: &mut Query, database: &Database) {
    if column.is_raw_expression() {
        return;
    }
    if let Some(expression) = table_for_from_clause(column, criteria, database) {
        query.add_from(FromElement::new(expression));
    }
}

/// Case-insensitivity takes effect only when requested (criteria-wide or on
/// the condition) and applicable to both operands: always for text, lists
/// and null, and for columns only when the mapped type is textual. Columns
/// without metadata count as textual.
fn effective_ignore_case(
    expression: &WhereClauseExpression,
    criteria: &Criteria,
    database: &Database,
) -> bool {
    if !(criteria.is_ignore_case() || expression.ignore_case()) {
        return false;
    }
    operand_supports_ignore_case(expression.l_value(), database)
        && operand_supports_ignore_case(expression.r_value(), database)
}

fn operand_supports_ignore_case(operand: Option<&Operand>, database: &Database) -> bool {
    match operand {
        None | Some(Operand::List(_)) => true,
        Some(Operand::Column(column)) => column_is_textual(column, database),
        Some(Operand::Single(value)) => {
            matches!(value, Value::Null | Value::Text(_))
        }
    }
}

fn column_is_textual(column: &Column, database: &Database) -> bool {
    match (column.table(), column.name()) {
        (Some(table), Some(name)) => database
            .map()
            .column(table, name)
            .is_none_or(|map| map.column_type().is_text()),
        _ => true,
    }
}
