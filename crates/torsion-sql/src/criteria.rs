//! The caller-facing description of a statement to compile.

use crate::column::Column;
use crate::criterion::{Criterion, Operand};
use crate::join::{Join, JoinType};
use crate::operator::SqlOperator;
use crate::query::FromElement;
use crate::value::Value;

/// Sort direction of an ORDER BY entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The column to order by.
    pub column: Column,
    /// The sort direction.
    pub direction: OrderDirection,
    /// Whether ordering should be case-insensitive.
    pub ignore_case: bool,
}

/// The operator combining the parts of a composite criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    /// UNION.
    Union,
    /// UNION ALL.
    UnionAll,
    /// INTERSECT.
    Intersect,
    /// INTERSECT ALL.
    IntersectAll,
    /// EXCEPT.
    Except,
    /// EXCEPT ALL.
    ExceptAll,
}

impl SetOperator {
    /// Returns the SQL keyword, translating EXCEPT to MINUS when the target
    /// dialect requires it.
    #[must_use]
    pub const fn keyword(self, use_minus: bool) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::IntersectAll => "INTERSECT ALL",
            Self::Except => {
                if use_minus {
                    "MINUS"
                } else {
                    "EXCEPT"
                }
            }
            Self::ExceptAll => {
                if use_minus {
                    "MINUS ALL"
                } else {
                    "EXCEPT ALL"
                }
            }
        }
    }
}

/// A description of a statement: columns, conditions, joins and options.
///
/// Criteria are built fluently and handed to
/// [`SqlBuilder::build_query`](crate::SqlBuilder::build_query), which treats
/// them as read-only input. A criteria becomes *composite* through the set
/// operation methods ([`union`](Self::union) and friends); a composite
/// criteria ignores its single-statement fields except for the shared
/// trailing clauses (order by, limit, offset, for update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    select_modifiers: Vec<String>,
    select_columns: Vec<Column>,
    as_columns: Vec<(String, Column)>,
    aliases: Vec<(String, String)>,
    joins: Vec<Join>,
    criterion: Option<Criterion>,
    group_by: Vec<Column>,
    having: Option<Criterion>,
    order_by: Vec<OrderBy>,
    from_elements: Vec<FromElement>,
    limit: i64,
    offset: u64,
    fetch_size: Option<i32>,
    for_update: bool,
    ignore_case: bool,
    set_parts: Vec<Criteria>,
    set_operator: Option<SetOperator>,
}

impl Criteria {
    /// Creates an empty criteria.
    #[must_use]
    pub fn new() -> Self {
        Self {
            limit: -1,
            ..Self::default()
        }
    }

    // ---- conditions -----------------------------------------------------

    /// Adds an equality condition, AND-ed with any existing condition.
    #[must_use]
    pub fn where_clause(self, column: Column, value: impl Into<Operand>) -> Self {
        self.and(column, value)
    }

    /// Adds a condition with an explicit operator, AND-ed in.
    #[must_use]
    pub fn where_op(self, column: Column, operator: SqlOperator, value: impl Into<Operand>) -> Self {
        self.and_op(column, operator, value)
    }

    /// AND-combines an equality condition.
    #[must_use]
    pub fn and(self, column: Column, value: impl Into<Operand>) -> Self {
        self.and_criterion(Criterion::new(column, SqlOperator::Equal, value))
    }

    /// AND-combines a condition with an explicit operator.
    #[must_use]
    pub fn and_op(self, column: Column, operator: SqlOperator, value: impl Into<Operand>) -> Self {
        self.and_criterion(Criterion::new(column, operator, value))
    }

    /// OR-combines an equality condition.
    #[must_use]
    pub fn or(self, column: Column, value: impl Into<Operand>) -> Self {
        self.or_criterion(Criterion::new(column, SqlOperator::Equal, value))
    }

    /// OR-combines a condition with an explicit operator.
    #[must_use]
    pub fn or_op(self, column: Column, operator: SqlOperator, value: impl Into<Operand>) -> Self {
        self.or_criterion(Criterion::new(column, operator, value))
    }

    /// AND-combines an arbitrary criterion.
    #[must_use]
    pub fn and_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = Some(match self.criterion.take() {
            Some(existing) => existing.and(criterion),
            None => criterion,
        });
        self
    }

    /// OR-combines an arbitrary criterion.
    #[must_use]
    pub fn or_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = Some(match self.criterion.take() {
            Some(existing) => existing.or(criterion),
            None => criterion,
        });
        self
    }

    /// AND-combines a verbatim SQL condition with its replacement values.
    #[must_use]
    pub fn and_verbatim(self, sql: &str, replacements: Vec<Value>) -> Self {
        self.and_criterion(Criterion::verbatim(sql, replacements))
    }

    /// Returns the top-level condition, if any.
    #[must_use]
    pub const fn criterion(&self) -> Option<&Criterion> {
        self.criterion.as_ref()
    }

    // ---- select list ----------------------------------------------------

    /// Adds a select modifier such as `DISTINCT`.
    #[must_use]
    pub fn add_select_modifier(mut self, modifier: &str) -> Self {
        self.select_modifiers.push(String::from(modifier));
        self
    }

    /// Shorthand for the DISTINCT modifier.
    #[must_use]
    pub fn distinct(self) -> Self {
        self.add_select_modifier("DISTINCT")
    }

    /// Adds a column to the select list.
    #[must_use]
    pub fn add_select_column(mut self, column: Column) -> Self {
        self.select_columns.push(column);
        self
    }

    /// Maps an alias to a column, rendered as `<expr> AS <alias>`.
    #[must_use]
    pub fn add_as_column(mut self, alias: &str, column: Column) -> Self {
        self.as_columns.push((String::from(alias), column));
        self
    }

    /// Returns the select modifiers.
    #[must_use]
    pub fn select_modifiers(&self) -> &[String] {
        &self.select_modifiers
    }

    /// Returns the select columns.
    #[must_use]
    pub fn select_columns(&self) -> &[Column] {
        &self.select_columns
    }

    /// Returns the alias-to-column mappings in insertion order.
    #[must_use]
    pub fn as_columns(&self) -> &[(String, Column)] {
        &self.as_columns
    }

    // ---- tables and joins -----------------------------------------------

    /// Registers a table alias; the FROM clause then renders
    /// `<table> <alias>` wherever the alias is referenced.
    #[must_use]
    pub fn add_alias(mut self, alias: &str, table: &str) -> Self {
        self.aliases.push((String::from(alias), String::from(table)));
        self
    }

    /// Resolves a registered table alias.
    #[must_use]
    pub fn table_for_alias(&self, alias: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(candidate, _)| candidate == alias)
            .map(|(_, table)| table.as_str())
    }

    /// Adds an implicit (comma) join; its condition goes into WHERE.
    #[must_use]
    pub fn join(self, left: Column, right: Column) -> Self {
        self.add_join(Join::new(
            None,
            Criterion::new(left, SqlOperator::Equal, Operand::Column(right)),
        ))
    }

    /// Adds an explicit join between two columns.
    #[must_use]
    pub fn typed_join(self, left: Column, right: Column, join_type: JoinType) -> Self {
        self.add_join(Join::new(
            Some(join_type),
            Criterion::new(left, SqlOperator::Equal, Operand::Column(right)),
        ))
    }

    /// Adds a fully specified join declaration.
    #[must_use]
    pub fn add_join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// Returns the join declarations in order.
    #[must_use]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// Supplies an explicit FROM element; explicit elements replace the
    /// whole inferred FROM clause.
    #[must_use]
    pub fn add_from(mut self, element: FromElement) -> Self {
        self.from_elements.push(element);
        self
    }

    /// Returns the explicit FROM elements.
    #[must_use]
    pub fn from_elements(&self) -> &[FromElement] {
        &self.from_elements
    }

    // ---- grouping and ordering ------------------------------------------

    /// Adds a GROUP BY column.
    #[must_use]
    pub fn add_group_by_column(mut self, column: Column) -> Self {
        self.group_by.push(column);
        self
    }

    /// Returns the GROUP BY columns.
    #[must_use]
    pub fn group_by_columns(&self) -> &[Column] {
        &self.group_by
    }

    /// Sets the HAVING condition.
    #[must_use]
    pub fn set_having(mut self, criterion: Criterion) -> Self {
        self.having = Some(criterion);
        self
    }

    /// Returns the HAVING condition, if any.
    #[must_use]
    pub const fn having(&self) -> Option<&Criterion> {
        self.having.as_ref()
    }

    /// Adds an ascending ORDER BY column.
    #[must_use]
    pub fn add_ascending_order_by(self, column: Column) -> Self {
        self.add_order_by(OrderBy {
            column,
            direction: OrderDirection::Asc,
            ignore_case: false,
        })
    }

    /// Adds a descending ORDER BY column.
    #[must_use]
    pub fn add_descending_order_by(self, column: Column) -> Self {
        self.add_order_by(OrderBy {
            column,
            direction: OrderDirection::Desc,
            ignore_case: false,
        })
    }

    /// Adds an ORDER BY entry.
    #[must_use]
    pub fn add_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by.push(order_by);
        self
    }

    /// Returns the ORDER BY entries.
    #[must_use]
    pub fn order_by(&self) -> &[OrderBy] {
        &self.order_by
    }

    // ---- options --------------------------------------------------------

    /// Limits the number of returned rows; negative means no limit.
    #[must_use]
    pub const fn set_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Skips the first `offset` rows.
    #[must_use]
    pub const fn set_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the driver fetch size hint.
    #[must_use]
    pub const fn set_fetch_size(mut self, fetch_size: i32) -> Self {
        self.fetch_size = Some(fetch_size);
        self
    }

    /// Requests pessimistic row locking.
    #[must_use]
    pub const fn for_update(mut self) -> Self {
        self.for_update = true;
        self
    }

    /// Requests case-insensitive comparison for every condition.
    #[must_use]
    pub const fn set_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Returns the row limit; negative means no limit.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Returns the row offset.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the fetch size hint.
    #[must_use]
    pub const fn fetch_size(&self) -> Option<i32> {
        self.fetch_size
    }

    /// Returns true if pessimistic locking was requested.
    #[must_use]
    pub const fn is_for_update(&self) -> bool {
        self.for_update
    }

    /// Returns the criteria-wide ignore-case flag.
    #[must_use]
    pub const fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    // ---- set operations -------------------------------------------------

    /// Combines with another criteria via UNION.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        self.set_operation(other, SetOperator::Union)
    }

    /// Combines with another criteria via UNION ALL.
    #[must_use]
    pub fn union_all(self, other: Self) -> Self {
        self.set_operation(other, SetOperator::UnionAll)
    }

    /// Combines with another criteria via INTERSECT.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        self.set_operation(other, SetOperator::Intersect)
    }

    /// Combines with another criteria via INTERSECT ALL.
    #[must_use]
    pub fn intersect_all(self, other: Self) -> Self {
        self.set_operation(other, SetOperator::IntersectAll)
    }

    /// Combines with another criteria via EXCEPT.
    #[must_use]
    pub fn except(self, other: Self) -> Self {
        self.set_operation(other, SetOperator::Except)
    }

    /// Combines with another criteria via EXCEPT ALL.
    #[must_use]
    pub fn except_all(self, other: Self) -> Self {
        self.set_operation(other, SetOperator::ExceptAll)
    }

    fn set_operation(self, other: Self, operator: SetOperator) -> Self {
        if self.is_composite() && self.set_operator == Some(operator) {
            let mut composite = self;
            composite.set_parts.push(other);
            return composite;
        }
        // A different operator (or a plain criteria) starts a new composite
        // wrapping the current state as its first part.
        let mut composite = Self::new();
        composite.set_operator = Some(operator);
        composite.set_parts = vec![self, other];
        composite
    }

    /// Returns true if this criteria is a set operation over parts.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        !self.set_parts.is_empty()
    }

    /// Returns the set-operation parts.
    #[must_use]
    pub fn set_parts(&self) -> &[Criteria] {
        &self.set_parts
    }

    /// Returns the set operator joining the parts.
    #[must_use]
    pub const fn set_operator(&self) -> Option<SetOperator> {
        self.set_operator
    }
}
