//! Join declarations.

use crate::criterion::Criterion;
use crate::pspart::PreparedStatementPart;

/// Explicit SQL join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
    /// FULL JOIN.
    Full,
}

impl JoinType {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
        }
    }

    /// Returns the join type with left and right swapped.
    ///
    /// Used when the declared right table is already anchored in the FROM
    /// clause and the left table must be attached instead.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            other => other,
        }
    }
}

/// One join declaration of a criteria.
///
/// A `None` join type means an implicit old-style comma join whose condition
/// goes into the WHERE clause. If the condition is composite the left and
/// right table expressions must be given explicitly, because no single table
/// name can be inferred from a composite condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    join_type: Option<JoinType>,
    left_table: Option<PreparedStatementPart>,
    right_table: Option<PreparedStatementPart>,
    condition: Criterion,
}

impl Join {
    /// Creates a join whose tables are inferred from the condition.
    #[must_use]
    pub const fn new(join_type: Option<JoinType>, condition: Criterion) -> Self {
        Self {
            join_type,
            left_table: None,
            right_table: None,
            condition,
        }
    }

    /// Creates a join with explicit left and right table expressions.
    #[must_use]
    pub const fn with_tables(
        join_type: Option<JoinType>,
        left_table: PreparedStatementPart,
        right_table: PreparedStatementPart,
        condition: Criterion,
    ) -> Self {
        Self {
            join_type,
            left_table: Some(left_table),
            right_table: Some(right_table),
            condition,
        }
    }

    /// Returns the explicit join type, or `None` for an implicit join.
    #[must_use]
    pub const fn join_type(&self) -> Option<JoinType> {
        self.join_type
    }

    /// Returns the explicit left table expression, if given.
    #[must_use]
    pub const fn left_table(&self) -> Option<&PreparedStatementPart> {
        self.left_table.as_ref()
    }

    /// Returns the explicit right table expression, if given.
    #[must_use]
    pub const fn right_table(&self) -> Option<&PreparedStatementPart> {
        self.right_table.as_ref()
    }

    /// Returns the join condition.
    #[must_use]
    pub const fn condition(&self) -> &Criterion {
        &self.condition
    }
}
