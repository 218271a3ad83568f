//! Boolean condition trees.

use crate::column::Column;
use crate::operator::SqlOperator;
use crate::value::{ToValue, Value};

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A column reference.
    Column(Column),
    /// A single value.
    Single(Value),
    /// A list of values (the IN-list case).
    List(Vec<Value>),
}

impl Operand {
    /// Returns the column if this operand is a column reference.
    #[must_use]
    pub const fn as_column(&self) -> Option<&Column> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }

    /// Returns true if this operand is SQL NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Single(Value::Null))
    }

    /// Returns true if the operand is or contains an unresolved domain enum.
    #[must_use]
    pub fn contains_enum(&self) -> bool {
        match self {
            Self::Column(_) => false,
            Self::Single(value) => matches!(value, Value::Enum(_)),
            Self::List(values) => values.iter().any(|v| matches!(v, Value::Enum(_))),
        }
    }
}

impl From<Column> for Operand {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<Value>> for Operand {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::Single(value.to_value())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Self::Single(value.to_value())
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Single(value.to_value())
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Single(value.to_value())
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Single(value.to_value())
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Self::Single(value.to_value())
    }
}

/// One raw condition: an `(lValue, operator, rValue)` triple or a verbatim
/// SQL fragment carrying its own replacements. The two forms are mutually
/// exclusive by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClauseExpression {
    l_value: Option<Operand>,
    operator: Option<SqlOperator>,
    r_value: Option<Operand>,
    sql: Option<String>,
    sql_replacements: Vec<Value>,
    ignore_case: bool,
}

impl WhereClauseExpression {
    /// Creates a comparison expression.
    #[must_use]
    pub fn new(l_value: Operand, operator: SqlOperator, r_value: Option<Operand>) -> Self {
        Self {
            l_value: Some(l_value),
            operator: Some(operator),
            r_value,
            sql: None,
            sql_replacements: vec![],
            ignore_case: false,
        }
    }

    /// Creates a verbatim SQL condition with its replacement values.
    #[must_use]
    pub fn verbatim(sql: impl Into<String>, replacements: Vec<Value>) -> Self {
        Self {
            l_value: None,
            operator: None,
            r_value: None,
            sql: Some(sql.into()),
            sql_replacements: replacements,
            ignore_case: false,
        }
    }

    /// Returns the left operand.
    #[must_use]
    pub const fn l_value(&self) -> Option<&Operand> {
        self.l_value.as_ref()
    }

    /// Returns the operator.
    #[must_use]
    pub const fn operator(&self) -> Option<SqlOperator> {
        self.operator
    }

    /// Returns the right operand.
    #[must_use]
    pub const fn r_value(&self) -> Option<&Operand> {
        self.r_value.as_ref()
    }

    /// Returns the verbatim SQL text, if this is a verbatim condition.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }

    /// Returns the verbatim condition's replacement values.
    #[must_use]
    pub fn sql_replacements(&self) -> &[Value] {
        &self.sql_replacements
    }

    /// Returns the per-expression ignore-case flag.
    #[must_use]
    pub const fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Returns true if the right operand is null or the operator is one of
    /// the IS [NOT] NULL family.
    #[must_use]
    pub fn is_null_comparison(&self) -> bool {
        if matches!(
            self.operator,
            Some(SqlOperator::IsNull | SqlOperator::IsNotNull)
        ) {
            return true;
        }
        match &self.r_value {
            None => self.operator.is_some(),
            Some(operand) => operand.is_null(),
        }
    }

    fn set_ignore_case(&mut self, ignore_case: bool) {
        self.ignore_case = ignore_case;
    }

    /// Copies this expression with both operands replaced. Used when domain
    /// enums are unwrapped ahead of rendering.
    pub(crate) fn with_operands(&self, l_value: Option<Operand>, r_value: Option<Operand>) -> Self {
        Self {
            l_value,
            operator: self.operator,
            r_value,
            sql: self.sql.clone(),
            sql_replacements: self.sql_replacements.clone(),
            ignore_case: self.ignore_case,
        }
    }
}

/// The conjunction joining parts of a composite criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    /// Parts joined with AND.
    And,
    /// Parts joined with OR.
    Or,
}

impl Conjunction {
    /// Returns the SQL representation including padding.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// A boolean condition tree: either a single raw condition or a composite
/// AND/OR of child criterions. Composites always render parenthesized.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// A single raw condition.
    Leaf(WhereClauseExpression),
    /// An AND/OR combination of child criterions.
    Composite {
        /// The ordered child criterions.
        parts: Vec<Criterion>,
        /// The conjunction joining the children.
        conjunction: Conjunction,
    },
}

impl Criterion {
    /// Creates a comparison criterion.
    #[must_use]
    pub fn new(
        l_value: impl Into<Operand>,
        operator: SqlOperator,
        r_value: impl Into<Operand>,
    ) -> Self {
        Self::Leaf(WhereClauseExpression::new(
            l_value.into(),
            operator,
            Some(r_value.into()),
        ))
    }

    /// Creates a criterion without a right operand (IS NULL / IS NOT NULL).
    #[must_use]
    pub fn unary(l_value: impl Into<Operand>, operator: SqlOperator) -> Self {
        Self::Leaf(WhereClauseExpression::new(l_value.into(), operator, None))
    }

    /// Creates a verbatim SQL criterion with its replacement values.
    #[must_use]
    pub fn verbatim(sql: impl Into<String>, replacements: Vec<Value>) -> Self {
        Self::Leaf(WhereClauseExpression::verbatim(sql, replacements))
    }

    /// Returns true for composite criterions.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Composite { .. })
    }

    /// Returns the single expression of a leaf criterion.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&WhereClauseExpression> {
        match self {
            Self::Leaf(expr) => Some(expr),
            Self::Composite { .. } => None,
        }
    }

    /// Requests case-insensitive comparison for this condition.
    ///
    /// Only meaningful on leaves; composites pass the request down to every
    /// child.
    #[must_use]
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.apply_ignore_case(ignore_case);
        self
    }

    fn apply_ignore_case(&mut self, ignore_case: bool) {
        match self {
            Self::Leaf(expr) => expr.set_ignore_case(ignore_case),
            Self::Composite { parts, .. } => {
                for part in parts {
                    part.apply_ignore_case(ignore_case);
                }
            }
        }
    }

    /// Combines this criterion with another using AND.
    ///
    /// Appends to an existing AND composite instead of nesting, so repeated
    /// `and` calls produce one flat parenthesized group.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        self.combine(other, Conjunction::And)
    }

    /// Combines this criterion with another using OR.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        self.combine(other, Conjunction::Or)
    }

    fn combine(self, other: Self, conjunction: Conjunction) -> Self {
        match self {
            Self::Composite {
                mut parts,
                conjunction: existing,
            } if existing == conjunction => {
                parts.push(other);
                Self::Composite {
                    parts,
                    conjunction: existing,
                }
            }
            first => Self::Composite {
                parts: vec![first, other],
                conjunction,
            },
        }
    }
}
