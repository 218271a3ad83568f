//! Rendering strategies for single where-clause conditions.
//!
//! Each [`WherePartBuilder`] claims one category of expression. The chain is
//! tried in a fixed priority order and the first builder whose
//! [`is_applicable`](WherePartBuilder::is_applicable) returns true renders
//! the fragment; several builders could structurally match the same
//! expression (for example a null rValue whose lValue is a domain enum), so
//! first-match-wins ordering is part of the rendering contract.

mod builders;
mod in_list;
mod like;

pub use builders::{
    CurrentDateTimeBuilder, EnumValueBuilder, NullValueBuilder, StandardBuilder,
    VerbatimSqlBuilder,
};
pub use in_list::InListBuilder;
pub use like::LikeBuilder;

use std::fmt;

use crate::adapter::Database;
use crate::criterion::{Operand, WhereClauseExpression};
use crate::error::{Error, Result};
use crate::pspart::PreparedStatementPart;
use crate::value::Value;

/// A strategy rendering one category of where-clause expression.
pub trait WherePartBuilder: Send + Sync + fmt::Debug {
    /// Returns true if this builder is responsible for the expression.
    fn is_applicable(&self, expression: &WhereClauseExpression) -> bool;

    /// Renders the expression into a SQL fragment with its replacements.
    ///
    /// `ignore_case` is the effective case-insensitivity computed by the
    /// caller (criteria-level or per-condition flag, gated on both operands
    /// supporting case folding). `chain` allows a builder to re-dispatch a
    /// rewritten expression through the remaining strategies.
    fn build_ps(
        &self,
        expression: &WhereClauseExpression,
        ignore_case: bool,
        database: &Database,
        chain: &WhereClauseChain,
    ) -> Result<PreparedStatementPart>;
}

/// The ordered list of where-part strategies used by a compiler instance.
///
/// The default chain handles, in priority order: domain enum unwrapping,
/// verbatim SQL, CURRENT_DATE/TIME/TIMESTAMP sentinels, null comparisons,
/// the LIKE family, IN lists, and a catch-all standard comparison. Callers
/// may prepend custom strategies; the standard builder stays the catch-all.
#[derive(Debug)]
pub struct WhereClauseChain {
    builders: Vec<Box<dyn WherePartBuilder>>,
}

impl Default for WhereClauseChain {
    fn default() -> Self {
        Self {
            builders: vec![
                Box::new(EnumValueBuilder),
                Box::new(VerbatimSqlBuilder),
                Box::new(CurrentDateTimeBuilder),
                Box::new(NullValueBuilder),
                Box::new(LikeBuilder),
                Box::new(InListBuilder),
                Box::new(StandardBuilder),
            ],
        }
    }
}

impl WhereClauseChain {
    /// Creates the default chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a custom strategy ahead of the existing ones.
    pub fn prepend(&mut self, builder: Box<dyn WherePartBuilder>) {
        self.builders.insert(0, builder);
    }

    /// Renders one expression through the first applicable strategy.
    pub fn render(
        &self,
        expression: &WhereClauseExpression,
        ignore_case: bool,
        database: &Database,
    ) -> Result<PreparedStatementPart> {
        if expression.sql().is_none() && expression.l_value().is_none() {
            return Err(Error::EmptyExpression);
        }
        for builder in &self.builders {
            if builder.is_applicable(expression) {
                return builder.build_ps(expression, ignore_case, database, self);
            }
        }
        Err(Error::InvalidOperand(String::from(
            "no where-part builder claimed the expression",
        )))
    }
}

/// Renders one operand as a fragment: columns by their SQL expression,
/// date/time sentinels by their keyword, plain values as a `?` placeholder.
pub(crate) fn operand_part(operand: &Operand) -> Result<PreparedStatementPart> {
    match operand {
        Operand::Column(column) => Ok(PreparedStatementPart::from_sql(column.sql_expression())),
        Operand::Single(value) => Ok(value.current_date_time_keyword().map_or_else(
            || PreparedStatementPart::new("?", vec![value.clone()]),
            PreparedStatementPart::from_sql,
        )),
        Operand::List(_) => Err(Error::InvalidOperand(String::from(
            "a value list can only be compared with IN or NOT IN",
        ))),
    }
}

/// Unwraps domain enums in an operand to their stored values.
pub(crate) fn resolve_enums(operand: &Operand) -> Operand {
    match operand {
        Operand::Single(Value::Enum(value)) => Operand::Single(value.sql_value()),
        Operand::List(values) => Operand::List(
            values
                .iter()
                .map(|value| match value {
                    Value::Enum(inner) => inner.sql_value(),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}
