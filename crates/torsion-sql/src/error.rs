//! Error types for query compilation.

use thiserror::Error;

/// Errors raised while compiling a criteria graph into a [`Query`](crate::Query).
///
/// All of these are deterministic configuration/usage errors: given the same
/// criteria input, the same error reproduces identically. Compilation never
/// returns a partially populated query.
#[derive(Debug, Error)]
pub enum Error {
    /// A join declaration cannot be turned into a FROM clause entry.
    #[error("malformed join: {0}")]
    MalformedJoin(String),

    /// Both sides of an explicit join are already fixed in the FROM clause.
    #[error(
        "join conflict: both '{left}' and '{right}' are already present in the FROM clause, \
         a single join cannot attach to two tables with fixed positions"
    )]
    JoinConflict {
        /// The left table expression of the conflicting join.
        left: String,
        /// The right table expression of the conflicting join.
        right: String,
    },

    /// An operator was combined with an operand type it cannot render.
    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    /// A where-clause expression has neither an lValue nor verbatim SQL.
    #[error("empty where clause expression: no lValue and no verbatim SQL")]
    EmptyExpression,

    /// A limit/offset combination is not supported by the target database.
    #[error("unsupported limit: {0}")]
    UnsupportedLimit(String),
}

/// Result type alias for query compilation.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_conflict_message() {
        let err = Error::JoinConflict {
            left: String::from("a"),
            right: String::from("b"),
        };
        let message = err.to_string();
        assert!(message.contains("'a'"));
        assert!(message.contains("'b'"));
    }

    #[test]
    fn test_malformed_join_message() {
        let err = Error::MalformedJoin(String::from("composite condition without tables"));
        assert_eq!(
            err.to_string(),
            "malformed join: composite condition without tables"
        );
    }
}
