//! SQL comparison operators.

/// A comparison operator in a where-clause expression.
///
/// `as_str` returns the exact rendering used in statements: symbol operators
/// attach directly to their operands (`a=?`), word operators carry their own
/// padding (`a IN (?)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlOperator {
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `!=` (alternative not-equal spelling)
    AltNotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterEqual,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `ILIKE` (case-insensitive LIKE)
    ILike,
    /// `NOT ILIKE`
    NotILike,
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    IsNotNull,
}

impl SqlOperator {
    /// Returns the SQL representation, including any required padding.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::AltNotEqual => "!=",
            Self::LessThan => "<",
            Self::LessEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterEqual => ">=",
            Self::Like => " LIKE ",
            Self::NotLike => " NOT LIKE ",
            Self::ILike => " ILIKE ",
            Self::NotILike => " NOT ILIKE ",
            Self::In => " IN ",
            Self::NotIn => " NOT IN ",
            Self::IsNull => " IS NULL",
            Self::IsNotNull => " IS NOT NULL",
        }
    }

    /// Returns true for the LIKE family of operators.
    #[must_use]
    pub const fn is_like(self) -> bool {
        matches!(
            self,
            Self::Like | Self::NotLike | Self::ILike | Self::NotILike
        )
    }

    /// Returns true for IN / NOT IN.
    #[must_use]
    pub const fn is_in(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// Returns true for the negated members of each operator family.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        matches!(
            self,
            Self::NotEqual
                | Self::AltNotEqual
                | Self::NotLike
                | Self::NotILike
                | Self::NotIn
                | Self::IsNotNull
        )
    }
}
